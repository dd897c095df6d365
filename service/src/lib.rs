pub mod dto;
pub mod error;
pub mod mutation;
pub mod pairing;
pub mod query;

pub use mutation::*;
pub use query::*;

pub use sea_orm;

use sea_orm::prelude::DateTimeWithTimeZone;

pub(crate) fn now() -> DateTimeWithTimeZone {
    chrono::Utc::now().into()
}
