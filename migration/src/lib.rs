pub use sea_orm_migration::prelude::*;
mod enums;
mod m20240101_000001_create_users;
mod m20240110_000001_create_teams;
mod m20240115_000001_create_tournaments;
mod m20240120_000001_create_contacts;
mod macros;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240110_000001_create_teams::Migration),
            Box::new(m20240115_000001_create_tournaments::Migration),
            Box::new(m20240120_000001_create_contacts::Migration),
        ]
    }
}
