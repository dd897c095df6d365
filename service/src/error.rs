use log::error;
use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use rocket::{response, Request, Response};
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::okapi::schemars::{self, JsonSchema, Map};
use rocket_okapi::response::OpenApiResponderInner;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use std::fmt::Debug;
use std::io::Cursor;

#[derive(Serialize, JsonSchema, Debug)]
pub enum GenericError {
    Unauthorized(&'static str),
    Forbidden(&'static str),
    NotFound(&'static str),
    BadRequest(&'static str),
    Validation(String),
    Conflict(&'static str),
    UnknownError(&'static str),
    AuthError(AuthError),
    TeamError(TeamError),
    TournamentError(TournamentError),
}

pub trait MyRocketError {
    fn to_rocket_status(&self) -> Status;
    fn to_err_message(&self) -> String;
}

impl MyRocketError for GenericError {
    fn to_rocket_status(&self) -> Status {
        match self {
            Self::Unauthorized(_) => Status::Unauthorized,
            Self::Forbidden(_) => Status::Forbidden,
            Self::NotFound(_) => Status::NotFound,
            Self::BadRequest(_) | Self::Validation(_) | Self::Conflict(_) => Status::BadRequest,
            Self::UnknownError(_) => Status::InternalServerError,
            Self::AuthError(e) => e.to_rocket_status(),
            Self::TeamError(e) => e.to_rocket_status(),
            Self::TournamentError(e) => e.to_rocket_status(),
        }
    }

    fn to_err_message(&self) -> String {
        match self {
            Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::BadRequest(msg)
            | Self::Conflict(msg)
            | Self::UnknownError(msg) => msg.to_string(),
            Self::Validation(msg) => msg.clone(),
            Self::AuthError(e) => e.to_err_message(),
            Self::TeamError(e) => e.to_err_message(),
            Self::TournamentError(e) => e.to_err_message(),
        }
    }
}

impl<'r> Responder<'r, 'static> for GenericError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = self.to_rocket_status();
        if status == Status::InternalServerError {
            error!("Request failed: {:?}", self);
        }
        let body = serde_json::json!({ "error": self.to_err_message() }).to_string();
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

#[derive(Serialize, JsonSchema, Debug)]
pub enum AuthError {
    Missing,
    Invalid,
    WrongPassword,
    NotAdmin,
}

impl MyRocketError for AuthError {
    fn to_rocket_status(&self) -> Status {
        match self {
            Self::Missing | Self::Invalid | Self::WrongPassword => Status::Unauthorized,
            Self::NotAdmin => Status::Forbidden,
        }
    }

    fn to_err_message(&self) -> String {
        match self {
            Self::Missing => "You must be logged in to do this",
            Self::Invalid => "Your session is invalid or has expired",
            Self::WrongPassword => "Wrong email or password",
            Self::NotAdmin => "Administrator rights are required",
        }
        .to_string()
    }
}

#[derive(Serialize, JsonSchema, Debug)]
pub enum TeamError {
    NotFound,
    NameOrTagTaken,
    NotMember,
    NotCaptain,
    InviteNotFound,
    InviteNotForYou,
    InviteAlreadyAnswered,
}

impl MyRocketError for TeamError {
    fn to_rocket_status(&self) -> Status {
        match self {
            Self::NotFound | Self::InviteNotFound => Status::NotFound,
            Self::NameOrTagTaken | Self::InviteAlreadyAnswered => Status::BadRequest,
            Self::NotMember | Self::NotCaptain | Self::InviteNotForYou => Status::Forbidden,
        }
    }

    fn to_err_message(&self) -> String {
        match self {
            Self::NotFound => "Team not found",
            Self::NameOrTagTaken => "A team with this name or tag already exists",
            Self::NotMember => "You do not have access to this team",
            Self::NotCaptain => "Only the team captain can do this",
            Self::InviteNotFound => "Invite not found",
            Self::InviteNotForYou => "This invite was sent to someone else",
            Self::InviteAlreadyAnswered => "This invite has already been answered",
        }
        .to_string()
    }
}

#[derive(Serialize, JsonSchema, Debug)]
pub enum TournamentError {
    NotFound,
    RegistrationClosed,
    Full,
    AlreadyRegistered,
    NotEnoughParticipants,
    ScheduleExists,
}

impl MyRocketError for TournamentError {
    fn to_rocket_status(&self) -> Status {
        match self {
            Self::NotFound => Status::NotFound,
            _ => Status::BadRequest,
        }
    }

    fn to_err_message(&self) -> String {
        match self {
            Self::NotFound => "Tournament not found",
            Self::RegistrationClosed => "Registration for this tournament is closed",
            Self::Full => "This tournament has reached its maximum number of participants",
            Self::AlreadyRegistered => "This team is already registered for the tournament",
            Self::NotEnoughParticipants => "At least two teams are needed to generate matches",
            Self::ScheduleExists => "Matches have already been generated for this tournament",
        }
        .to_string()
    }
}

impl From<AuthError> for GenericError {
    fn from(e: AuthError) -> Self {
        Self::AuthError(e)
    }
}

impl From<TeamError> for GenericError {
    fn from(e: TeamError) -> Self {
        Self::TeamError(e)
    }
}

impl From<TournamentError> for GenericError {
    fn from(e: TournamentError) -> Self {
        Self::TournamentError(e)
    }
}

impl From<DbErr> for GenericError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Self::Conflict("This resource already exists")
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::BadRequest("A referenced resource does not exist")
            }
            _ => {
                error!("Database error: {:#?}", e);
                Self::UnknownError("An unexpected error occurred")
            }
        }
    }
}

impl OpenApiResponderInner for GenericError {
    fn responses(_: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response as OpenApiResponse};

        let mut responses = Map::new();
        responses.insert(
            "400".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [400 Bad Request](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/400)\n\
                The request failed validation or conflicts with an existing resource. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "401".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [401 Unauthorized](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/401)\n\
                No valid session cookie was sent with the request. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "403".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [403 Forbidden](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/403)\n\
                The session is valid but not allowed to perform this action. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "404".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [404 Not Found](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/404)\n\
                This response is given when you request a resource that does not exist.\
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "500".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [500 Internal Server Error](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/500)\n\
                This response is given when something went wrong on the server. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        Ok(Responses {
            responses,
            ..Default::default()
        })
    }
}
