mod authenticate;
pub mod config;
mod mutation;
mod query;
mod upload;

use rocket_okapi::openapi_get_routes;

#[macro_use]
extern crate rocket;

use authenticate::*;
use mutation::*;
use query::*;

pub use config::AppConfig;
pub use upload::{limits, MAX_UPLOAD_SIZE};

use rocket::fs::{FileServer, Options};
use rocket::http::Status;
use rocket::serde::json::{json, Value};
use rocket::{Build, Ignite, Request, Rocket, Route};
use rocket_okapi::rapidoc::{make_rapidoc, GeneralConfig, HideShowConfig, RapiDocConfig};
use rocket_okapi::settings::UrlObject;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};
use sea_orm::DatabaseConnection;

fn error_body(status: Status, request: &Request<'_>) -> Value {
    let message = request
        .local_cache(GuardFailure::default)
        .0
        .clone()
        .unwrap_or_else(|| status.reason().unwrap_or("Unknown error").to_string());
    json!({ "error": message })
}

#[catch(404)]
fn general_not_found() -> Value {
    json!({ "error": "Api endpoint not found" })
}

/// Bodies that parse as JSON but do not fit the expected shape.
#[catch(422)]
fn unprocessable() -> (Status, Value) {
    (
        Status::BadRequest,
        json!({ "error": "The request body is missing fields or has invalid values" }),
    )
}

#[catch(default)]
fn json_error(status: Status, request: &Request) -> Value {
    error_body(status, request)
}

/// Every route served under `/api`.
pub fn routes() -> Vec<Route> {
    let mut routes = openapi_get_routes![
        register,
        login,
        logout,
        logout_all,
        check_cookie,
        me,
        search_users,
        my_teams,
        all_teams,
        team_details,
        create_team,
        update_team,
        delete_team,
        invite_users,
        my_invites,
        accept_invite,
        decline_invite,
        tournaments,
        tournament,
        tournament_matches,
        register_team,
        admin_tournaments,
        admin_tournament,
        create_tournament,
        update_tournament,
        delete_tournament,
        generate_matches,
        submit_contact,
        contacts,
        update_contact,
        delete_contact,
        dashboard_stats,
        admin_dashboard_stats,
    ];
    // Multipart bodies have no schema, so uploads stay out of the OpenAPI document.
    routes.extend(routes![upload::upload]);
    routes
}

/// Assembles the application on top of `rocket`, which carries the configuration.
pub fn mount(rocket: Rocket<Build>, db: DatabaseConnection, config: AppConfig) -> Rocket<Build> {
    if let Err(e) = std::fs::create_dir_all(&config.upload_dir) {
        log::warn!(
            "Unable to create upload directory {}: {e}",
            config.upload_dir.display()
        );
    }
    let uploads = FileServer::new(&config.upload_dir, Options::Missing);

    rocket
        .manage(db)
        .manage(config)
        .mount("/api", routes())
        .mount(
            "/api/swagger",
            make_swagger_ui(&SwaggerUIConfig {
                url: "../openapi.json".to_owned(),
                ..Default::default()
            }),
        )
        .mount(
            "/api/",
            make_rapidoc(&RapiDocConfig {
                general: GeneralConfig {
                    spec_urls: vec![UrlObject::new("General", "./openapi.json")],
                    ..Default::default()
                },
                hide_show: HideShowConfig {
                    allow_spec_url_load: false,
                    allow_spec_file_load: false,
                    ..Default::default()
                },
                ..Default::default()
            }),
        )
        .mount("/uploads", uploads)
        .register("/api", catchers![general_not_found, unprocessable, json_error])
        .register("/", catchers![json_error])
}

pub fn build_rocket(db: DatabaseConnection, config: AppConfig) -> Rocket<Build> {
    let figment = rocket::Config::figment().merge(("limits", limits()));
    mount(rocket::custom(figment), db, config)
}

pub async fn launch(
    db: DatabaseConnection,
    config: AppConfig,
) -> Result<Rocket<Ignite>, rocket::Error> {
    build_rocket(db, config).launch().await
}
