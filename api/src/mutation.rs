use rocket::response::status::NoContent;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use sea_orm::DatabaseConnection;

use service::dto::{
    ContactForm, ContactStatusUpdate, ContactView, CreateTeam, InviteUsers, MatchView,
    RegisterTeam, SuccessResponse, TeamView, TournamentForm, TournamentView, UpdateTeam,
};
use service::error::GenericError;

use crate::authenticate::{AdminUser, AuthenticatedUser};

/// # Create a team
///
/// # Parameters
///
/// - `name`, `tag`, `description` - Required, the name and tag must be unique ignoring case
///
/// - `logo_url` - Optional, usually the `url` returned by `/upload`
///
/// - `invitedUsers` - Ids of users that get a pending invite
///
/// # Returns
///
/// The new team with the caller as captain
#[openapi(tag = "Team")]
#[post("/teams", format = "json", data = "<team>")]
pub(crate) async fn create_team(
    team: Json<CreateTeam>,
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
) -> Result<Json<TeamView>, GenericError> {
    Ok(Json(
        service::create_team(db.inner(), user.id(), team.into_inner()).await?,
    ))
}

/// # Update a team
///
/// Captain only.
#[openapi(tag = "Team")]
#[put("/teams/<id>", format = "json", data = "<team>")]
pub(crate) async fn update_team(
    id: i32,
    team: Json<UpdateTeam>,
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
) -> Result<Json<TeamView>, GenericError> {
    Ok(Json(
        service::update_team(db.inner(), id, user.id(), team.into_inner()).await?,
    ))
}

/// # Delete a team
///
/// Captain only. Memberships, invites, registrations and matches go with it.
#[openapi(tag = "Team")]
#[delete("/teams/<id>")]
pub(crate) async fn delete_team(
    id: i32,
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
) -> Result<Json<SuccessResponse>, GenericError> {
    service::delete_team(db.inner(), id, user.id()).await?;
    Ok(Json(SuccessResponse { success: true }))
}

#[openapi(tag = "Team")]
#[post("/teams/<id>/invites", format = "json", data = "<invites>")]
pub(crate) async fn invite_users(
    id: i32,
    invites: Json<InviteUsers>,
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
) -> Result<Json<TeamView>, GenericError> {
    Ok(Json(
        service::invite_users(db.inner(), id, user.id(), invites.into_inner().user_ids).await?,
    ))
}

#[openapi(tag = "Team")]
#[post("/invites/<id>/accept")]
pub(crate) async fn accept_invite(
    id: i32,
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
) -> Result<Json<SuccessResponse>, GenericError> {
    service::answer_invite(db.inner(), id, user.id(), true).await?;
    Ok(Json(SuccessResponse { success: true }))
}

#[openapi(tag = "Team")]
#[post("/invites/<id>/decline")]
pub(crate) async fn decline_invite(
    id: i32,
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
) -> Result<Json<SuccessResponse>, GenericError> {
    service::answer_invite(db.inner(), id, user.id(), false).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// # Register a team for a tournament
///
/// The caller must captain the team. The tournament has to be upcoming, before its registration
/// deadline and not full.
#[openapi(tag = "Tournament")]
#[post("/tournaments/<id>/register", format = "json", data = "<registration>")]
pub(crate) async fn register_team(
    id: i32,
    registration: Json<RegisterTeam>,
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
) -> Result<Json<TournamentView>, GenericError> {
    Ok(Json(
        service::register_team(db.inner(), id, user.id(), registration.team_id).await?,
    ))
}

/// # Create a tournament
///
/// Dates accept RFC 3339 as well as the `YYYY-MM-DDTHH:MM` format of `datetime-local` inputs,
/// which is read as UTC.
#[openapi(tag = "Admin")]
#[post("/admin/tournaments", format = "json", data = "<tournament>")]
pub(crate) async fn create_tournament(
    tournament: Json<TournamentForm>,
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<TournamentView>, GenericError> {
    Ok(Json(
        service::create_tournament(db.inner(), tournament.into_inner()).await?,
    ))
}

#[openapi(tag = "Admin")]
#[put("/admin/tournaments/<id>", format = "json", data = "<tournament>")]
pub(crate) async fn update_tournament(
    id: i32,
    tournament: Json<TournamentForm>,
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<TournamentView>, GenericError> {
    Ok(Json(
        service::update_tournament(db.inner(), id, tournament.into_inner()).await?,
    ))
}

#[openapi(tag = "Admin")]
#[delete("/admin/tournaments/<id>")]
pub(crate) async fn delete_tournament(
    id: i32,
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<NoContent, GenericError> {
    service::delete_tournament(db.inner(), id).await?;
    Ok(NoContent)
}

/// # Generate matches
///
/// Builds the first schedule from the registered teams in registration order.
#[openapi(tag = "Admin")]
#[post("/admin/tournaments/<id>/matches")]
pub(crate) async fn generate_matches(
    id: i32,
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<Vec<MatchView>>, GenericError> {
    Ok(Json(service::generate_matches(db.inner(), id).await?))
}

/// # Contact form
///
/// Public, no session needed.
#[openapi(tag = "Contact")]
#[post("/contacts", format = "json", data = "<contact>")]
pub(crate) async fn submit_contact(
    contact: Json<ContactForm>,
    db: &State<DatabaseConnection>,
) -> Result<Json<ContactView>, GenericError> {
    Ok(Json(
        service::create_contact(db.inner(), contact.into_inner()).await?,
    ))
}

#[openapi(tag = "Admin")]
#[patch("/admin/contacts/<id>", format = "json", data = "<update>")]
pub(crate) async fn update_contact(
    id: i32,
    update: Json<ContactStatusUpdate>,
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<ContactView>, GenericError> {
    Ok(Json(
        service::update_contact_status(db.inner(), id, update.into_inner()).await?,
    ))
}

#[openapi(tag = "Admin")]
#[delete("/admin/contacts/<id>")]
pub(crate) async fn delete_contact(
    id: i32,
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<NoContent, GenericError> {
    service::delete_contact(db.inner(), id).await?;
    Ok(NoContent)
}
