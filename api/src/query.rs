use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use sea_orm::DatabaseConnection;

use service::dto::{
    AdminDashboardStats, ContactView, DashboardStats, InviteView, MatchView, TeamView,
    TournamentView, UserSummary,
};
use service::error::GenericError;

use crate::authenticate::{AdminUser, AuthenticatedUser};

/// # My teams
///
/// Every team the logged in user is a member of.
#[openapi(tag = "Team")]
#[get("/teams")]
pub(crate) async fn my_teams(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<TeamView>>, GenericError> {
    Ok(Json(service::get_user_teams(db.inner(), user.id()).await?))
}

#[openapi(tag = "Team")]
#[get("/teams/all")]
pub(crate) async fn all_teams(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<TeamView>>, GenericError> {
    Ok(Json(service::get_all_teams(db.inner(), user.id()).await?))
}

/// # Team details
///
/// Only visible to members. Includes the pending invites.
#[openapi(tag = "Team")]
#[get("/teams/<id>")]
pub(crate) async fn team_details(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
    id: i32,
) -> Result<Json<TeamView>, GenericError> {
    Ok(Json(service::get_team_details(db.inner(), id, user.id()).await?))
}

#[openapi(tag = "Team")]
#[get("/invites")]
pub(crate) async fn my_invites(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<InviteView>>, GenericError> {
    Ok(Json(service::get_pending_invites(db.inner(), user.id()).await?))
}

/// # Search users
///
/// Case-insensitive match on name or email. Needs at least three characters, shorter queries
/// give an empty list.
#[openapi(tag = "User")]
#[get("/users/search?<q>")]
pub(crate) async fn search_users(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
    q: Option<String>,
) -> Result<Json<Vec<UserSummary>>, GenericError> {
    let q = q.unwrap_or_default();
    Ok(Json(service::search_users(db.inner(), user.id(), &q).await?))
}

#[openapi(tag = "Tournament")]
#[get("/tournaments")]
pub(crate) async fn tournaments(
    db: &State<DatabaseConnection>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<TournamentView>>, GenericError> {
    Ok(Json(service::get_tournaments(db.inner()).await?))
}

#[openapi(tag = "Tournament")]
#[get("/tournaments/<id>")]
pub(crate) async fn tournament(
    db: &State<DatabaseConnection>,
    _user: AuthenticatedUser,
    id: i32,
) -> Result<Json<TournamentView>, GenericError> {
    Ok(Json(service::get_tournament(db.inner(), id).await?))
}

#[openapi(tag = "Tournament")]
#[get("/tournaments/<id>/matches")]
pub(crate) async fn tournament_matches(
    db: &State<DatabaseConnection>,
    _user: AuthenticatedUser,
    id: i32,
) -> Result<Json<Vec<MatchView>>, GenericError> {
    Ok(Json(service::get_matches(db.inner(), id).await?))
}

#[openapi(tag = "Admin")]
#[get("/admin/tournaments")]
pub(crate) async fn admin_tournaments(
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<Vec<TournamentView>>, GenericError> {
    Ok(Json(service::get_tournaments(db.inner()).await?))
}

#[openapi(tag = "Admin")]
#[get("/admin/tournaments/<id>")]
pub(crate) async fn admin_tournament(
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
    id: i32,
) -> Result<Json<TournamentView>, GenericError> {
    Ok(Json(service::get_tournament(db.inner(), id).await?))
}

#[openapi(tag = "Admin")]
#[get("/admin/contacts")]
pub(crate) async fn contacts(
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<Vec<ContactView>>, GenericError> {
    Ok(Json(service::get_contacts(db.inner()).await?))
}

/// # Dashboard statistics
///
/// Counts and the next matches of the teams the user belongs to.
#[openapi(tag = "Dashboard")]
#[get("/user/dashboard-stats")]
pub(crate) async fn dashboard_stats(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
) -> Result<Json<DashboardStats>, GenericError> {
    Ok(Json(service::dashboard_stats(db.inner(), user.id()).await?))
}

#[openapi(tag = "Dashboard")]
#[get("/admin/dashboard-stats")]
pub(crate) async fn admin_dashboard_stats(
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<AdminDashboardStats>, GenericError> {
    Ok(Json(service::admin_dashboard_stats(db.inner()).await?))
}
