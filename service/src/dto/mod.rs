pub mod forms;
mod mutation;
mod query;

pub use forms::parse_timestamp;

use entity::*;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use sea_orm::prelude::DateTimeWithTimeZone;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamRole {
    #[serde(rename = "CAPTAIN")]
    Captain,
    #[serde(rename = "MEMBER")]
    Member,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "ACCEPTED")]
    Accepted,
    #[serde(rename = "DECLINED")]
    Declined,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TournamentType {
    Elimination,
    RoundRobin,
    Swiss,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TournamentStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Read,
    Replied,
    Archived,
}

// Users and sessions

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub admin: bool,
}

// Teams

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct CreateTeam {
    pub name: String,
    pub tag: String,
    pub description: String,
    #[serde(default, alias = "logoUrl")]
    pub logo_url: Option<String>,
    #[serde(default, rename = "invitedUsers")]
    pub invited_users: Vec<i32>,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct UpdateTeam {
    pub name: String,
    pub tag: String,
    pub description: String,
    #[serde(default, rename = "logoUrl", alias = "logo_url")]
    pub logo_url: Option<String>,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct InviteUsers {
    #[serde(rename = "userIds")]
    pub user_ids: Vec<i32>,
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct TeamMemberView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: TeamRole,
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct PendingInvite {
    pub id: i32,
    pub email: String,
    pub status: InvitationStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTimeWithTimeZone,
}

/// A team as shown to a particular user: `is_owner` is relative to the requester and
/// `pending_invites` is only filled in on the detail view.
#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct TeamView {
    pub id: i32,
    pub name: String,
    pub tag: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub captain_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub members: Vec<TeamMemberView>,
    #[serde(rename = "isOwner")]
    pub is_owner: bool,
    #[serde(rename = "pendingInvites", skip_serializing_if = "Option::is_none")]
    pub pending_invites: Option<Vec<PendingInvite>>,
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InviteView {
    pub id: i32,
    pub team_id: i32,
    pub team_name: String,
    pub team_tag: String,
    pub status: InvitationStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Serialize, JsonSchema, Debug)]
pub struct SuccessResponse {
    pub success: bool,
}

// Tournaments

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TournamentForm {
    pub name: String,
    #[serde(rename = "type")]
    pub tournament_type: TournamentType,
    pub start_date: String,
    pub end_date: String,
    pub registration_deadline: String,
    pub max_participants: i32,
    pub description: String,
    pub rules: String,
    #[serde(default)]
    pub prizes: Option<String>,
    #[serde(default)]
    pub status: Option<TournamentStatus>,
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TournamentView {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub tournament_type: TournamentType,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub registration_deadline: DateTimeWithTimeZone,
    pub max_participants: i32,
    pub description: String,
    pub rules: String,
    pub prizes: String,
    pub status: TournamentStatus,
    pub participants: u64,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct RegisterTeam {
    #[serde(rename = "teamId")]
    pub team_id: i32,
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct TeamRef {
    pub id: i32,
    pub name: String,
    pub tag: String,
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: i32,
    pub round: i32,
    pub team_a: TeamRef,
    pub team_b: Option<TeamRef>,
    pub scheduled_at: DateTimeWithTimeZone,
}

// Contacts

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct ContactStatusUpdate {
    #[serde(default)]
    pub status: Option<ContactStatus>,
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct ContactView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTimeWithTimeZone,
}

// Dashboards

#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct UpcomingMatch {
    pub id: i32,
    pub tournament_name: String,
    pub opponent: String,
    pub date: DateTimeWithTimeZone,
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct RecentTournament {
    pub id: i32,
    pub name: String,
    pub start_date: DateTimeWithTimeZone,
    pub status: TournamentStatus,
}

#[derive(Serialize, JsonSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_tournaments: u64,
    pub total_teams: u64,
    pub upcoming_matches: Vec<UpcomingMatch>,
    pub recent_tournaments: Vec<RecentTournament>,
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub admin: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct TournamentRow {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub tournament_type: TournamentType,
    pub status: TournamentStatus,
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardStats {
    pub total_users: u64,
    pub active_tournaments: u64,
    pub total_teams: u64,
    pub recent_users: Vec<AdminUserRow>,
    pub ongoing_tournaments: Vec<TournamentRow>,
}

impl From<sea_orm_active_enums::TeamRole> for TeamRole {
    fn from(role: sea_orm_active_enums::TeamRole) -> Self {
        match role {
            sea_orm_active_enums::TeamRole::Captain => TeamRole::Captain,
            sea_orm_active_enums::TeamRole::Member => TeamRole::Member,
        }
    }
}

impl From<sea_orm_active_enums::InviteStatus> for InvitationStatus {
    fn from(status: sea_orm_active_enums::InviteStatus) -> Self {
        match status {
            sea_orm_active_enums::InviteStatus::Pending => InvitationStatus::Pending,
            sea_orm_active_enums::InviteStatus::Accepted => InvitationStatus::Accepted,
            sea_orm_active_enums::InviteStatus::Declined => InvitationStatus::Declined,
        }
    }
}

impl From<sea_orm_active_enums::TournamentType> for TournamentType {
    fn from(kind: sea_orm_active_enums::TournamentType) -> Self {
        match kind {
            sea_orm_active_enums::TournamentType::Elimination => TournamentType::Elimination,
            sea_orm_active_enums::TournamentType::RoundRobin => TournamentType::RoundRobin,
            sea_orm_active_enums::TournamentType::Swiss => TournamentType::Swiss,
        }
    }
}

impl From<TournamentType> for sea_orm_active_enums::TournamentType {
    fn from(kind: TournamentType) -> Self {
        match kind {
            TournamentType::Elimination => sea_orm_active_enums::TournamentType::Elimination,
            TournamentType::RoundRobin => sea_orm_active_enums::TournamentType::RoundRobin,
            TournamentType::Swiss => sea_orm_active_enums::TournamentType::Swiss,
        }
    }
}

impl From<sea_orm_active_enums::TournamentStatus> for TournamentStatus {
    fn from(status: sea_orm_active_enums::TournamentStatus) -> Self {
        match status {
            sea_orm_active_enums::TournamentStatus::Upcoming => TournamentStatus::Upcoming,
            sea_orm_active_enums::TournamentStatus::Ongoing => TournamentStatus::Ongoing,
            sea_orm_active_enums::TournamentStatus::Completed => TournamentStatus::Completed,
            sea_orm_active_enums::TournamentStatus::Cancelled => TournamentStatus::Cancelled,
        }
    }
}

impl From<TournamentStatus> for sea_orm_active_enums::TournamentStatus {
    fn from(status: TournamentStatus) -> Self {
        match status {
            TournamentStatus::Upcoming => sea_orm_active_enums::TournamentStatus::Upcoming,
            TournamentStatus::Ongoing => sea_orm_active_enums::TournamentStatus::Ongoing,
            TournamentStatus::Completed => sea_orm_active_enums::TournamentStatus::Completed,
            TournamentStatus::Cancelled => sea_orm_active_enums::TournamentStatus::Cancelled,
        }
    }
}

impl From<sea_orm_active_enums::ContactStatus> for ContactStatus {
    fn from(status: sea_orm_active_enums::ContactStatus) -> Self {
        match status {
            sea_orm_active_enums::ContactStatus::New => ContactStatus::New,
            sea_orm_active_enums::ContactStatus::Read => ContactStatus::Read,
            sea_orm_active_enums::ContactStatus::Replied => ContactStatus::Replied,
            sea_orm_active_enums::ContactStatus::Archived => ContactStatus::Archived,
        }
    }
}

impl From<ContactStatus> for sea_orm_active_enums::ContactStatus {
    fn from(status: ContactStatus) -> Self {
        match status {
            ContactStatus::New => sea_orm_active_enums::ContactStatus::New,
            ContactStatus::Read => sea_orm_active_enums::ContactStatus::Read,
            ContactStatus::Replied => sea_orm_active_enums::ContactStatus::Replied,
            ContactStatus::Archived => sea_orm_active_enums::ContactStatus::Archived,
        }
    }
}
