use std::collections::HashSet;

use bcrypt::{hash, DEFAULT_COST};
use chrono::Duration;
use log::{error, info};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rocket::http::{Cookie, CookieJar};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    Condition, IntoActiveModel, NotSet, QueryOrder, SqlErr, TransactionTrait,
};

use entity::prelude::*;
use entity::sea_orm_active_enums::{InviteStatus, TeamRole as DbTeamRole, TournamentStatus as DbStatus};
use entity::*;

use crate::dto::{
    ContactForm, ContactStatusUpdate, ContactView, CreateTeam, MatchView, RegisterUser, TeamView,
    TournamentForm, TournamentView, UpdateTeam,
};
use crate::error::{AuthError, GenericError, TeamError, TournamentError};
use crate::{now, pairing, query};

const COOKIE_LENGTH: usize = 64;

/// Starts a session: stores a random token for the user and hands it out in the private `auth`
/// cookie.
pub async fn generate_cookie(
    db: &impl ConnectionTrait,
    user_id: i32,
    cookies: &CookieJar<'_>,
) -> Result<(), GenericError> {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(COOKIE_LENGTH)
        .map(char::from)
        .collect();
    user_cookies::ActiveModel {
        cookie: Set(token.clone()),
        user_id: Set(user_id),
        created_at: Set(now()),
    }
    .insert(db)
    .await
    .map_err(|_| GenericError::UnknownError("Unable to store session"))?;
    cookies.add_private(Cookie::new("auth", token));
    Ok(())
}

pub async fn remove_cookie(db: &impl ConnectionTrait, cookie: &str) -> Result<(), GenericError> {
    UserCookies::delete_by_id(cookie.to_string())
        .exec(db)
        .await
        .map_err(|_| GenericError::UnknownError("Error while trying to delete cookie"))?;
    Ok(())
}

pub async fn remove_all_cookies(
    db: &impl ConnectionTrait,
    user_id: i32,
) -> Result<u64, GenericError> {
    Ok(UserCookies::delete_many()
        .filter(user_cookies::Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(|_| GenericError::UnknownError("Error while trying to delete cookies"))?
        .rows_affected)
}

/// Creates the account and its password hash in one transaction, then logs the new user in.
/// Emails listed in `admin_emails` get the admin flag.
pub async fn register_user(
    db: &DatabaseConnection,
    input: RegisterUser,
    admin_emails: &[String],
    cookies: &CookieJar<'_>,
) -> Result<user::Model, GenericError> {
    let checked = input.validate()?;
    if query::email_taken(db, &checked.email).await? {
        return Err(GenericError::Conflict("A user with this email already exists"));
    }
    let admin = admin_emails
        .iter()
        .any(|e| e.eq_ignore_ascii_case(&checked.email));
    let hashed_password = hash(&input.password, DEFAULT_COST).map_err(|e| {
        error!("Unable to hash password: {e}");
        GenericError::UnknownError("Unable to hash password")
    })?;

    let txn = db.begin().await?;
    let user = checked.into_active_model(admin, now()).insert(&txn).await?;
    user_authentication::ActiveModel {
        user_id: Set(user.id),
        hashed_password: Set(hashed_password),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!("Registered user {} (admin: {})", user.id, user.admin);
    generate_cookie(db, user.id, cookies).await?;
    Ok(user)
}

pub async fn login(
    db: &impl ConnectionTrait,
    email: &str,
    password: &str,
    cookies: &CookieJar<'_>,
) -> Result<user::Model, GenericError> {
    let user = query::authenticate(db, email, password)
        .await?
        .ok_or(AuthError::WrongPassword)?;
    generate_cookie(db, user.id, cookies).await?;
    Ok(user)
}

fn team_conflict(e: DbErr) -> GenericError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => TeamError::NameOrTagTaken.into(),
        _ => e.into(),
    }
}

async fn insert_invites(
    db: &impl ConnectionTrait,
    team_id: i32,
    user_ids: HashSet<i32>,
) -> Result<(), GenericError> {
    if user_ids.is_empty() {
        return Ok(());
    }
    let users = User::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(db)
        .await?;
    for user in users {
        team_invite::ActiveModel {
            id: NotSet,
            team_id: Set(team_id),
            user_id: Set(user.id),
            email: Set(user.email),
            status: Set(InviteStatus::Pending),
            created_at: Set(now()),
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

/// Creates the team with the caller as captain and invites every known user in `invitedUsers`.
pub async fn create_team(
    db: &DatabaseConnection,
    captain_id: i32,
    input: CreateTeam,
) -> Result<TeamView, GenericError> {
    let checked = input.validate()?;
    if query::team_name_or_tag_taken(db, checked.name_key(), checked.tag_key(), None).await? {
        return Err(TeamError::NameOrTagTaken.into());
    }
    let invited: HashSet<i32> = input
        .invited_users
        .into_iter()
        .filter(|&id| id != captain_id)
        .collect();

    let txn = db.begin().await?;
    let team = checked
        .into_active_model(captain_id, now())
        .insert(&txn)
        .await
        .map_err(team_conflict)?;
    team_member::ActiveModel {
        id: NotSet,
        team_id: Set(team.id),
        user_id: Set(captain_id),
        role: Set(DbTeamRole::Captain),
        joined_at: Set(now()),
    }
    .insert(&txn)
    .await?;
    insert_invites(&txn, team.id, invited).await?;
    txn.commit().await?;

    info!("User {captain_id} created team {} ({})", team.id, team.tag);
    query::get_team_details(db, team.id, captain_id).await
}

pub async fn update_team(
    db: &impl ConnectionTrait,
    team_id: i32,
    user_id: i32,
    input: UpdateTeam,
) -> Result<TeamView, GenericError> {
    let team = query::require_captain(db, team_id, user_id).await?;
    let checked = input.validate()?;
    if query::team_name_or_tag_taken(db, checked.name_key(), checked.tag_key(), Some(team_id))
        .await?
    {
        return Err(TeamError::NameOrTagTaken.into());
    }
    let mut team = team.into_active_model();
    checked.apply(&mut team, now());
    team.update(db).await.map_err(team_conflict)?;
    query::get_team_details(db, team_id, user_id).await
}

async fn delete_matches_involving(
    db: &impl ConnectionTrait,
    team_id: i32,
) -> Result<(), GenericError> {
    TournamentMatch::delete_many()
        .filter(
            Condition::any()
                .add(tournament_match::Column::TeamAId.eq(team_id))
                .add(tournament_match::Column::TeamBId.eq(team_id)),
        )
        .exec(db)
        .await?;
    Ok(())
}

/// Removes the team and everything hanging off it.
pub async fn delete_team(
    db: &DatabaseConnection,
    team_id: i32,
    user_id: i32,
) -> Result<(), GenericError> {
    let team = query::require_captain(db, team_id, user_id).await?;

    let txn = db.begin().await?;
    delete_matches_involving(&txn, team_id).await?;
    TournamentRegistration::delete_many()
        .filter(tournament_registration::Column::TeamId.eq(team_id))
        .exec(&txn)
        .await?;
    TeamInvite::delete_many()
        .filter(team_invite::Column::TeamId.eq(team_id))
        .exec(&txn)
        .await?;
    TeamMember::delete_many()
        .filter(team_member::Column::TeamId.eq(team_id))
        .exec(&txn)
        .await?;
    team.delete(&txn).await?;
    txn.commit().await?;

    info!("User {user_id} deleted team {team_id}");
    Ok(())
}

/// Invites users that are neither members nor already invited.
pub async fn invite_users(
    db: &DatabaseConnection,
    team_id: i32,
    user_id: i32,
    user_ids: Vec<i32>,
) -> Result<TeamView, GenericError> {
    let team = query::require_captain(db, team_id, user_id).await?;

    let txn = db.begin().await?;
    let members: HashSet<i32> = team
        .find_related(TeamMember)
        .all(&txn)
        .await?
        .into_iter()
        .map(|m| m.user_id)
        .collect();
    let invited: HashSet<i32> = team
        .find_related(TeamInvite)
        .filter(team_invite::Column::Status.eq(InviteStatus::Pending))
        .all(&txn)
        .await?
        .into_iter()
        .map(|i| i.user_id)
        .collect();
    let fresh = user_ids
        .into_iter()
        .filter(|id| !members.contains(id) && !invited.contains(id))
        .collect();
    insert_invites(&txn, team_id, fresh).await?;
    txn.commit().await?;

    query::get_team_details(db, team_id, user_id).await
}

/// Accepts or declines one of the caller's pending invites. Accepting adds a MEMBER row.
pub async fn answer_invite(
    db: &DatabaseConnection,
    invite_id: i32,
    user_id: i32,
    accept: bool,
) -> Result<(), GenericError> {
    let invite = TeamInvite::find_by_id(invite_id)
        .one(db)
        .await?
        .ok_or(TeamError::InviteNotFound)?;
    if invite.user_id != user_id {
        return Err(TeamError::InviteNotForYou.into());
    }
    if invite.status != InviteStatus::Pending {
        return Err(TeamError::InviteAlreadyAnswered.into());
    }
    let team_id = invite.team_id;

    let txn = db.begin().await?;
    let mut invite = invite.into_active_model();
    invite.status = Set(if accept {
        InviteStatus::Accepted
    } else {
        InviteStatus::Declined
    });
    invite.update(&txn).await?;
    if accept && query::membership(&txn, team_id, user_id).await?.is_none() {
        team_member::ActiveModel {
            id: NotSet,
            team_id: Set(team_id),
            user_id: Set(user_id),
            role: Set(DbTeamRole::Member),
            joined_at: Set(now()),
        }
        .insert(&txn)
        .await?;
    }
    txn.commit().await?;
    Ok(())
}

pub async fn create_tournament(
    db: &impl ConnectionTrait,
    form: TournamentForm,
) -> Result<TournamentView, GenericError> {
    let checked = form.validate()?;
    let tournament = checked.into_active_model(now()).insert(db).await?;
    info!(
        "Created {} tournament {} ({})",
        form.tournament_type, tournament.id, tournament.name
    );
    Ok(TournamentView::new(tournament, 0))
}

pub async fn update_tournament(
    db: &impl ConnectionTrait,
    tournament_id: i32,
    form: TournamentForm,
) -> Result<TournamentView, GenericError> {
    let tournament = query::find_tournament(db, tournament_id).await?;
    let checked = form.validate()?;
    let mut tournament = tournament.into_active_model();
    checked.apply(&mut tournament, now());
    let tournament = tournament.update(db).await?;
    let participants = query::participant_count(db, tournament_id).await?;
    Ok(TournamentView::new(tournament, participants))
}

pub async fn delete_tournament(
    db: &DatabaseConnection,
    tournament_id: i32,
) -> Result<(), GenericError> {
    let tournament = query::find_tournament(db, tournament_id).await?;

    let txn = db.begin().await?;
    TournamentMatch::delete_many()
        .filter(tournament_match::Column::TournamentId.eq(tournament_id))
        .exec(&txn)
        .await?;
    TournamentRegistration::delete_many()
        .filter(tournament_registration::Column::TournamentId.eq(tournament_id))
        .exec(&txn)
        .await?;
    tournament.delete(&txn).await?;
    txn.commit().await?;
    Ok(())
}

/// Registers a team for an upcoming tournament on behalf of its captain.
pub async fn register_team(
    db: &impl ConnectionTrait,
    tournament_id: i32,
    user_id: i32,
    team_id: i32,
) -> Result<TournamentView, GenericError> {
    let tournament = query::find_tournament(db, tournament_id).await?;
    query::require_captain(db, team_id, user_id).await?;

    if tournament.status != DbStatus::Upcoming || now() > tournament.registration_deadline {
        return Err(TournamentError::RegistrationClosed.into());
    }
    let registered = tournament
        .find_related(TournamentRegistration)
        .all(db)
        .await?;
    if registered.iter().any(|r| r.team_id == team_id) {
        return Err(TournamentError::AlreadyRegistered.into());
    }
    if registered.len() as i64 >= i64::from(tournament.max_participants) {
        return Err(TournamentError::Full.into());
    }

    tournament_registration::ActiveModel {
        id: NotSet,
        tournament_id: Set(tournament_id),
        team_id: Set(team_id),
        registered_at: Set(now()),
    }
    .insert(db)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => TournamentError::AlreadyRegistered.into(),
        _ => GenericError::from(e),
    })?;

    info!("Team {team_id} registered for tournament {tournament_id}");
    Ok(TournamentView::new(tournament, registered.len() as u64 + 1))
}

/// Builds the first schedule from the registrations, seeded in registration order. Round `r` is
/// played `r - 1` days after the start date.
pub async fn generate_matches(
    db: &DatabaseConnection,
    tournament_id: i32,
) -> Result<Vec<MatchView>, GenericError> {
    let tournament = query::find_tournament(db, tournament_id).await?;

    if tournament.find_related(TournamentMatch).count(db).await? > 0 {
        return Err(TournamentError::ScheduleExists.into());
    }
    let seeds: Vec<i32> = tournament
        .find_related(TournamentRegistration)
        .order_by_asc(tournament_registration::Column::RegisteredAt)
        .order_by_asc(tournament_registration::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|r| r.team_id)
        .collect();
    if seeds.len() < 2 {
        return Err(TournamentError::NotEnoughParticipants.into());
    }

    let pairings = pairing::schedule(tournament.tournament_type.clone().into(), &seeds);
    let txn = db.begin().await?;
    for p in &pairings {
        tournament_match::ActiveModel {
            id: NotSet,
            tournament_id: Set(tournament_id),
            round: Set(p.round),
            team_a_id: Set(p.team_a),
            team_b_id: Set(p.team_b),
            scheduled_at: Set(tournament.start_date + Duration::days(i64::from(p.round - 1))),
        }
        .insert(&txn)
        .await?;
    }
    txn.commit().await?;

    info!(
        "Generated {} pairings for tournament {tournament_id} from {} teams",
        pairings.len(),
        seeds.len()
    );
    query::get_matches(db, tournament_id).await
}

pub async fn create_contact(
    db: &impl ConnectionTrait,
    form: ContactForm,
) -> Result<ContactView, GenericError> {
    let contact = form.validate()?.into_active_model(now()).insert(db).await?;
    Ok(contact.into())
}

pub async fn update_contact_status(
    db: &impl ConnectionTrait,
    contact_id: i32,
    update: ContactStatusUpdate,
) -> Result<ContactView, GenericError> {
    let status = update
        .status
        .ok_or(GenericError::BadRequest("Status is required"))?;
    let contact = Contact::find_by_id(contact_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Contact not found"))?;
    let mut contact = contact.into_active_model();
    contact.status = Set(status.into());
    Ok(contact.update(db).await?.into())
}

pub async fn delete_contact(db: &impl ConnectionTrait, contact_id: i32) -> Result<(), GenericError> {
    let deleted = Contact::delete_by_id(contact_id).exec(db).await?;
    if deleted.rows_affected == 0 {
        return Err(GenericError::NotFound("Contact not found"));
    }
    Ok(())
}
