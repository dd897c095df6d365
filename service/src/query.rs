use std::collections::{HashMap, HashSet};

use bcrypt::verify;
use itertools::Itertools;
use log::debug;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{Condition, QueryOrder, QuerySelect};

use entity::prelude::*;
use entity::sea_orm_active_enums::{InviteStatus, TeamRole as DbTeamRole, TournamentStatus as DbStatus};
use entity::*;

use crate::dto::{
    AdminDashboardStats, AdminUserRow, ContactView, DashboardStats, InviteView, MatchView,
    PendingInvite, RecentTournament, TeamMemberView, TeamRef, TeamView, TournamentRow,
    TournamentView, UpcomingMatch, UserSummary,
};
use crate::error::{GenericError, TeamError, TournamentError};

pub const MIN_SEARCH_LENGTH: usize = 3;
pub const SEARCH_LIMIT: u64 = 10;
const DASHBOARD_LIMIT: u64 = 5;

/// Checks an email/password pair. Unknown emails and wrong passwords are indistinguishable.
pub async fn authenticate(
    db: &impl ConnectionTrait,
    email: &str,
    password: &str,
) -> Result<Option<user::Model>, GenericError> {
    let Some(user) = User::find()
        .filter(user::Column::Email.eq(email.trim().to_lowercase()))
        .one(db)
        .await?
    else {
        return Ok(None);
    };
    let Some(auth) = user.find_related(UserAuthentication).one(db).await? else {
        return Ok(None);
    };
    Ok(matches!(verify(password, &auth.hashed_password), Ok(true)).then_some(user))
}

pub async fn user_from_cookie(
    db: &impl ConnectionTrait,
    cookie: &str,
) -> Result<Option<user::Model>, GenericError> {
    Ok(UserCookies::find_by_id(cookie.to_string())
        .find_also_related(User)
        .one(db)
        .await
        .map_err(|_| GenericError::UnknownError("db error while finding cookie"))?
        .and_then(|(_, user)| user))
}

pub async fn email_taken(db: &impl ConnectionTrait, email: &str) -> Result<bool, GenericError> {
    Ok(User::find()
        .filter(user::Column::Email.eq(email))
        .count(db)
        .await?
        > 0)
}

const LIKE_ESCAPE: char = '\\';

/// `LIKE` pattern matching `needle` anywhere, with its wildcards taken literally.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring search over name and email. Queries shorter than
/// [`MIN_SEARCH_LENGTH`] return nothing without touching the database.
pub async fn search_users(
    db: &impl ConnectionTrait,
    caller_id: i32,
    query: &str,
) -> Result<Vec<UserSummary>, GenericError> {
    let query = query.trim();
    if query.chars().count() < MIN_SEARCH_LENGTH {
        return Ok(Vec::new());
    }
    let pattern = contains_pattern(&query.to_lowercase());
    let contains = |column: user::Column| {
        Expr::expr(Func::lower(Expr::col(column)))
            .like(LikeExpr::new(pattern.as_str()).escape(LIKE_ESCAPE))
    };
    let users = User::find()
        .filter(
            Condition::any()
                .add(contains(user::Column::Name))
                .add(contains(user::Column::Email)),
        )
        .filter(user::Column::Id.ne(caller_id))
        .order_by_asc(user::Column::Name)
        .limit(SEARCH_LIMIT)
        .all(db)
        .await?;
    Ok(users.into_iter().map(UserSummary::from).collect())
}

pub(crate) async fn membership(
    db: &impl ConnectionTrait,
    team_id: i32,
    user_id: i32,
) -> Result<Option<team_member::Model>, GenericError> {
    Ok(TeamMember::find()
        .filter(team_member::Column::TeamId.eq(team_id))
        .filter(team_member::Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

pub(crate) async fn find_team(
    db: &impl ConnectionTrait,
    team_id: i32,
) -> Result<team::Model, GenericError> {
    Team::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or(TeamError::NotFound.into())
}

/// The team, provided `user_id` is its captain.
pub(crate) async fn require_captain(
    db: &impl ConnectionTrait,
    team_id: i32,
    user_id: i32,
) -> Result<team::Model, GenericError> {
    let team = find_team(db, team_id).await?;
    match membership(db, team_id, user_id).await? {
        Some(member) if member.role == DbTeamRole::Captain => Ok(team),
        _ => Err(TeamError::NotCaptain.into()),
    }
}

pub(crate) async fn team_name_or_tag_taken(
    db: &impl ConnectionTrait,
    name_key: String,
    tag_key: String,
    exclude: Option<i32>,
) -> Result<bool, GenericError> {
    let mut query = Team::find().filter(
        Condition::any()
            .add(team::Column::NameKey.eq(name_key))
            .add(team::Column::TagKey.eq(tag_key)),
    );
    if let Some(id) = exclude {
        query = query.filter(team::Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

async fn members_by_team(
    db: &impl ConnectionTrait,
    team_ids: Vec<i32>,
) -> Result<HashMap<i32, Vec<TeamMemberView>>, GenericError> {
    if team_ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(TeamMember::find()
        .filter(team_member::Column::TeamId.is_in(team_ids))
        .order_by_asc(team_member::Column::Id)
        .find_also_related(User)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|(member, user)| {
            user.map(|user| (member.team_id, TeamMemberView::new(user, member.role)))
        })
        .into_group_map())
}

async fn team_views(
    db: &impl ConnectionTrait,
    teams: Vec<team::Model>,
    viewer_id: i32,
) -> Result<Vec<TeamView>, GenericError> {
    let mut members = members_by_team(db, teams.iter().map(|t| t.id).collect()).await?;
    Ok(teams
        .into_iter()
        .map(|team| {
            let team_members = members.remove(&team.id).unwrap_or_default();
            TeamView::new(team, team_members, viewer_id, None)
        })
        .collect())
}

/// Teams the user is a member of.
pub async fn get_user_teams(
    db: &impl ConnectionTrait,
    user_id: i32,
) -> Result<Vec<TeamView>, GenericError> {
    let teams = Team::find()
        .inner_join(TeamMember)
        .filter(team_member::Column::UserId.eq(user_id))
        .order_by_asc(team::Column::CreatedAt)
        .order_by_asc(team::Column::Id)
        .all(db)
        .await?;
    team_views(db, teams, user_id).await
}

pub async fn get_all_teams(
    db: &impl ConnectionTrait,
    viewer_id: i32,
) -> Result<Vec<TeamView>, GenericError> {
    let teams = Team::find()
        .order_by_asc(team::Column::Name)
        .all(db)
        .await?;
    team_views(db, teams, viewer_id).await
}

/// Full view of a team for one of its members, pending invites included.
pub async fn get_team_details(
    db: &impl ConnectionTrait,
    team_id: i32,
    viewer_id: i32,
) -> Result<TeamView, GenericError> {
    let team = find_team(db, team_id).await?;
    if membership(db, team_id, viewer_id).await?.is_none() {
        return Err(TeamError::NotMember.into());
    }
    let members = members_by_team(db, vec![team.id])
        .await?
        .remove(&team.id)
        .unwrap_or_default();
    let invites = team
        .find_related(TeamInvite)
        .filter(team_invite::Column::Status.eq(InviteStatus::Pending))
        .order_by_asc(team_invite::Column::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(PendingInvite::from)
        .collect();
    Ok(TeamView::new(team, members, viewer_id, Some(invites)))
}

pub async fn get_pending_invites(
    db: &impl ConnectionTrait,
    user_id: i32,
) -> Result<Vec<InviteView>, GenericError> {
    Ok(TeamInvite::find()
        .filter(team_invite::Column::UserId.eq(user_id))
        .filter(team_invite::Column::Status.eq(InviteStatus::Pending))
        .order_by_desc(team_invite::Column::CreatedAt)
        .find_also_related(Team)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|(invite, team)| team.map(|team| InviteView::new(invite, team)))
        .collect())
}

pub(crate) async fn find_tournament(
    db: &impl ConnectionTrait,
    tournament_id: i32,
) -> Result<tournament::Model, GenericError> {
    Tournament::find_by_id(tournament_id)
        .one(db)
        .await?
        .ok_or(TournamentError::NotFound.into())
}

pub(crate) async fn participant_count(
    db: &impl ConnectionTrait,
    tournament_id: i32,
) -> Result<u64, GenericError> {
    Ok(TournamentRegistration::find()
        .filter(tournament_registration::Column::TournamentId.eq(tournament_id))
        .count(db)
        .await?)
}

/// Every tournament, latest start first.
pub async fn get_tournaments(db: &impl ConnectionTrait) -> Result<Vec<TournamentView>, GenericError> {
    let tournaments = Tournament::find()
        .order_by_desc(tournament::Column::StartDate)
        .all(db)
        .await?;
    let counts = TournamentRegistration::find()
        .select_only()
        .column(tournament_registration::Column::TournamentId)
        .into_tuple::<i32>()
        .all(db)
        .await?
        .into_iter()
        .counts();
    Ok(tournaments
        .into_iter()
        .map(|t| {
            let participants = counts.get(&t.id).copied().unwrap_or_default() as u64;
            TournamentView::new(t, participants)
        })
        .collect())
}

pub async fn get_tournament(
    db: &impl ConnectionTrait,
    tournament_id: i32,
) -> Result<TournamentView, GenericError> {
    let tournament = find_tournament(db, tournament_id).await?;
    let participants = participant_count(db, tournament_id).await?;
    Ok(TournamentView::new(tournament, participants))
}

async fn teams_by_id(
    db: &impl ConnectionTrait,
    ids: HashSet<i32>,
) -> Result<HashMap<i32, team::Model>, GenericError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(Team::find()
        .filter(team::Column::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|team| (team.id, team))
        .collect())
}

/// The generated schedule, ordered by round.
pub async fn get_matches(
    db: &impl ConnectionTrait,
    tournament_id: i32,
) -> Result<Vec<MatchView>, GenericError> {
    let tournament = find_tournament(db, tournament_id).await?;
    let games = tournament
        .find_related(TournamentMatch)
        .order_by_asc(tournament_match::Column::Round)
        .order_by_asc(tournament_match::Column::Id)
        .all(db)
        .await?;
    let teams = teams_by_id(
        db,
        games
            .iter()
            .flat_map(|g| std::iter::once(g.team_a_id).chain(g.team_b_id))
            .collect(),
    )
    .await?;

    Ok(games
        .iter()
        .filter_map(|game| {
            let team_a = teams.get(&game.team_a_id).map(TeamRef::from)?;
            let team_b = game
                .team_b_id
                .and_then(|id| teams.get(&id))
                .map(TeamRef::from);
            Some(MatchView::new(game, team_a, team_b))
        })
        .collect())
}

/// Newest first.
pub async fn get_contacts(db: &impl ConnectionTrait) -> Result<Vec<ContactView>, GenericError> {
    Ok(Contact::find()
        .order_by_desc(contact::Column::CreatedAt)
        .order_by_desc(contact::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(ContactView::from)
        .collect())
}

/// Statistics for the user's own dashboard. A user without teams gets an empty dashboard after a
/// single membership lookup.
pub async fn dashboard_stats(
    db: &impl ConnectionTrait,
    user_id: i32,
) -> Result<DashboardStats, GenericError> {
    let team_ids: HashSet<i32> = TeamMember::find()
        .filter(team_member::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|m| m.team_id)
        .collect();
    if team_ids.is_empty() {
        debug!("User {user_id} has no teams, returning an empty dashboard");
        return Ok(DashboardStats::default());
    }

    let tournament_ids: HashSet<i32> = TournamentRegistration::find()
        .filter(tournament_registration::Column::TeamId.is_in(team_ids.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|r| r.tournament_id)
        .collect();

    let recent_tournaments = if tournament_ids.is_empty() {
        Vec::new()
    } else {
        Tournament::find()
            .filter(tournament::Column::Id.is_in(tournament_ids.iter().copied()))
            .order_by_desc(tournament::Column::StartDate)
            .limit(DASHBOARD_LIMIT)
            .all(db)
            .await?
            .into_iter()
            .map(RecentTournament::from)
            .collect()
    };

    let games = TournamentMatch::find()
        .filter(
            Condition::any()
                .add(tournament_match::Column::TeamAId.is_in(team_ids.iter().copied()))
                .add(tournament_match::Column::TeamBId.is_in(team_ids.iter().copied())),
        )
        .filter(tournament_match::Column::ScheduledAt.gt(crate::now()))
        .order_by_asc(tournament_match::Column::ScheduledAt)
        .limit(DASHBOARD_LIMIT)
        .find_also_related(Tournament)
        .all(db)
        .await?;

    let opponent_id = |game: &tournament_match::Model| {
        if team_ids.contains(&game.team_a_id) {
            game.team_b_id
        } else {
            Some(game.team_a_id)
        }
    };
    let opponents = teams_by_id(db, games.iter().filter_map(|(g, _)| opponent_id(g)).collect()).await?;
    let upcoming_matches = games
        .iter()
        .map(|(game, tournament)| {
            UpcomingMatch::new(
                game.id,
                tournament.as_ref().map(|t| t.name.clone()).unwrap_or_default(),
                opponent_id(game).and_then(|id| opponents.get(&id).map(|t| t.name.clone())),
                game.scheduled_at,
            )
        })
        .collect();

    Ok(DashboardStats {
        total_tournaments: tournament_ids.len() as u64,
        total_teams: team_ids.len() as u64,
        upcoming_matches,
        recent_tournaments,
    })
}

pub async fn admin_dashboard_stats(
    db: &impl ConnectionTrait,
) -> Result<AdminDashboardStats, GenericError> {
    let ongoing = || Tournament::find().filter(tournament::Column::Status.eq(DbStatus::Ongoing));
    Ok(AdminDashboardStats {
        total_users: User::find().count(db).await?,
        active_tournaments: ongoing().count(db).await?,
        total_teams: Team::find().count(db).await?,
        recent_users: User::find()
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id)
            .limit(DASHBOARD_LIMIT)
            .all(db)
            .await?
            .into_iter()
            .map(AdminUserRow::from)
            .collect(),
        ongoing_tournaments: ongoing()
            .order_by_asc(tournament::Column::StartDate)
            .limit(DASHBOARD_LIMIT)
            .all(db)
            .await?
            .into_iter()
            .map(TournamentRow::from)
            .collect(),
    })
}
