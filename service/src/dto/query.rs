use sea_orm::prelude::DateTimeWithTimeZone;

use entity::{contact, team, team_invite, tournament, tournament_match, user};

use super::*;

impl From<user::Model> for UserSummary {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<user::Model> for CurrentUser {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            admin: user.admin,
        }
    }
}

impl From<user::Model> for AdminUserRow {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            admin: user.admin,
            created_at: user.created_at,
        }
    }
}

impl TeamMemberView {
    pub(crate) fn new(user: user::Model, role: sea_orm_active_enums::TeamRole) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: role.into(),
        }
    }
}

impl From<team_invite::Model> for PendingInvite {
    fn from(invite: team_invite::Model) -> Self {
        Self {
            id: invite.id,
            email: invite.email,
            status: invite.status.into(),
            created_at: invite.created_at,
        }
    }
}

impl TeamView {
    pub(crate) fn new(
        team: team::Model,
        members: Vec<TeamMemberView>,
        viewer_id: i32,
        pending_invites: Option<Vec<PendingInvite>>,
    ) -> Self {
        Self {
            is_owner: team.captain_id == viewer_id,
            id: team.id,
            name: team.name,
            tag: team.tag,
            description: team.description,
            logo_url: team.logo_url,
            captain_id: team.captain_id,
            created_at: team.created_at,
            updated_at: team.updated_at,
            members,
            pending_invites,
        }
    }
}

impl InviteView {
    pub(crate) fn new(invite: team_invite::Model, team: team::Model) -> Self {
        Self {
            id: invite.id,
            team_id: team.id,
            team_name: team.name,
            team_tag: team.tag,
            status: invite.status.into(),
            created_at: invite.created_at,
        }
    }
}

impl From<&team::Model> for TeamRef {
    fn from(team: &team::Model) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            tag: team.tag.clone(),
        }
    }
}

impl TournamentView {
    pub(crate) fn new(tournament: tournament::Model, participants: u64) -> Self {
        Self {
            id: tournament.id,
            name: tournament.name,
            tournament_type: tournament.tournament_type.into(),
            start_date: tournament.start_date,
            end_date: tournament.end_date,
            registration_deadline: tournament.registration_deadline,
            max_participants: tournament.max_participants,
            description: tournament.description,
            rules: tournament.rules,
            prizes: tournament.prizes,
            status: tournament.status.into(),
            participants,
        }
    }
}

impl From<tournament::Model> for TournamentRow {
    fn from(tournament: tournament::Model) -> Self {
        Self {
            id: tournament.id,
            name: tournament.name,
            tournament_type: tournament.tournament_type.into(),
            status: tournament.status.into(),
        }
    }
}

impl From<tournament::Model> for RecentTournament {
    fn from(tournament: tournament::Model) -> Self {
        Self {
            id: tournament.id,
            name: tournament.name,
            start_date: tournament.start_date,
            status: tournament.status.into(),
        }
    }
}

impl MatchView {
    pub(crate) fn new(
        game: &tournament_match::Model,
        team_a: TeamRef,
        team_b: Option<TeamRef>,
    ) -> Self {
        Self {
            id: game.id,
            round: game.round,
            team_a,
            team_b,
            scheduled_at: game.scheduled_at,
        }
    }
}

impl UpcomingMatch {
    pub(crate) fn new(
        id: i32,
        tournament_name: String,
        opponent: Option<String>,
        date: DateTimeWithTimeZone,
    ) -> Self {
        Self {
            id,
            tournament_name,
            opponent: opponent.unwrap_or_else(|| "BYE".to_string()),
            date,
        }
    }
}

impl From<contact::Model> for ContactView {
    fn from(contact: contact::Model) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            email: contact.email,
            subject: contact.subject,
            message: contact.message,
            status: contact.status.into(),
            created_at: contact.created_at,
        }
    }
}
