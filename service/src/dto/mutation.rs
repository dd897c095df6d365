use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::ActiveValue::Set;
use sea_orm::NotSet;

use entity::sea_orm_active_enums::{ContactStatus as DbContactStatus, TournamentStatus as DbStatus};
use entity::{contact, team, tournament, user};

use super::forms::{CheckedContact, CheckedTeam, CheckedTournament, CheckedUser};

impl CheckedUser {
    pub(crate) fn into_active_model(self, admin: bool, now: DateTimeWithTimeZone) -> user::ActiveModel {
        user::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            email: Set(self.email),
            admin: Set(admin),
            created_at: Set(now),
        }
    }
}

impl CheckedTeam {
    pub(crate) fn into_active_model(self, captain_id: i32, now: DateTimeWithTimeZone) -> team::ActiveModel {
        team::ActiveModel {
            id: NotSet,
            name_key: Set(self.name_key()),
            tag_key: Set(self.tag_key()),
            name: Set(self.name),
            tag: Set(self.tag),
            description: Set(self.description),
            logo_url: Set(self.logo_url),
            captain_id: Set(captain_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    pub(crate) fn apply(self, team: &mut team::ActiveModel, now: DateTimeWithTimeZone) {
        team.name_key = Set(self.name_key());
        team.tag_key = Set(self.tag_key());
        team.name = Set(self.name);
        team.tag = Set(self.tag);
        team.description = Set(self.description);
        team.logo_url = Set(self.logo_url);
        team.updated_at = Set(now);
    }
}

impl CheckedTournament {
    /// New tournaments always open as upcoming.
    pub(crate) fn into_active_model(self, now: DateTimeWithTimeZone) -> tournament::ActiveModel {
        tournament::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            tournament_type: Set(self.tournament_type.into()),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
            registration_deadline: Set(self.registration_deadline),
            max_participants: Set(self.max_participants),
            description: Set(self.description),
            rules: Set(self.rules),
            prizes: Set(self.prizes),
            status: Set(DbStatus::Upcoming),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    /// Full update. The status is only touched when one was sent.
    pub(crate) fn apply(self, tournament: &mut tournament::ActiveModel, now: DateTimeWithTimeZone) {
        tournament.name = Set(self.name);
        tournament.tournament_type = Set(self.tournament_type.into());
        tournament.start_date = Set(self.start_date);
        tournament.end_date = Set(self.end_date);
        tournament.registration_deadline = Set(self.registration_deadline);
        tournament.max_participants = Set(self.max_participants);
        tournament.description = Set(self.description);
        tournament.rules = Set(self.rules);
        tournament.prizes = Set(self.prizes);
        if let Some(status) = self.status {
            tournament.status = Set(status.into());
        }
        tournament.updated_at = Set(now);
    }
}

impl CheckedContact {
    pub(crate) fn into_active_model(self, now: DateTimeWithTimeZone) -> contact::ActiveModel {
        contact::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            email: Set(self.email),
            subject: Set(self.subject),
            message: Set(self.message),
            status: Set(DbContactStatus::New),
            created_at: Set(now),
        }
    }
}
