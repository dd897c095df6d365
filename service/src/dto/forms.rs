use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;

use super::*;
use crate::error::GenericError;

pub(crate) const MIN_PASSWORD_LENGTH: usize = 8;

/// Formats produced by `<input type="datetime-local">` and friends. They carry no offset and are
/// read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-only input means midnight UTC.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a free-text timestamp: RFC 3339 first, then the naive formats above, then whatever
/// `dateparser` understands. Inputs without a time of day resolve to midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
        .or_else(|| dateparser::parse_with(raw, &Utc, NaiveTime::MIN).ok())
}

pub(crate) fn required(value: &str, field: &str) -> Result<String, GenericError> {
    let value = value.trim();
    if value.is_empty() {
        Err(GenericError::Validation(format!("{field} is required")))
    } else {
        Ok(value.to_string())
    }
}

/// Blank optional strings are stored as null.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn email(value: &str) -> Result<String, GenericError> {
    let value = required(value, "Email")?;
    if value.contains('@') {
        Ok(value)
    } else {
        Err(GenericError::Validation("Email is invalid".to_string()))
    }
}

fn timestamp(raw: &str, field: &str) -> Result<DateTimeWithTimeZone, GenericError> {
    parse_timestamp(raw)
        .map(DateTimeWithTimeZone::from)
        .ok_or_else(|| GenericError::Validation(format!("{field} is not a valid date")))
}

pub(crate) struct CheckedUser {
    pub name: String,
    pub email: String,
}

impl RegisterUser {
    pub(crate) fn validate(&self) -> Result<CheckedUser, GenericError> {
        let name = required(&self.name, "Name")?;
        let email = email(&self.email)?.to_lowercase();
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(GenericError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        Ok(CheckedUser { name, email })
    }
}

pub(crate) struct CheckedTeam {
    pub name: String,
    pub tag: String,
    pub description: String,
    pub logo_url: Option<String>,
}

impl CheckedTeam {
    fn new(
        name: &str,
        tag: &str,
        description: &str,
        logo_url: Option<&str>,
    ) -> Result<Self, GenericError> {
        Ok(Self {
            name: required(name, "Name")?,
            tag: required(tag, "Tag")?,
            description: required(description, "Description")?,
            logo_url: optional(logo_url),
        })
    }

    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn tag_key(&self) -> String {
        self.tag.to_lowercase()
    }
}

impl CreateTeam {
    pub(crate) fn validate(&self) -> Result<CheckedTeam, GenericError> {
        CheckedTeam::new(
            &self.name,
            &self.tag,
            &self.description,
            self.logo_url.as_deref(),
        )
    }
}

impl UpdateTeam {
    pub(crate) fn validate(&self) -> Result<CheckedTeam, GenericError> {
        CheckedTeam::new(
            &self.name,
            &self.tag,
            &self.description,
            self.logo_url.as_deref(),
        )
    }
}

pub(crate) struct CheckedTournament {
    pub name: String,
    pub tournament_type: TournamentType,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub registration_deadline: DateTimeWithTimeZone,
    pub max_participants: i32,
    pub description: String,
    pub rules: String,
    pub prizes: String,
    pub status: Option<TournamentStatus>,
}

impl TournamentForm {
    pub(crate) fn validate(&self) -> Result<CheckedTournament, GenericError> {
        let name = required(&self.name, "Name")?;
        let description = required(&self.description, "Description")?;
        let rules = required(&self.rules, "Rules")?;
        if self.max_participants < 2 {
            return Err(GenericError::Validation(
                "Max participants must be at least 2".to_string(),
            ));
        }
        let start_date = timestamp(&self.start_date, "Start date")?;
        let end_date = timestamp(&self.end_date, "End date")?;
        let registration_deadline =
            timestamp(&self.registration_deadline, "Registration deadline")?;
        if start_date >= end_date {
            return Err(GenericError::Validation(
                "End date must be after the start date".to_string(),
            ));
        }
        if registration_deadline > start_date {
            return Err(GenericError::Validation(
                "Registration deadline must not be after the start date".to_string(),
            ));
        }
        Ok(CheckedTournament {
            name,
            tournament_type: self.tournament_type,
            start_date,
            end_date,
            registration_deadline,
            max_participants: self.max_participants,
            description,
            rules,
            prizes: self.prizes.as_deref().unwrap_or_default().trim().to_string(),
            status: self.status,
        })
    }
}

pub(crate) struct CheckedContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub(crate) fn validate(&self) -> Result<CheckedContact, GenericError> {
        Ok(CheckedContact {
            name: required(&self.name, "Name")?,
            email: email(&self.email)?,
            subject: required(&self.subject, "Subject")?,
            message: required(&self.message, "Message")?,
        })
    }
}
