use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

const DEFAULT_UPLOAD_DIR: &str = "uploads";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub upload_dir: PathBuf,
    /// Lower-cased addresses that are granted admin rights.
    pub admin_emails: Vec<String>,
}

impl AppConfig {
    /// Reads `.env` and the process environment. `DATABASE_URL` is required, `UPLOAD_DIR` and the
    /// comma-separated `ADMIN_EMAILS` are optional.
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv().ok();
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            admin_emails: env::var("ADMIN_EMAILS")
                .map(|raw| parse_admin_emails(&raw))
                .unwrap_or_default(),
        })
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email))
    }
}

fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .collect()
}
