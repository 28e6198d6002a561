use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::filter::DEFAULT_FILTERED_SKILL_GROUP;
use crate::session::registry::DEFAULT_SESSION_TTL;

/// Profile served when `GET /` names none.
pub const DEFAULT_PROFILE: &str = "Lname Fname";

/// Application configuration loaded from environment variables.
/// Fails at startup if a value is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON profile book used when no database is configured.
    pub data_path: PathBuf,
    pub database_url: Option<String>,
    pub default_profile: String,
    /// Skill group whose items follow the category filter.
    pub filtered_skill_group: String,
    /// Idle time after which a builder session is dropped.
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Config {
            port: or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or("RUST_LOG", "info"),
            data_path: PathBuf::from(or("CV_DATA_PATH", "data/resume.json")),
            database_url: lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            default_profile: or("DEFAULT_PROFILE", DEFAULT_PROFILE),
            filtered_skill_group: or("FILTERED_SKILL_GROUP", DEFAULT_FILTERED_SKILL_GROUP),
            session_ttl: Duration::from_secs(
                or("SESSION_TTL_SECS", &DEFAULT_SESSION_TTL.as_secs().to_string())
                    .parse::<u64>()
                    .context("SESSION_TTL_SECS must be a whole number of seconds")?,
            ),
        })
    }
}
