//! Process configuration loaded from the environment
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation, env-derived immutable config

use anyhow::{anyhow, Context, Result};
use std::time::Duration;

/// Immutable bot configuration, built once at process start and passed by
/// reference to the components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token
    pub discord_token: String,
    /// Users allowed to issue commands
    pub allowed_user_ids: Vec<u64>,
    /// User the scheduler sends notes to (defaults to the first allowed user)
    pub owner_user_id: u64,
    /// Path to the sqlite database file
    pub database_path: String,
    /// Prefix for text commands, e.g. "!"
    pub command_prefix: String,
    /// Interval between scheduled reminders; None disables the scheduler
    pub remind_interval: Option<Duration>,
    /// Default log filter for env_logger
    pub log_level: String,
}

impl Config {
    /// Build configuration from environment variables.
    ///
    /// Required: `DISCORD_TOKEN`, `ALLOWED_USER_IDS` (comma-separated Discord
    /// user ids). Optional: `OWNER_USER_ID`, `DATABASE_PATH`, `COMMAND_PREFIX`,
    /// `REMIND_INTERVAL_HOURS` (0 disables the scheduler), `LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        let discord_token =
            std::env::var("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;

        let allowed_user_ids = parse_user_ids(
            &std::env::var("ALLOWED_USER_IDS").context("ALLOWED_USER_IDS is not set")?,
        )?;

        let owner_user_id = match std::env::var("OWNER_USER_ID") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid OWNER_USER_ID '{raw}'"))?,
            Err(_) => allowed_user_ids[0],
        };

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "renote.db".to_string());

        let command_prefix =
            std::env::var("COMMAND_PREFIX").unwrap_or_else(|_| "!".to_string());

        let remind_interval = match std::env::var("REMIND_INTERVAL_HOURS") {
            Ok(raw) => parse_interval_hours(&raw)?,
            Err(_) => Some(Duration::from_secs(24 * 3600)),
        };

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            discord_token,
            allowed_user_ids,
            owner_user_id,
            database_path,
            command_prefix,
            remind_interval,
            log_level,
        })
    }

    /// Allow-list guard invoked before command dispatch.
    pub fn is_allowed_user(&self, user_id: u64) -> bool {
        self.allowed_user_ids.contains(&user_id)
    }
}

/// Parse a comma-separated list of Discord user ids. At least one is required.
fn parse_user_ids(raw: &str) -> Result<Vec<u64>> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>()
                .map_err(|_| anyhow!("invalid user id '{part}' in ALLOWED_USER_IDS"))
        })
        .collect::<Result<Vec<u64>>>()?;

    if ids.is_empty() {
        return Err(anyhow!("ALLOWED_USER_IDS must list at least one user id"));
    }
    Ok(ids)
}

/// Parse `REMIND_INTERVAL_HOURS`; 0 turns the scheduler off.
fn parse_interval_hours(raw: &str) -> Result<Option<Duration>> {
    let hours = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("invalid REMIND_INTERVAL_HOURS '{raw}'"))?;
    Ok((hours > 0).then(|| Duration::from_secs(hours * 3600)))
}
