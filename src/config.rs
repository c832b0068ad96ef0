use dioxus_logger::tracing;
use std::time::Duration;

use crate::error::{config::ConfigError, AppError};

/// Poll interval used when `POLL_INTERVAL_MS` is not set or unusable.
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

pub struct Config {
    pub discord_token: String,

    /// `None` when `GUILD_ID` is missing or malformed; polls then log and skip.
    pub guild_id: Option<u64>,
    /// `None` when `CHANNEL_ID` is missing or malformed; polls then log and skip.
    pub channel_id: Option<u64>,

    pub poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// `from_env` passes the process environment; tests pass a fixed map. Only the
    /// bot token is required. A bad guild or channel ID is logged and left unset so
    /// the bot still connects and every poll cycle reports the lookup failure. A bad
    /// poll interval is logged and replaced with the default.
    ///
    /// # Returns
    /// - `Ok(Config)` - Token present
    /// - `Err(AppError::ConfigErr)` - `DISCORD_TOKEN` is missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?;

        let poll_interval_ms = match lookup("POLL_INTERVAL_MS").map(|v| parse_interval(&v)) {
            Some(Ok(ms)) => ms,
            Some(Err(e)) => {
                tracing::warn!("{}, using {}ms", e, DEFAULT_POLL_INTERVAL_MS);
                DEFAULT_POLL_INTERVAL_MS
            }
            None => DEFAULT_POLL_INTERVAL_MS,
        };

        Ok(Self {
            discord_token,
            guild_id: optional_snowflake(&lookup, "GUILD_ID"),
            channel_id: optional_snowflake(&lookup, "CHANNEL_ID"),
            poll_interval: Duration::from_millis(poll_interval_ms),
        })
    }
}

/// Reads a snowflake ID, logging instead of failing when it is unusable.
fn optional_snowflake<F>(lookup: &F, name: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let result = lookup(name)
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        .and_then(|value| parse_snowflake(name, value));

    match result {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::error!("{}", e);
            None
        }
    }
}

fn parse_snowflake(name: &str, value: String) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
            reason: "snowflake IDs cannot be zero".to_string(),
        }),
        Ok(id) => Ok(id),
        Err(e) => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
            reason: e.to_string(),
        }),
    }
}

fn parse_interval(value: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        name: "POLL_INTERVAL_MS".to_string(),
        value: value.to_string(),
        reason,
    };

    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid("interval must be greater than zero".to_string())),
        Ok(ms) => Ok(ms),
        Err(e) => Err(invalid(e.to_string())),
    }
}
