//! Error types for the bot.
//!
//! `AppError` is the top-level error type returned by configuration loading, the
//! poll cycle, and command handling. Nothing past startup is
//! fatal: callers log the error with `tracing::error!` and carry on.

pub mod config;
pub mod poll;

use thiserror::Error;

use crate::error::{config::ConfigError, poll::PollError};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic error conversion so `?` can be used
/// throughout the services.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Guild or channel lookup failed during a poll cycle.
    #[error(transparent)]
    PollErr(#[from] PollError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Unexpected internal failure with a message for the logs.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
