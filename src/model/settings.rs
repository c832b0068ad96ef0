//! Administrative `settings` command models.
//!
//! The command accepts up to three optional arguments but applies exactly one
//! effect per invocation. `SettingsOptions` holds the raw arguments pulled out of
//! the interaction; `SettingsCommand` is the single effect chosen from them.

use serenity::all::{User, UserId};
use std::{collections::HashSet, time::Duration};

/// Command name registered with Discord.
pub const SETTINGS_COMMAND_NAME: &str = "settings";

/// Option name for the poll interval in milliseconds.
pub const OPTION_INTERVAL: &str = "interval";

/// Option name for adding a member to the exclusion list.
pub const OPTION_USER_ADD: &str = "user-add";

/// Option name for removing a member from the exclusion list.
pub const OPTION_USER_REMOVE: &str = "user-remove";

/// A member referenced by a command argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandUser {
    pub id: UserId,
    pub username: String,
}

impl From<&User> for CommandUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.name.clone(),
        }
    }
}

/// Runtime-adjustable bot settings.
///
/// Starts from the configured poll interval and an empty exclusion list; only the
/// `settings` command changes it afterwards. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct BotSettings {
    /// Period of the poll timer
    pub poll_interval: Duration,
    /// Members skipped entirely during polling
    pub excluded: HashSet<UserId>,
}

impl BotSettings {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            excluded: HashSet::new(),
        }
    }
}

/// Raw arguments of one `settings` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOptions {
    pub interval: Option<i64>,
    pub user_add: Option<CommandUser>,
    pub user_remove: Option<CommandUser>,
}

/// The one effect a `settings` invocation applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommand {
    /// Change the poll interval to this many milliseconds.
    SetInterval(u64),
    /// Start skipping this member during polling.
    ExcludeUser(CommandUser),
    /// Stop skipping this member during polling.
    IncludeUser(CommandUser),
    /// No usable argument was given.
    Invalid,
}

impl From<SettingsOptions> for SettingsCommand {
    /// Picks the effect in priority order: a positive interval, then `user-add`,
    /// then `user-remove`. A non-positive interval is ignored rather than rejected
    /// so a user argument given alongside it still applies.
    fn from(options: SettingsOptions) -> Self {
        if let Some(interval) = options.interval.filter(|ms| *ms > 0) {
            return Self::SetInterval(interval as u64);
        }

        if let Some(user) = options.user_add {
            return Self::ExcludeUser(user);
        }

        if let Some(user) = options.user_remove {
            return Self::IncludeUser(user);
        }

        Self::Invalid
    }
}
