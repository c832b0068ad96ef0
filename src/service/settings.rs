//! `settings` command effects.

use dioxus_logger::tracing;
use std::time::Duration;

use crate::{
    model::settings::SettingsCommand, scheduler::presence_poll::PollTask, state::AppState,
};

/// Reply sent when no usable argument was given.
pub const INVALID_REPLY: &str = "Invalid command or value.";

/// Applies `settings` commands to the shared bot state.
pub struct SettingsService<'a> {
    state: &'a AppState,
    /// Poll task to arm when the interval changes
    poll_task: PollTask,
}

impl<'a> SettingsService<'a> {
    pub fn new(state: &'a AppState, poll_task: PollTask) -> Self {
        Self { state, poll_task }
    }

    /// Applies a single command and returns the reply text.
    ///
    /// - `SetInterval`: re-arms the poll timer with the new period, stores the
    ///   interval, and starts one poll right away. The settings lock is held across
    ///   re-arming and storing, so concurrent changes leave the timer and the stored
    ///   interval agreeing on the last one applied. The immediate poll is skipped
    ///   like any other tick if a cycle is still in flight; the timer is armed
    ///   regardless
    /// - `ExcludeUser`: adds the member to the exclusion list and drops any stored
    ///   listening state for them
    /// - `IncludeUser`: removes the member from the exclusion list
    /// - `Invalid`: changes nothing
    ///
    /// # Arguments
    /// - `command` - The effect chosen from the interaction options
    ///
    /// # Returns
    /// - `String` - Reply to send to the invoking user
    pub async fn apply(&self, command: SettingsCommand) -> String {
        match command {
            SettingsCommand::SetInterval(ms) => {
                let period = Duration::from_millis(ms);

                {
                    let mut settings = self.state.settings.write().await;
                    self.state
                        .scheduler
                        .schedule(period, self.poll_task.clone())
                        .await;
                    settings.poll_interval = period;
                }

                tokio::spawn((self.poll_task)());

                tracing::info!("Poll interval changed to {}ms", ms);

                format!("Check interval set to {} milliseconds.", ms)
            }
            SettingsCommand::ExcludeUser(user) => {
                let mut settings = self.state.settings.write().await;
                settings.excluded.insert(user.id);

                if self.state.tracker.write().await.forget(user.id).is_some() {
                    tracing::debug!("Dropped stored listening state for {}", user.id);
                }

                tracing::info!("Excluded {} ({}) from polling", user.username, user.id);

                format!("User {} was added to the exclusion list.", user.username)
            }
            SettingsCommand::IncludeUser(user) => {
                self.state.settings.write().await.excluded.remove(&user.id);

                tracing::info!("Removed {} ({}) from exclusions", user.username, user.id);

                format!(
                    "User {} was removed from the exclusion list.",
                    user.username
                )
            }
            SettingsCommand::Invalid => INVALID_REPLY.to_string(),
        }
    }
}
