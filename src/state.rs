//! Bot state shared between the poll timer and the command handler.
//!
//! `AppState` is built once at startup, handed to the Serenity event handler, and
//! cloned into every poll task. Every field is reference-counted, so clones share
//! the same settings, snapshot, and timer.
//!
//! Lock order is always `settings` before `tracker`, and `settings` before the
//! scheduler's job lock. Neither `settings` nor `tracker` is held across a Discord
//! API call.

use std::sync::{atomic::AtomicBool, Arc};
use tokio::sync::RwLock;

use crate::{
    config::Config, model::settings::BotSettings, scheduler::presence_poll::PollScheduler,
    service::tracker::ListeningTracker,
};

#[derive(Clone)]
pub struct AppState {
    /// Startup configuration.
    pub config: Arc<Config>,

    /// Poll interval and exclusion list, changed by the `settings` command.
    pub settings: Arc<RwLock<BotSettings>>,

    /// Last-seen song and artist per member.
    pub tracker: Arc<RwLock<ListeningTracker>>,

    /// Repeating poll timer.
    pub scheduler: Arc<PollScheduler>,

    /// Set while a poll cycle is running; a tick that finds it set is skipped.
    pub poll_in_flight: Arc<AtomicBool>,
}

impl AppState {
    /// Creates the shared state with an empty snapshot and exclusion list.
    ///
    /// # Arguments
    /// - `config` - Loaded configuration; its poll interval seeds the settings
    /// - `scheduler` - Poll scheduler with no timer armed yet
    pub fn new(config: Config, scheduler: PollScheduler) -> Self {
        let settings = BotSettings::new(config.poll_interval);

        Self {
            config: Arc::new(config),
            settings: Arc::new(RwLock::new(settings)),
            tracker: Arc::new(RwLock::new(ListeningTracker::new())),
            scheduler: Arc::new(scheduler),
            poll_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }
}
