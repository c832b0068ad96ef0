use dioxus_logger::tracing;
use serenity::{cache::Cache, http::Http};
use std::sync::Arc;

use crate::{scheduler::presence_poll::poll_task, state::AppState};

/// Runs one poll cycle immediately, then arms the repeating poll timer.
///
/// The timer period is the interval currently held in the settings. The settings
/// lock is held while arming so a concurrent `settings interval` change cannot
/// leave the timer running at a different period than the stored one.
///
/// # Arguments
/// - `state` - Shared bot state
/// - `cache` - Serenity cache holding guild channels and presences
/// - `http` - Discord HTTP client
pub async fn start_polling(state: &AppState, cache: Arc<Cache>, http: Arc<Http>) {
    let task = poll_task(state.clone(), cache, http);

    task().await;

    let settings = state.settings.read().await;
    state
        .scheduler
        .schedule(settings.poll_interval, task)
        .await;

    tracing::info!(
        "Presence polling started with period {:?}",
        settings.poll_interval
    );
}
