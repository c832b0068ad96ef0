//! Ready and cache-ready event handlers.
//!
//! `ready` fires once the gateway session is authenticated and is used to register
//! the guild's slash commands. `cache_ready` fires after every guild has been
//! delivered to the cache, which is the earliest point where the poll cycle can
//! see channels and presences, so polling starts there.

use dioxus_logger::tracing;
use serenity::all::{Context, GuildId, Ready};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{bot::command::settings_command, startup, state::AppState};

/// Handles the ready event when the bot connects to Discord.
///
/// Overwrites the command set of the configured guild with the `settings` command.
/// A registration failure, or a missing guild ID, is logged and does not stop the
/// bot.
///
/// # Arguments
/// - `state` - Shared bot state, for the configured guild ID
/// - `ctx` - Discord context for the HTTP client
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    tracing::info!("Logged in as {}", ready.user.tag());

    let Some(guild_id) = state.config.guild_id.map(GuildId::new) else {
        tracing::error!("No usable GUILD_ID configured, skipping slash command registration");
        return;
    };

    match guild_id.set_commands(&ctx.http, vec![settings_command()]).await {
        Ok(commands) => tracing::info!(
            "Registered {} slash command(s) for guild {}",
            commands.len(),
            guild_id
        ),
        Err(e) => tracing::error!("Failed to register slash commands: {:?}", e),
    }
}

/// Handles the cache-ready event by starting the poll loop.
///
/// Runs at most once per process; reconnects that fire the event again leave the
/// running timer alone.
///
/// # Arguments
/// - `state` - Shared bot state
/// - `started` - Flag recording whether polling already started
/// - `ctx` - Discord context providing the cache and HTTP client
pub async fn handle_cache_ready(state: &AppState, started: &AtomicBool, ctx: Context) {
    if started.swap(true, Ordering::AcqRel) {
        tracing::debug!("Cache ready again, poll loop already running");
        return;
    }

    startup::start_polling(state, ctx.cache.clone(), ctx.http.clone()).await;
}
