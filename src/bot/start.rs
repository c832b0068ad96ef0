use dioxus_logger::tracing;
use serenity::all::{Client, GatewayIntents};

use crate::bot::handler::Handler;
use crate::error::AppError;
use crate::state::AppState;

/// Starts the Discord bot in a blocking manner
///
/// Builds the Serenity client with the bot token from configuration and runs it
/// until the gateway connection shuts down.
///
/// # Arguments
/// - `state` - Shared bot state handed to the event handler
///
/// # Returns
/// - `Ok(())` if the bot runs and shuts down cleanly
/// - `Err(AppError)` if client construction or the gateway connection fails
pub async fn start_bot(state: AppState) -> Result<(), AppError> {
    // GUILD_MEMBERS and GUILD_PRESENCES are privileged intents - both must be
    // enabled in the Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_PRESENCES;

    let token = state.config.discord_token.clone();
    let handler = Handler::new(state);

    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .await?;

    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
