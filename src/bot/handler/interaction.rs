//! Interaction handler for the `settings` command.

use dioxus_logger::tracing;
use serenity::all::{
    Context, CreateInteractionResponse, CreateInteractionResponseMessage, Interaction,
};

use crate::{
    bot::command::settings_options,
    model::settings::{SettingsCommand, SETTINGS_COMMAND_NAME},
    scheduler::presence_poll::poll_task,
    service::settings::SettingsService,
    state::AppState,
};

/// Handles an inbound interaction.
///
/// Only the `settings` slash command is handled; every other interaction is
/// ignored. Exactly one reply is sent per `settings` invocation.
pub async fn handle_interaction_create(state: &AppState, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    if command.data.name != SETTINGS_COMMAND_NAME {
        return;
    }

    let settings = SettingsCommand::from(settings_options(&command));
    tracing::debug!("{} invoked /settings: {:?}", command.user.name, settings);

    let task = poll_task(state.clone(), ctx.cache.clone(), ctx.http.clone());
    let reply = SettingsService::new(state, task).apply(settings).await;

    let response =
        CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(reply));

    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!("Failed to reply to settings command: {:?}", e);
    }
}
