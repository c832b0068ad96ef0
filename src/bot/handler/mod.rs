use serenity::all::{Context, EventHandler, GuildId, Interaction, Ready};
use serenity::async_trait;
use std::sync::atomic::AtomicBool;

use crate::state::AppState;

pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub state: AppState,
    /// Whether the poll loop has been started
    started: AtomicBool,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            started: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.state, ctx, ready).await;
    }

    /// Called once every guild has been received into the cache
    async fn cache_ready(&self, ctx: Context, _guilds: Vec<GuildId>) {
        ready::handle_cache_ready(&self.state, &self.started, ctx).await;
    }

    /// Called when a slash command or other interaction is received
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.state, ctx, interaction).await;
    }
}
