mod bot;
mod config;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;

use dioxus_logger::tracing::{self, Level};

use crate::{
    config::Config, error::AppError, scheduler::presence_poll::PollScheduler, state::AppState,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    match (config.guild_id, config.channel_id) {
        (Some(guild_id), Some(channel_id)) => tracing::info!(
            "Watching guild {} and posting to channel {}",
            guild_id,
            channel_id
        ),
        _ => tracing::warn!("Guild or channel not configured, every poll will be skipped"),
    }

    let state = AppState::new(config, PollScheduler::new());

    bot::start::start_bot(state).await
}
