//! Discord bot integration.
//!
//! Connects to the gateway with Serenity, registers the `settings` slash command
//! for the configured guild, starts the presence poll once the cache is populated,
//! and routes `settings` invocations to the settings service.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild and channel data for resolving the notification channel
//! - `GUILD_MEMBERS` - Member list retrieval (privileged intent)
//! - `GUILD_PRESENCES` - Member activities such as Spotify (privileged intent)
//!
//! Both privileged intents must be explicitly enabled in the Discord Developer
//! Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
