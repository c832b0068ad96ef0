use thiserror::Error;

/// Lookup failures that cause a single poll cycle to be skipped.
///
/// None of these are fatal; the next timer tick retries the lookup from scratch.
#[derive(Error, Debug)]
pub enum PollError {
    /// `GUILD_ID` was missing or malformed at startup.
    #[error("No usable GUILD_ID configured")]
    GuildNotConfigured,

    /// `CHANNEL_ID` was missing or malformed at startup.
    #[error("No usable CHANNEL_ID configured")]
    ChannelNotConfigured,

    /// The configured guild is not present in the gateway cache.
    ///
    /// Happens before the guild has been delivered via `GUILD_CREATE`, or when the
    /// bot is not a member of the configured guild.
    #[error("Guild {0} not found in cache")]
    GuildNotCached(u64),

    /// The configured channel does not exist in the guild.
    #[error("Channel {0} not found in guild")]
    ChannelNotFound(u64),

    /// The configured channel exists but cannot receive messages.
    #[error("Channel {0} is not a text channel")]
    ChannelNotText(u64),
}
