//! Presence poll cycle.
//!
//! One cycle resolves the configured guild and channel from the cache, fetches the
//! full member list over HTTP, pairs each member with the activities from their
//! cached presence, runs the snapshot diff, and posts the changes. Every failure is
//! returned to the caller, which logs it; the snapshot is updated before posting so
//! a failed post does not cause the same changes to be reported again.
//!
//! A missing guild or channel ID from startup surfaces here as a skipped cycle, so
//! the bot stays connected and the problem is logged on every tick.

use dioxus_logger::tracing;
use serenity::{
    all::{ChannelId, ChannelType, GuildId, Member, UserId},
    cache::Cache,
    http::Http,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    error::{poll::PollError, AppError},
    model::listening::MemberPresence,
    service::notification::{ListeningNotificationService, ListeningSink},
    state::AppState,
};

/// Page size for the guild member list endpoint (Discord's maximum).
const MEMBER_PAGE_SIZE: u64 = 1000;

/// Marks a poll cycle as running for as long as it is alive.
struct CycleGuard<'a>(&'a AtomicBool);

impl<'a> CycleGuard<'a> {
    /// Claims the in-flight flag, or returns `None` if another cycle holds it.
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct PresenceService<'a> {
    state: &'a AppState,
    cache: &'a Cache,
    http: Arc<Http>,
}

impl<'a> PresenceService<'a> {
    pub fn new(state: &'a AppState, cache: &'a Cache, http: Arc<Http>) -> Self {
        Self { state, cache, http }
    }

    /// Runs one poll cycle.
    ///
    /// Skips immediately (returning `Ok(0)`) if a previous cycle is still in flight.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of members whose listening state changed
    /// - `Err(AppError::PollErr)` - Guild or channel is unconfigured or could not be resolved
    /// - `Err(AppError::DiscordErr)` - Member fetch or message delivery failed
    pub async fn run_cycle(&self) -> Result<usize, AppError> {
        let Some(_guard) = CycleGuard::acquire(&self.state.poll_in_flight) else {
            tracing::warn!("Previous presence poll still running, skipping this tick");
            return Ok(0);
        };

        let guild_id = self
            .state
            .config
            .guild_id
            .map(GuildId::new)
            .ok_or(PollError::GuildNotConfigured)?;
        let channel_id = self
            .state
            .config
            .channel_id
            .map(ChannelId::new)
            .ok_or(PollError::ChannelNotConfigured)?;

        self.resolve_channel(guild_id, channel_id)?;

        let members = self.fetch_members(guild_id).await?;
        let presences = self.collect_presences(guild_id, members)?;

        let sink = ListeningNotificationService::new(self.http.clone(), channel_id);
        self.process_presences(&presences, &sink).await
    }

    /// Diffs a presence snapshot against the stored state and delivers the changes.
    ///
    /// The stored state is updated before delivery, so a delivery failure drops that
    /// batch instead of repeating it on the next cycle. The sink is not called when
    /// nothing changed.
    ///
    /// # Arguments
    /// - `presences` - Every member of the guild with their current activities
    /// - `sink` - Where to deliver the changes
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of members whose listening state changed
    /// - `Err(AppError)` - Delivery failed
    pub async fn process_presences(
        &self,
        presences: &[MemberPresence],
        sink: &dyn ListeningSink,
    ) -> Result<usize, AppError> {
        let changes = {
            let settings = self.state.settings.read().await;
            let mut tracker = self.state.tracker.write().await;
            let changes = tracker.observe(presences, &settings.excluded);

            tracing::debug!(
                "Polled {} member(s), {} listening, {} changed",
                presences.len(),
                tracker.len(),
                changes.len()
            );

            changes
        };

        for change in &changes {
            tracing::debug!(
                "{} ({}) is now listening to {} by {}",
                change.display_name,
                change.user_id,
                change.activity.song,
                change.activity.artist
            );
        }

        if changes.is_empty() {
            return Ok(0);
        }

        sink.post_changes(&changes).await?;

        Ok(changes.len())
    }

    /// Checks that the guild is cached and the channel can receive messages.
    fn resolve_channel(&self, guild_id: GuildId, channel_id: ChannelId) -> Result<(), PollError> {
        let guild = self
            .cache
            .guild(guild_id)
            .ok_or(PollError::GuildNotCached(guild_id.get()))?;

        let channel = guild
            .channels
            .get(&channel_id)
            .ok_or(PollError::ChannelNotFound(channel_id.get()))?;

        if !matches!(channel.kind, ChannelType::Text | ChannelType::News) {
            return Err(PollError::ChannelNotText(channel_id.get()));
        }

        Ok(())
    }

    /// Fetches every member of the guild, one page at a time.
    async fn fetch_members(&self, guild_id: GuildId) -> Result<Vec<Member>, AppError> {
        let mut members = Vec::new();
        let mut after: Option<UserId> = None;

        loop {
            let page = guild_id
                .members(&self.http, Some(MEMBER_PAGE_SIZE), after)
                .await?;
            let page_len = page.len();

            after = page.last().map(|member| member.user.id);
            members.extend(page);

            if (page_len as u64) < MEMBER_PAGE_SIZE {
                break;
            }
        }

        Ok(members)
    }

    /// Pairs each fetched member with the activities of their cached presence.
    ///
    /// Members without a cached presence (offline or invisible) get an empty list.
    fn collect_presences(
        &self,
        guild_id: GuildId,
        members: Vec<Member>,
    ) -> Result<Vec<MemberPresence>, PollError> {
        let guild = self
            .cache
            .guild(guild_id)
            .ok_or(PollError::GuildNotCached(guild_id.get()))?;

        Ok(members
            .into_iter()
            .map(|member| MemberPresence {
                user_id: member.user.id,
                display_name: member.display_name().to_string(),
                activities: guild
                    .presences
                    .get(&member.user.id)
                    .map(|presence| presence.activities.clone())
                    .unwrap_or_default(),
            })
            .collect())
    }
}
