//! Listening notification embed building and delivery.
//!
//! Each poll cycle that detects changes posts one embed listing every member whose
//! listening state changed. Discord caps an embed at 25 fields, so an unusually
//! large batch is split across several messages of the same shape.

use dioxus_logger::tracing;
use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage, Timestamp},
    http::Http,
};
use std::sync::Arc;

use crate::{error::AppError, model::listening::ListeningChange};

/// Title of every listening notification embed.
pub const EMBED_TITLE: &str = "🎵 **Spotify Activity** 🎵";

/// Spotify green.
pub const EMBED_COLOR: u32 = 0x1db954;

/// Maximum number of fields Discord accepts in a single embed.
const MAX_EMBED_FIELDS: usize = 25;

/// Builds the notification embed for a batch of listening changes.
///
/// Creates an embed with the fixed title, Spotify green accent, the current time as
/// timestamp, and one non-inline field per change (display name → song and artist).
///
/// # Arguments
/// - `changes` - Changes to list, at most 25
///
/// # Returns
/// - `Ok(CreateEmbed)` - Discord embed ready for posting
/// - `Err(AppError::InternalError)` - Current time could not be converted to a Discord timestamp
pub fn build_listening_embed(changes: &[ListeningChange]) -> Result<CreateEmbed, AppError> {
    let now = chrono::Utc::now();
    let timestamp = Timestamp::from_unix_timestamp(now.timestamp()).map_err(|e| {
        AppError::InternalError(format!(
            "Failed to convert Unix timestamp {} to Discord timestamp: {}",
            now.timestamp(),
            e
        ))
    })?;

    let embed = changes.iter().fold(
        CreateEmbed::new()
            .title(EMBED_TITLE)
            .color(EMBED_COLOR)
            .timestamp(timestamp),
        |embed, change| embed.field(&change.display_name, change.activity.describe(), false),
    );

    Ok(embed)
}

/// Destination for the changes detected by a poll cycle.
#[serenity::async_trait]
pub trait ListeningSink: Send + Sync {
    /// Delivers one cycle's changes, returning the number of messages sent.
    async fn post_changes(&self, changes: &[ListeningChange]) -> Result<usize, AppError>;
}

/// Posts listening notifications to the configured channel.
pub struct ListeningNotificationService {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl ListeningNotificationService {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[serenity::async_trait]
impl ListeningSink for ListeningNotificationService {
    /// Sends the changes of one poll cycle.
    ///
    /// Nothing is sent for an empty batch.
    ///
    /// # Arguments
    /// - `changes` - Changes detected in this cycle
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of messages sent (0 for an empty batch)
    /// - `Err(AppError::DiscordErr)` - Discord rejected a message
    async fn post_changes(&self, changes: &[ListeningChange]) -> Result<usize, AppError> {
        let mut sent = 0;

        for batch in changes.chunks(MAX_EMBED_FIELDS) {
            let embed = build_listening_embed(batch)?;

            self.channel_id
                .send_message(&self.http, CreateMessage::new().embed(embed))
                .await?;
            sent += 1;

            tracing::debug!(
                "Sent listening notification with {} field(s) to channel {}",
                batch.len(),
                self.channel_id
            );
        }

        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::listening::ListeningActivity;
    use serenity::all::UserId;

    fn change(id: u64, name: &str, song: &str, artist: &str) -> ListeningChange {
        ListeningChange {
            user_id: UserId::new(id),
            display_name: name.to_string(),
            activity: ListeningActivity {
                song: song.to_string(),
                artist: artist.to_string(),
            },
        }
    }

    /// Tests the embed layout for a single change.
    ///
    /// Expected: title, Spotify green, timestamp, and one non-inline field
    #[test]
    fn builds_embed_with_one_field_per_change() {
        let embed = build_listening_embed(&[change(1, "A", "Song1", "Artist1")]).unwrap();
        let json = serde_json::to_value(&embed).unwrap();

        assert_eq!(json["title"], EMBED_TITLE);
        assert_eq!(json["color"], EMBED_COLOR);
        assert!(json["timestamp"].is_string());

        let fields = json["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0]["name"], "A");
        assert_eq!(fields[0]["value"], "Listening to **Song1** by **Artist1**");
        assert_eq!(fields[0]["inline"], false);
    }

    #[test]
    fn keeps_change_order() {
        let embed = build_listening_embed(&[
            change(1, "A", "Song1", "Artist1"),
            change(2, "B", "Song2", "Artist2"),
        ])
        .unwrap();
        let json = serde_json::to_value(&embed).unwrap();

        let names: Vec<&str> = json["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|field| field["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    /// Tests that an empty batch never reaches Discord.
    ///
    /// The HTTP client has no valid token, so any request would fail.
    ///
    /// Expected: Ok(0)
    #[tokio::test]
    async fn empty_batch_sends_nothing() {
        let service =
            ListeningNotificationService::new(Arc::new(Http::new("")), ChannelId::new(1));

        assert_eq!(service.post_changes(&[]).await.unwrap(), 0);
    }
}
