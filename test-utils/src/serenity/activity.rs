//! Test factory for creating Serenity Activity objects.
//!
//! Activities are `#[non_exhaustive]` in Serenity, so the factory builds them by
//! deserializing JSON shaped like the activity entries of a gateway presence update.

use serenity::all::Activity;

/// Activity type code Discord uses for "Listening to".
pub const LISTENING: u8 = 2;

/// Activity type code Discord uses for "Playing".
pub const PLAYING: u8 = 0;

/// Creates a test Serenity Activity with customizable fields.
///
/// # Arguments
/// - `name` - Activity name, e.g. `"Spotify"`
/// - `kind` - Discord activity type code (see [`LISTENING`], [`PLAYING`])
/// - `details` - Optional details line (the song title for Spotify)
/// - `state` - Optional state line (the artist for Spotify)
///
/// # Returns
/// - `Activity` - A valid Serenity Activity struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into an Activity (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::activity::{create_test_activity, LISTENING};
///
/// let activity = create_test_activity("Spotify", LISTENING, Some("Song1"), Some("Artist1"));
/// assert_eq!(activity.details.as_deref(), Some("Song1"));
/// ```
pub fn create_test_activity(
    name: &str,
    kind: u8,
    details: Option<&str>,
    state: Option<&str>,
) -> Activity {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "type": kind,
        "details": details,
        "state": state,
        "created_at": 1_700_000_000_000u64,
    }))
    .expect("Failed to create test activity - invalid JSON structure")
}

/// Creates a Spotify "Listening to" activity for the given song and artist.
pub fn create_spotify_activity(song: Option<&str>, artist: Option<&str>) -> Activity {
    create_test_activity("Spotify", LISTENING, song, artist)
}
