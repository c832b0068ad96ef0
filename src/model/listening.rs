//! Listening activity domain models.
//!
//! These types carry the data the poll cycle needs out of Serenity's presence
//! cache so the change detection in `ListeningTracker` can run without holding
//! cache references or touching the network.

use serenity::all::{Activity, ActivityType, UserId};

/// Activity name Discord reports for Spotify listening sessions.
pub const TRACKED_ACTIVITY_NAME: &str = "Spotify";

/// Placeholder used when the activity carries no song title.
pub const UNKNOWN_SONG: &str = "Unknown song";

/// Placeholder used when the activity carries no artist.
pub const UNKNOWN_ARTIST: &str = "Unknown artist";

/// The last-known song and artist a member was listening to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListeningActivity {
    /// Song title, from the activity `details` line
    pub song: String,
    /// Artist, from the activity `state` line
    pub artist: String,
}

impl ListeningActivity {
    /// Finds the tracked listening activity in a member's activity list.
    ///
    /// Only an activity named `Spotify` with the Listening type counts. Missing
    /// details or state fall back to the placeholder text.
    ///
    /// # Arguments
    /// - `activities` - The member's current activities from their presence
    ///
    /// # Returns
    /// - `Some(ListeningActivity)` - The member is listening to Spotify
    /// - `None` - No tracked activity is present
    pub fn detect(activities: &[Activity]) -> Option<Self> {
        activities
            .iter()
            .find(|activity| {
                activity.kind == ActivityType::Listening && activity.name == TRACKED_ACTIVITY_NAME
            })
            .map(|activity| Self {
                song: activity
                    .details
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_SONG.to_string()),
                artist: activity
                    .state
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            })
    }

    /// Text shown in the notification field for this activity.
    pub fn describe(&self) -> String {
        format!("Listening to **{}** by **{}**", self.song, self.artist)
    }
}

/// A guild member as observed during one poll cycle.
#[derive(Debug, Clone)]
pub struct MemberPresence {
    pub user_id: UserId,
    /// Guild nickname, global name, or username, in that order of preference
    pub display_name: String,
    /// Activities from the cached presence; empty when the member is offline
    pub activities: Vec<Activity>,
}

/// A member whose tracked listening state changed during a poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListeningChange {
    pub user_id: UserId,
    pub display_name: String,
    pub activity: ListeningActivity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::{
        activity::{LISTENING, PLAYING},
        create_spotify_activity, create_test_activity,
    };

    #[test]
    fn detects_spotify_listening_activity() {
        let activities = vec![
            create_test_activity("Some Game", PLAYING, Some("In menus"), None),
            create_spotify_activity(Some("Song1"), Some("Artist1")),
        ];

        let detected = ListeningActivity::detect(&activities);

        assert_eq!(
            detected,
            Some(ListeningActivity {
                song: "Song1".to_string(),
                artist: "Artist1".to_string(),
            })
        );
    }

    #[test]
    fn falls_back_to_placeholders() {
        let activities = vec![create_spotify_activity(None, None)];

        let detected = ListeningActivity::detect(&activities).unwrap();

        assert_eq!(detected.song, UNKNOWN_SONG);
        assert_eq!(detected.artist, UNKNOWN_ARTIST);
    }

    /// Another app reporting "Listening" is not the tracked service.
    #[test]
    fn ignores_other_listening_services() {
        let activities = vec![create_test_activity(
            "Apple Music",
            LISTENING,
            Some("Song1"),
            Some("Artist1"),
        )];

        assert_eq!(ListeningActivity::detect(&activities), None);
    }

    /// A "Spotify" activity with the wrong type is not a listening session.
    #[test]
    fn ignores_spotify_with_other_activity_type() {
        let activities = vec![create_test_activity(
            "Spotify",
            PLAYING,
            Some("Song1"),
            Some("Artist1"),
        )];

        assert_eq!(ListeningActivity::detect(&activities), None);
    }

    #[test]
    fn describes_song_and_artist() {
        let activity = ListeningActivity {
            song: "Song1".to_string(),
            artist: "Artist1".to_string(),
        };

        assert_eq!(activity.describe(), "Listening to **Song1** by **Artist1**");
    }
}
