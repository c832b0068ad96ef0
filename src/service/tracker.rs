//! In-memory snapshot of what each member was last seen listening to.
//!
//! The tracker is the change detector for the poll cycle. It is fed the full member
//! list once per cycle and returns the members whose listening state is new or
//! different. It holds no Discord handles and performs no I/O, so the caller can
//! keep it behind a lock only for the duration of `observe`.

use serenity::all::UserId;
use std::collections::{HashMap, HashSet};

use crate::model::listening::{ListeningActivity, ListeningChange, MemberPresence};

#[derive(Debug, Default)]
pub struct ListeningTracker {
    statuses: HashMap<UserId, ListeningActivity>,
}

impl ListeningTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares one cycle's member list against the stored snapshot.
    ///
    /// For every member not in `excluded`:
    /// - tracked activity present and new or different: store it and emit a change
    /// - tracked activity present and unchanged: nothing
    /// - no tracked activity: drop any stored state without emitting a change
    ///
    /// Excluded members are skipped entirely, their stored state is neither read
    /// nor written.
    ///
    /// # Arguments
    /// - `members` - Every member observed in this cycle
    /// - `excluded` - Member IDs to skip
    ///
    /// # Returns
    /// - `Vec<ListeningChange>` - One entry per changed member, in input order
    pub fn observe(
        &mut self,
        members: &[MemberPresence],
        excluded: &HashSet<UserId>,
    ) -> Vec<ListeningChange> {
        let mut changes = Vec::new();

        for member in members {
            if excluded.contains(&member.user_id) {
                continue;
            }

            let Some(activity) = ListeningActivity::detect(&member.activities) else {
                self.statuses.remove(&member.user_id);
                continue;
            };

            if self.statuses.get(&member.user_id) == Some(&activity) {
                continue;
            }

            self.statuses.insert(member.user_id, activity.clone());
            changes.push(ListeningChange {
                user_id: member.user_id,
                display_name: member.display_name.clone(),
                activity,
            });
        }

        changes
    }

    /// Drops the stored state of a member, returning it if there was one.
    pub fn forget(&mut self, user_id: UserId) -> Option<ListeningActivity> {
        self.statuses.remove(&user_id)
    }

    #[cfg(test)]
    pub fn get(&self, user_id: UserId) -> Option<&ListeningActivity> {
        self.statuses.get(&user_id)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::{activity::PLAYING, create_spotify_activity, create_test_activity};

    fn listening(id: u64, name: &str, song: &str, artist: &str) -> MemberPresence {
        MemberPresence {
            user_id: UserId::new(id),
            display_name: name.to_string(),
            activities: vec![create_spotify_activity(Some(song), Some(artist))],
        }
    }

    fn idle(id: u64, name: &str) -> MemberPresence {
        MemberPresence {
            user_id: UserId::new(id),
            display_name: name.to_string(),
            activities: Vec::new(),
        }
    }

    fn song(song: &str, artist: &str) -> ListeningActivity {
        ListeningActivity {
            song: song.to_string(),
            artist: artist.to_string(),
        }
    }

    /// Tests a member seen listening for the first time.
    ///
    /// Expected: one change "A" with (Song1, Artist1) and the pair stored
    #[test]
    fn first_observation_produces_change() {
        let mut tracker = ListeningTracker::new();

        let changes = tracker.observe(&[listening(1, "A", "Song1", "Artist1")], &HashSet::new());

        assert_eq!(
            changes,
            vec![ListeningChange {
                user_id: UserId::new(1),
                display_name: "A".to_string(),
                activity: song("Song1", "Artist1"),
            }]
        );
        assert_eq!(tracker.get(UserId::new(1)), Some(&song("Song1", "Artist1")));
    }

    /// Tests a member still listening to the same song.
    ///
    /// Expected: no change on the second cycle
    #[test]
    fn unchanged_song_produces_nothing() {
        let mut tracker = ListeningTracker::new();
        let members = [listening(1, "A", "Song1", "Artist1")];

        tracker.observe(&members, &HashSet::new());
        let changes = tracker.observe(&members, &HashSet::new());

        assert!(changes.is_empty());
        assert_eq!(tracker.get(UserId::new(1)), Some(&song("Song1", "Artist1")));
    }

    /// Tests that a different song or a different artist both count as a change.
    ///
    /// Expected: one change per cycle and the stored pair follows the latest value
    #[test]
    fn song_or_artist_change_produces_change() {
        let mut tracker = ListeningTracker::new();
        tracker.observe(&[listening(1, "A", "Song1", "Artist1")], &HashSet::new());

        let changes = tracker.observe(&[listening(1, "A", "Song2", "Artist1")], &HashSet::new());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].activity, song("Song2", "Artist1"));

        let changes = tracker.observe(&[listening(1, "A", "Song2", "Artist2")], &HashSet::new());
        assert_eq!(changes.len(), 1);
        assert_eq!(tracker.get(UserId::new(1)), Some(&song("Song2", "Artist2")));
    }

    /// Tests a member who stopped listening.
    ///
    /// Expected: stored pair deleted, no change emitted
    #[test]
    fn stopped_listening_clears_state_silently() {
        let mut tracker = ListeningTracker::new();
        tracker.observe(&[listening(1, "A", "Song1", "Artist1")], &HashSet::new());

        let changes = tracker.observe(&[idle(1, "A")], &HashSet::new());

        assert!(changes.is_empty());
        assert!(tracker.get(UserId::new(1)).is_none());
        assert_eq!(tracker.len(), 0);
    }

    /// Tests that a non-tracked activity is treated like no activity.
    ///
    /// Expected: stored pair deleted, no change emitted
    #[test]
    fn switching_to_other_activity_clears_state() {
        let mut tracker = ListeningTracker::new();
        tracker.observe(&[listening(1, "A", "Song1", "Artist1")], &HashSet::new());

        let gaming = MemberPresence {
            user_id: UserId::new(1),
            display_name: "A".to_string(),
            activities: vec![create_test_activity("Some Game", PLAYING, None, None)],
        };
        let changes = tracker.observe(&[gaming], &HashSet::new());

        assert!(changes.is_empty());
        assert!(tracker.get(UserId::new(1)).is_none());
    }

    /// Tests that resuming after a stop is reported again.
    ///
    /// Expected: change emitted even though the song matches the one before the stop
    #[test]
    fn resuming_after_stop_is_reported() {
        let mut tracker = ListeningTracker::new();
        let members = [listening(1, "A", "Song1", "Artist1")];

        tracker.observe(&members, &HashSet::new());
        tracker.observe(&[idle(1, "A")], &HashSet::new());
        let changes = tracker.observe(&members, &HashSet::new());

        assert_eq!(changes.len(), 1);
    }

    /// Tests that excluded members never produce changes or stored state.
    ///
    /// Expected: only the non-excluded member is reported and stored
    #[test]
    fn excluded_members_are_skipped() {
        let mut tracker = ListeningTracker::new();
        let excluded = HashSet::from([UserId::new(2)]);
        let members = [
            listening(1, "A", "Song1", "Artist1"),
            listening(2, "B", "Song2", "Artist2"),
        ];

        let changes = tracker.observe(&members, &excluded);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].user_id, UserId::new(1));
        assert!(tracker.get(UserId::new(2)).is_none());
        assert_eq!(tracker.len(), 1);

        let changes = tracker.observe(&[listening(2, "B", "Song3", "Artist3")], &excluded);
        assert!(changes.is_empty());
        assert!(tracker.get(UserId::new(2)).is_none());
    }

    /// Tests several members changing in the same cycle.
    ///
    /// Expected: one change per changed member, in member order
    #[test]
    fn reports_each_changed_member_once() {
        let mut tracker = ListeningTracker::new();
        tracker.observe(&[listening(2, "B", "Song2", "Artist2")], &HashSet::new());

        let changes = tracker.observe(
            &[
                listening(1, "A", "Song1", "Artist1"),
                listening(2, "B", "Song2", "Artist2"),
                listening(3, "C", "Song3", "Artist3"),
                idle(4, "D"),
            ],
            &HashSet::new(),
        );

        let names: Vec<&str> = changes.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn forget_removes_stored_state() {
        let mut tracker = ListeningTracker::new();
        tracker.observe(&[listening(1, "A", "Song1", "Artist1")], &HashSet::new());

        assert_eq!(tracker.forget(UserId::new(1)), Some(song("Song1", "Artist1")));
        assert_eq!(tracker.forget(UserId::new(1)), None);
    }
}
