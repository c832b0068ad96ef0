//! Bot behaviour, independent of how it is triggered.
//!
//! - `tracker` - Snapshot diff of what each member is listening to
//! - `presence` - One poll cycle: fetch, diff, notify
//! - `notification` - Embed building and channel delivery
//! - `settings` - Effects of the `settings` command

pub mod notification;
pub mod presence;
pub mod settings;
pub mod tracker;
