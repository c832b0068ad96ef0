//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating mock Serenity structs for
//! testing purposes. These factories create valid Serenity objects by deserializing
//! JSON, simulating what Discord's gateway would deliver.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_spotify_activity, create_test_activity, activity::PLAYING};
//!
//! #[test]
//! fn detects_spotify() {
//!     let activities = vec![
//!         create_test_activity("Some Game", PLAYING, None, None),
//!         create_spotify_activity(Some("Song1"), Some("Artist1")),
//!     ];
//!
//!     // Use in your tests...
//! }
//! ```
//!
//! # Available Factories
//!
//! - `activity::create_test_activity` - Create Serenity Activity objects
//! - `activity::create_spotify_activity` - Shorthand for a Spotify listening activity

pub mod activity;

// Re-export commonly used functions for convenience
pub use activity::{create_spotify_activity, create_test_activity};
