//! Listenboard Test Utils
//!
//! Provides shared testing utilities for the listenboard bot. Serenity's model types
//! are `#[non_exhaustive]` and cannot be built with struct literals outside the
//! crate, so this crate offers factories that build them from JSON the same way
//! Discord's gateway payloads are decoded.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::create_spotify_activity;
//!
//! #[test]
//! fn test_detection() {
//!     let activity = create_spotify_activity(Some("Song1"), Some("Artist1"));
//!     // Feed into the code under test...
//! }
//! ```

pub mod serenity;
