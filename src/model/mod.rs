//! Domain models shared by the services and bot handlers.

pub mod listening;
pub mod settings;
