//! Timers driving the presence poll.

pub mod presence_poll;
