//! # clickball-bot
//!
//! Headless Clickball client. Speaks the same WebSocket protocol as the
//! browser and maintains the same roster/score state, which makes it useful
//! both as a load generator and as the reference client for end-to-end tests.

pub mod game;
