//! # clickball-types
//!
//! Shared wire protocol for the Clickball game.
//!
//! These types are used by:
//! - `clickball-backend`: parsing inbound frames and broadcasting game events
//! - `clickball-bot`: the headless client, and any future native client
//!
//! All messages travel as JSON text frames over a single WebSocket. Both
//! directions are closed tagged enums so dispatch is exhaustive at compile
//! time rather than a stringly-typed switch.

use serde::{Deserialize, Serialize};

// ── Player ────────────────────────────────────────────────────────────────────

/// A joined player. `id` is assigned by the persistence layer at join time
/// and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub nickname: String,
    /// Hex color string, e.g. "#ff0000". Chosen by the client at join.
    pub color: String,
}

// ── Client → Server ───────────────────────────────────────────────────────────

/// Inbound frames. Anything with an unrecognized `type` deserializes to
/// `Unknown` and is dropped by the connection handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Bind this connection to a new player.
    Join { nickname: String, color: String },
    /// Click the ball. Only meaningful once joined.
    Click,
    #[serde(other)]
    Unknown,
}

// ── Server → All Clients ──────────────────────────────────────────────────────

/// Broadcast frames. Every registered connection receives every event;
/// a client that was absent simply misses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    PlayerJoined { player: Player },
    /// `color` is the ball's new color — the clicking player's color.
    BallClicked { color: String, player: Player },
    PlayerLeft { player: Player },
}
