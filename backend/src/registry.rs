//! # registry
//!
//! In-memory session registry and broadcast fan-out.
//!
//! The registry exclusively owns the connection → player mapping. An entry
//! exists only for connections that have completed `join`; it is created by
//! `register`, removed by `unregister`, and lost entirely on process restart.
//! There is no capacity bound, no reconnection dedup, and no idle timeout.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tracing::{error, warn};
use uuid::Uuid;

use clickball_types::{Player, ServerMessage};

/// One joined connection: the player bound to it and the channel its socket
/// task drains into outbound text frames.
struct Session {
    player: Player,
    tx: mpsc::UnboundedSender<String>,
}

/// Created once at server start and injected into the connection handler.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `conn` with `player`, overwriting any prior association.
    pub async fn register(
        &self,
        conn: Uuid,
        tx: mpsc::UnboundedSender<String>,
        player: Player,
    ) {
        self.inner.write().await.insert(conn, Session { player, tx });
    }

    /// The player bound to `conn`, if it has joined.
    pub async fn lookup(&self, conn: Uuid) -> Option<Player> {
        self.inner.read().await.get(&conn).map(|s| s.player.clone())
    }

    /// Remove the association for `conn`, returning the player that was bound
    /// to it so the caller can announce the departure.
    pub async fn unregister(&self, conn: Uuid) -> Option<Player> {
        self.inner.write().await.remove(&conn).map(|s| s.player)
    }

    /// Number of joined connections. Used by tests and the startup banner.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Serialize `message` once and deliver it to every registered
    /// connection, best-effort. A dead channel is logged and skipped; it
    /// never blocks delivery to the rest.
    pub async fn broadcast(&self, message: &ServerMessage) {
        let frame = match serde_json::to_string(message) {
            Ok(f) => f,
            Err(e) => {
                error!("broadcast: failed to serialize message: {e}");
                return;
            }
        };

        let sessions = self.inner.read().await;
        for (conn, session) in sessions.iter() {
            if session.tx.send(frame.clone()).is_err() {
                warn!("broadcast: connection {conn} is gone, frame dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: i64, nickname: &str) -> Player {
        Player {
            id,
            nickname: nickname.into(),
            color: "#ff0000".into(),
        }
    }

    #[tokio::test]
    async fn register_lookup_unregister_roundtrip() {
        let registry = SessionRegistry::new();
        let conn = Uuid::new_v4();
        let (tx, _rx) = mpsc::unbounded_channel();

        assert!(registry.lookup(conn).await.is_none());

        registry.register(conn, tx, player(1, "Alice")).await;
        assert_eq!(registry.lookup(conn).await.unwrap().nickname, "Alice");
        assert_eq!(registry.len().await, 1);

        let removed = registry.unregister(conn).await.unwrap();
        assert_eq!(removed.id, 1);
        assert!(registry.lookup(conn).await.is_none());
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn register_overwrites_prior_association() {
        let registry = SessionRegistry::new();
        let conn = Uuid::new_v4();
        let (tx, _rx) = mpsc::unbounded_channel();

        registry.register(conn, tx.clone(), player(1, "Alice")).await;
        registry.register(conn, tx, player(2, "Alice2")).await;

        assert_eq!(registry.len().await, 1);
        assert_eq!(registry.lookup(conn).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn unregister_never_joined_returns_none() {
        let registry = SessionRegistry::new();
        assert!(registry.unregister(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn broadcast_reaches_every_registered_connection() {
        let registry = SessionRegistry::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry.register(Uuid::new_v4(), tx_a, player(1, "Alice")).await;
        registry.register(Uuid::new_v4(), tx_b, player(2, "Bob")).await;

        registry
            .broadcast(&ServerMessage::PlayerJoined {
                player: player(2, "Bob"),
            })
            .await;

        let frame_a = rx_a.recv().await.unwrap();
        let frame_b = rx_b.recv().await.unwrap();
        assert_eq!(frame_a, frame_b);
        assert!(frame_a.contains(r#""type":"player_joined""#));
    }

    #[tokio::test]
    async fn broadcast_survives_a_dead_channel() {
        let registry = SessionRegistry::new();
        let (tx_dead, rx_dead) = mpsc::unbounded_channel();
        drop(rx_dead);
        let (tx_live, mut rx_live) = mpsc::unbounded_channel();
        registry.register(Uuid::new_v4(), tx_dead, player(1, "Gone")).await;
        registry.register(Uuid::new_v4(), tx_live, player(2, "Here")).await;

        registry
            .broadcast(&ServerMessage::PlayerLeft {
                player: player(1, "Gone"),
            })
            .await;

        assert!(rx_live.recv().await.unwrap().contains("player_left"));
    }
}
