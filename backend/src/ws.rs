//! # ws
//!
//! Per-connection WebSocket dispatch loop.
//!
//! Each connection walks `Connected → Joined → Closed`. The `Joined` state is
//! not stored here — it is exactly the presence of a registry entry for this
//! connection. Inbound frames are handled to completion (storage awaited
//! inline) before the next frame of the same connection is read; frames from
//! different connections interleave at the storage await points.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use clickball_types::{ClientMessage, ServerMessage};

use crate::AppState;

pub async fn ws_handler(State(app): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app))
}

async fn handle_socket(mut socket: WebSocket, app: AppState) {
    let conn_id = Uuid::new_v4();
    info!("Client connected: {conn_id}");

    // Outbound frames funnel through this channel; the registry holds a clone
    // of `tx` once the connection joins. The local clone keeps it open.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    loop {
        tokio::select! {
            Some(frame) = rx.recv() => {
                if socket.send(Message::Text(frame)).await.is_err() {
                    break;
                }
            }
            maybe_msg = socket.recv() => {
                match maybe_msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_frame(&app, conn_id, &tx, &text).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // binary / ping / pong — not part of the protocol
                    Some(Err(e)) => {
                        warn!("Client {conn_id}: socket error: {e}");
                        break;
                    }
                }
            }
        }
    }

    // Closed: drop the registry entry and announce the departure if the
    // connection ever joined. A never-joined disconnect emits nothing.
    if let Some(player) = app.registry.unregister(conn_id).await {
        app.registry
            .broadcast(&ServerMessage::PlayerLeft { player })
            .await;
    }
    info!("Client disconnected: {conn_id}");
}

/// Dispatch one inbound text frame. Every failure path logs and returns —
/// the connection always stays open.
async fn handle_frame(
    app: &AppState,
    conn_id: Uuid,
    tx: &mpsc::UnboundedSender<String>,
    text: &str,
) {
    let msg: ClientMessage = match serde_json::from_str(text) {
        Ok(m) => m,
        Err(e) => {
            warn!("Client {conn_id}: ignoring malformed frame: {e}");
            return;
        }
    };

    match msg {
        ClientMessage::Join { nickname, color } => {
            if nickname.is_empty() || color.is_empty() {
                warn!("Client {conn_id}: join rejected, missing nickname or color");
                return;
            }
            match app.store.create_player(&nickname, &color).await {
                Ok(player) => {
                    info!("Client {conn_id}: joined as {} (id {})", player.nickname, player.id);
                    app.registry.register(conn_id, tx.clone(), player.clone()).await;
                    app.registry
                        .broadcast(&ServerMessage::PlayerJoined { player })
                        .await;
                }
                Err(e) => error!("Client {conn_id}: join failed: {e}"),
            }
        }
        ClientMessage::Click => {
            // No-op unless this connection has joined.
            let Some(player) = app.registry.lookup(conn_id).await else {
                return;
            };
            if let Err(e) = app.store.record_click(player.id).await {
                error!("Client {conn_id}: click not recorded: {e}");
                return;
            }
            let color = player.color.clone();
            app.registry
                .broadcast(&ServerMessage::BallClicked { color, player })
                .await;
        }
        ClientMessage::Unknown => {
            debug!("Client {conn_id}: ignoring unrecognized message type");
        }
    }
}
