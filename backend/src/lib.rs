//! # clickball-backend
//!
//! Server for the multiplayer "click the ball" game: a WebSocket hub that
//! fans game events out to every joined client, plus a small REST API over
//! the same store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod persistence;
pub mod registry;
pub mod ws;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use persistence::Store;
use registry::SessionRegistry;

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub registry: SessionRegistry,
}

/// Build the full router: WebSocket endpoint, REST API, permissive CORS.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health))
        .route("/ws", get(ws::ws_handler))
        .route("/api/players", get(handlers::list_players))
        .route("/api/clicks/:player_id", get(handlers::player_clicks))
        .route("/api/score", post(handlers::submit_score))
        .route("/api/leaderboard", get(handlers::leaderboard))
        .layer(cors)
        .with_state(state)
}
