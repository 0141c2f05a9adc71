//! # handlers
//!
//! REST endpoints. All bodies are JSON; failures map to the original
//! service's status codes and error strings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::error;

use crate::AppState;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn internal(msg: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": msg })))
}

/// Liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "Clickball backend is running" }))
}

/// Every player ever created, including rows orphaned by disconnects.
pub async fn list_players(State(app): State<AppState>) -> ApiResult {
    match app.store.list_players().await {
        Ok(players) => Ok(Json(json!({ "players": players }))),
        Err(e) => {
            error!("players query failed: {e}");
            Err(internal("Failed to fetch players"))
        }
    }
}

/// Click count for one player id. Unknown ids simply count zero rows.
pub async fn player_clicks(
    State(app): State<AppState>,
    Path(player_id): Path<i64>,
) -> ApiResult {
    match app.store.count_clicks(player_id).await {
        Ok(clicks) => Ok(Json(json!({ "clicks": clicks }))),
        Err(e) => {
            error!("click count query failed: {e}");
            Err(internal("Failed to fetch clicks"))
        }
    }
}

/// Submit a `{username, score}` pair. The body is validated by hand so a
/// missing or mistyped field yields the fixed 400 payload rather than an
/// extractor rejection.
pub async fn submit_score(State(app): State<AppState>, Json(body): Json<Value>) -> ApiResult {
    let username = body["username"].as_str().filter(|u| !u.is_empty());
    let score = body["score"].as_f64();

    let (Some(username), Some(score)) = (username, score) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid input" })),
        ));
    };

    match app.store.save_score(username, score).await {
        Ok(()) => Ok(Json(json!({ "message": "Score saved" }))),
        Err(e) => {
            error!("score insert failed: {e}");
            Err(internal("Failed to save score"))
        }
    }
}

/// Top-10 scores, best first.
pub async fn leaderboard(State(app): State<AppState>) -> ApiResult {
    match app.store.leaderboard().await {
        Ok(scores) => Ok(Json(json!({ "scores": scores }))),
        Err(e) => {
            error!("leaderboard query failed: {e}");
            Err(internal("Failed to fetch leaderboard"))
        }
    }
}
