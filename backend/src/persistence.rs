//! # persistence
//!
//! SQLite-backed store for players, clicks, and leaderboard scores.
//!
//! Every operation is a single statement and independently fallible — there
//! are no transactions and no cross-row atomicity requirements. Click rows
//! are append-only and only ever aggregated with `COUNT(*)`. Scores are a
//! separate submission path with no referential link to players.

use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use clickball_types::Player;

use crate::error::StorageError;

/// A leaderboard entry. Independent of `Player` — submitted by name, not id.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Score {
    pub username: String,
    pub score: f64,
    pub timestamp: NaiveDateTime,
}

/// Handle to the SQLite store. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if missing) the database at `url` and ensure the schema
    /// exists. The pool is capped at one connection — writes are tiny and the
    /// original deployment ran on a single sqlite handle.
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nickname TEXT NOT NULL,
                color TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS clicks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                player_id INTEGER NOT NULL,
                timestamp TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS scores (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                score REAL NOT NULL,
                timestamp TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )
        .execute(&pool)
        .await?;

        info!("Store ready at {url}");
        Ok(Self { pool })
    }

    /// Insert a new player row and return it with its assigned id.
    pub async fn create_player(&self, nickname: &str, color: &str) -> Result<Player, StorageError> {
        let result = sqlx::query("INSERT INTO players (nickname, color) VALUES (?, ?)")
            .bind(nickname)
            .bind(color)
            .execute(&self.pool)
            .await?;

        Ok(Player {
            id: result.last_insert_rowid(),
            nickname: nickname.to_string(),
            color: color.to_string(),
        })
    }

    /// Append one click for `player_id`. Callers only log a failure here;
    /// the click is simply lost.
    pub async fn record_click(&self, player_id: i64) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO clicks (player_id) VALUES (?)")
            .bind(player_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Total clicks recorded for `player_id`; 0 when none exist.
    pub async fn count_clicks(&self, player_id: i64) -> Result<i64, StorageError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE player_id = ?")
                .bind(player_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Every player row ever created, including those whose connection is gone.
    pub async fn list_players(&self) -> Result<Vec<Player>, StorageError> {
        let rows: Vec<(i64, String, String)> =
            sqlx::query_as("SELECT id, nickname, color FROM players ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, nickname, color)| Player { id, nickname, color })
            .collect())
    }

    pub async fn save_score(&self, username: &str, score: f64) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO scores (username, score, timestamp) VALUES (?, ?, datetime('now'))")
            .bind(username)
            .bind(score)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Top ten scores, best first. Ties keep a stable order within one query.
    pub async fn leaderboard(&self) -> Result<Vec<Score>, StorageError> {
        let scores = sqlx::query_as::<_, Score>(
            "SELECT username, score, timestamp FROM scores ORDER BY score DESC LIMIT 10",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(scores)
    }
}
