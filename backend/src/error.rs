use thiserror::Error;

/// A persistence call failed. Never fatal: callers log it and abandon the
/// single operation that issued it — the connection (or request) carries on.
#[derive(Debug, Error)]
#[error("storage error: {0}")]
pub struct StorageError(#[from] pub sqlx::Error);
