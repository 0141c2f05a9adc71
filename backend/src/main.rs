use anyhow::Context;
use tracing::info;

use clickball_backend::config::ServerConfig;
use clickball_backend::persistence::Store;
use clickball_backend::registry::SessionRegistry;
use clickball_backend::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clickball_backend=info,tower_http=warn".into()),
        )
        .init();

    info!("Clickball backend starting...");

    let config = ServerConfig::default();

    let store = Store::connect(&config.database_url)
        .await
        .with_context(|| format!("could not open database {}", config.database_url))?;

    let state = AppState {
        store,
        registry: SessionRegistry::new(),
    };

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Listening on {addr}");

    // A failed bind is the only fatal startup error.
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
