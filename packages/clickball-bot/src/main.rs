//! main.rs — headless Clickball client entry point
//!
//! Connects to the backend's `/ws` endpoint, joins with a nickname and color,
//! folds every broadcast into its local roster, and clicks the ball at a
//! fixed cadence whenever the ball isn't already its own color. Exits with
//! the standings once any player reaches the client-local win threshold.

use std::time::Duration;

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use rand::Rng;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{error, info, warn};

use clickball_bot::game::ClientGame;
use clickball_types::{ClientMessage, ServerMessage};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "clickball-bot", about = "Headless Clickball client")]
struct Args {
    /// WebSocket endpoint of the backend
    #[arg(long, default_value = "ws://127.0.0.1:5000/ws")]
    server: String,
    /// Nickname to join with (random if omitted)
    #[arg(long)]
    nickname: Option<String>,
    /// Hex color to join with (random if omitted)
    #[arg(long)]
    color: Option<String>,
    /// Milliseconds between click attempts
    #[arg(long, default_value = "500")]
    interval_ms: u64,
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clickball_bot=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut rng = rand::thread_rng();
    let nickname = args
        .nickname
        .unwrap_or_else(|| format!("bot-{:04x}", rng.gen_range(0..0x1_0000)));
    let color = args
        .color
        .unwrap_or_else(|| format!("#{:06x}", rng.gen_range(0..0x100_0000)));
    drop(rng);

    info!("Connecting to {} as {nickname} ({color})", args.server);
    let (ws, _) = match connect_async(args.server.as_str()).await {
        Ok(ok) => ok,
        Err(e) => {
            error!("Could not connect to {}: {e}", args.server);
            std::process::exit(1);
        }
    };
    let (mut write, mut read) = ws.split();

    let join = ClientMessage::Join {
        nickname: nickname.clone(),
        color: color.clone(),
    };
    if let Err(e) = send(&mut write, &join).await {
        error!("Join failed: {e}");
        std::process::exit(1);
    }

    let mut game = ClientGame::new(color);
    let mut ticker = tokio::time::interval(Duration::from_millis(args.interval_ms));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if game.wants_click() {
                    game.local_click();
                    if let Err(e) = send(&mut write, &ClientMessage::Click).await {
                        error!("Click failed: {e}");
                        break;
                    }
                }
            }
            maybe_msg = read.next() => {
                match maybe_msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ServerMessage>(&text) {
                            Ok(msg) => {
                                game.apply(&msg);
                                if let Some((id, entry)) = game.winner() {
                                    info!("Game over: {} (id {id}) reached {} clicks", entry.nickname, entry.clicks);
                                    for (rank, (_, e)) in game.standings().iter().enumerate() {
                                        info!("  #{} {} — {}", rank + 1, e.nickname, e.clicks);
                                    }
                                    return;
                                }
                            }
                            Err(e) => warn!("Ignoring unparseable frame: {e}"),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Server closed the connection");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("Socket error: {e}");
                        break;
                    }
                }
            }
        }
    }
}

async fn send<S>(write: &mut S, msg: &ClientMessage) -> Result<(), S::Error>
where
    S: SinkExt<Message> + Unpin,
{
    let frame = serde_json::to_string(msg).unwrap_or_default();
    write.send(Message::Text(frame)).await
}
