mod config;
mod entries;
mod errors;
mod funfacts;
mod gateway;
mod leaderboard;
mod models;
mod profiles;
mod routes;
mod session;
mod state;
mod validation;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::entries::store::EntryStore;
use crate::leaderboard::LeaderboardCache;
use crate::routes::build_router;
use crate::session::SessionManager;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", crate_name, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Schredder API v{}", env!("CARGO_PKG_VERSION"));

    // Select the gateway once; nothing downstream branches on the mode.
    let gateway = gateway::from_config(&config);

    let sessions = Arc::new(SessionManager::new(gateway.clone()));
    sessions.init().await;

    // Kept alive for the lifetime of the process; dropping it would silence
    // the session log line.
    let _session_log = sessions.subscribe(|phase| info!("Session state: {phase}"));

    let entries = Arc::new(EntryStore::new(gateway.clone()));
    let leaderboard = Arc::new(LeaderboardCache::new(gateway.clone()));

    let state = AppState {
        gateway,
        sessions,
        entries,
        leaderboard,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
