mod config;
mod errors;
mod models;
mod routes;
mod state;
mod store;
mod tracker;
mod ui;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::RecordStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Tracker v{}", env!("CARGO_PKG_VERSION"));

    // A malformed table stops startup here.
    let store = RecordStore::open(&config.data_dir, &config.applicant_name).with_context(|| {
        format!(
            "Failed to open application store at {}",
            config.data_dir.display()
        )
    })?;
    info!(
        "Record store ready: {} application(s), resumes in {}",
        store.len(),
        store.resume_dir().display()
    );

    let state = AppState::new(config.clone(), store);

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
