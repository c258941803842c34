mod config;
mod db;
mod errors;
mod models;
mod render;
mod resumes;
mod routes;
mod state;
mod storage;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{close_pool, create_pool};
use crate::render::engine::{RenderEngine, WkhtmltopdfEngine};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{PgStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Platform API v{}", env!("CARGO_PKG_VERSION"));

    // Pool lifecycle is owned here: opened before serving, closed after.
    let pool = create_pool(&config.database_url).await?;
    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool.clone()));

    let engine: Arc<dyn RenderEngine> = Arc::new(WkhtmltopdfEngine::new(&config.wkhtmltopdf_path));
    info!("Render engine: wkhtmltopdf at {}", config.wkhtmltopdf_path);
    info!(
        "Transient artifacts under {}",
        config.render_scratch_dir.display()
    );

    let state = AppState {
        store,
        engine,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(&pool).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {err}");
    }
}
