mod assembly;
mod config;
mod convert;
mod db;
mod errors;
mod letter;
mod models;
mod routes;
mod sections;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::convert::pandoc::DocumentConverter;
use crate::db::create_pool;
use crate::letter::source::PgLetterSource;
use crate::routes::build_router;
use crate::sections::store::SectionStore;
use crate::state::AppState;

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

    info!("Starting jobtelem API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Generated markdown/ODT/PDF files land here
    tokio::fs::create_dir_all(&config.storage_dir).await?;
    info!("Storage directory: {}", config.storage_dir.display());

    let sections = SectionStore::new(db.clone());
    let letters = Arc::new(PgLetterSource::new(db.clone()));
    let converter = DocumentConverter::new(&config);
    info!(
        "Document converter ready (pandoc: {}, templates: {})",
        config.pandoc_bin.display(),
        config.template_dir.display()
    );

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        sections,
        letters,
        converter,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the tracker frontend runs on another origin in dev

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
