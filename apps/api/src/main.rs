mod analysis;
mod config;
mod errors;
mod generation;
mod layout;
mod models;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::RandomizedAnalyzer;
use crate::config::Config;
use crate::generation::TemplatedGenerator;
use crate::render::{DirectorySink, ExportSink};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    let analyzer = Arc::new(RandomizedAnalyzer::new(config.analyzer_seed));
    info!(
        seeded = config.analyzer_seed.is_some(),
        "Analyzer initialized (randomized)"
    );

    let export_sink: Option<Arc<dyn ExportSink>> = config.export_dir.as_ref().map(|dir| {
        info!("Exports will also be written to {}", dir.display());
        Arc::new(DirectorySink::new(dir.clone())) as Arc<dyn ExportSink>
    });

    info!("Default template: {}", config.default_template);

    let state = AppState {
        config: config.clone(),
        analyzer,
        generator: Arc::new(TemplatedGenerator),
        export_sink,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the front-end host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
