mod analysis;
mod config;
mod documents;
mod errors;
mod extractors;
mod job_descriptions;
mod models;
mod resumes;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::lexicon::Lexicon;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::MemStore;

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

    // Keyword lexicon: external file if configured, built-in otherwise
    let lexicon = match &config.keyword_lexicon_path {
        Some(path) => {
            let lexicon = Lexicon::from_json_file(path)?;
            info!(
                "Loaded keyword lexicon from {} ({} terms)",
                path.display(),
                lexicon.vocabulary().len()
            );
            lexicon
        }
        None => Lexicon::default(),
    };

    // Build app state
    let state = AppState {
        store: Arc::new(MemStore::new()),
        lexicon: Arc::new(lexicon),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
