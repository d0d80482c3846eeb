mod cleanup;
mod config;
mod errors;
mod letter;
mod llm_client;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cleanup::CleanupQueue;
use crate::config::Config;
use crate::letter::compiler::TexCompiler;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CoverAgent API v{}", env!("CARGO_PKG_VERSION"));

    // Temp root holds per-request scratch dirs and served artifacts.
    tokio::fs::create_dir_all(&config.temp_root)
        .await
        .with_context(|| format!("Failed to create temp root {}", config.temp_root.display()))?;

    let llm = LlmClient::new(config.openai_api_key.clone());
    if llm.has_credential() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("No OpenAI API key configured — skill and bullet generation will use mock content");
    }

    let cleanup = CleanupQueue::start();

    let state = AppState {
        llm,
        config: config.clone(),
        compiler: TexCompiler::default(),
        cleanup,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
