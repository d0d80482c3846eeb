use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Nothing here is hard-required: a missing `OPENAI_API_KEY` puts the
/// service into mock mode instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key. `None` (or the development placeholder) selects
    /// deterministic mock content for the two LLM-backed steps.
    pub openai_api_key: Option<String>,
    pub port: u16,
    /// Root directory for per-request scratch dirs and served artifacts.
    pub temp_root: PathBuf,
    /// Path of the static page served at `GET /`.
    pub frontend_index: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            temp_root: std::env::var("TEMP_FILES_DIR")
                .unwrap_or_else(|_| "temp_files".to_string())
                .into(),
            frontend_index: std::env::var("FRONTEND_INDEX")
                .unwrap_or_else(|_| "frontend/index.html".to_string())
                .into(),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
