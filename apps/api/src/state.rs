use crate::cleanup::CleanupQueue;
use crate::config::Config;
use crate::letter::compiler::TexCompiler;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    pub compiler: TexCompiler,
    /// Deferred-deletion queue for served PDF copies.
    pub cleanup: CleanupQueue,
}
