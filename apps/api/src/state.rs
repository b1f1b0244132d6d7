use std::sync::Arc;

use mongodb::Database;

use crate::config::Config;
use crate::llm_client::LlmProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Pluggable generation backend. Default: `GeminiClient`.
    pub llm: Arc<dyn LlmProvider>,
    pub config: Config,
}
