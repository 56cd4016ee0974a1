use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Document store port. Postgres in production, in-memory for tests and local runs.
    pub store: Arc<dyn DocumentStore>,
    /// Text generator behind the generation pipeline. Default: Anthropic `LlmClient`.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}
