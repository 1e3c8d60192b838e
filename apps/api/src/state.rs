use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::generation::store::ContentStore;
use crate::llm_client::ModelClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The model adapter. `GeminiClient` in production; mocked in tests.
    pub llm: Arc<dyn ModelClient>,
    /// Append-only content log. `PgContentStore` in production.
    pub store: Arc<dyn ContentStore>,
    pub config: Config,
}
