use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::recipes::catalog::RecipeCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Read-only recipe catalog used for plan generation, search, and recipe lookups.
    pub catalog: Arc<dyn RecipeCatalog>,
    /// `None` when no text-generation API key is configured.
    pub llm: Option<Arc<dyn TextGenerator>>,
    pub config: Config,
}
