mod auth;
mod chat;
mod config;
mod db;
mod errors;
mod extract;
mod ingredients;
mod llm_client;
mod meal_plans;
mod models;
mod planner;
mod profile;
mod recipes;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::HeaderValue;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{CatalogSource, Config};
use crate::db::create_pool;
use crate::llm_client::{OpenAiClient, TextGenerator};
use crate::recipes::catalog::{PgCatalog, RecipeCatalog, StaticCatalog};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting meal plan API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    let catalog: Arc<dyn RecipeCatalog> = match config.recipe_catalog {
        CatalogSource::Static => Arc::new(StaticCatalog::sample()),
        CatalogSource::Database => Arc::new(PgCatalog::new(db.clone())),
    };
    info!("Recipe catalog source: {:?}", config.recipe_catalog);

    let llm: Option<Arc<dyn TextGenerator>> = match &config.openai_api_key {
        Some(key) => {
            let client = OpenAiClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client) as Arc<dyn TextGenerator>)
        }
        None => {
            warn!("OPENAI_API_KEY not set; chat and plan personalization are disabled");
            None
        }
    };

    let cors = cors_layer(&config.frontend_url);

    let state = AppState {
        db,
        catalog,
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Allows the configured frontend origin; falls back to permissive if it is not a valid header value.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    match HeaderValue::from_str(frontend_url.trim_end_matches('/')) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
        Err(_) => {
            warn!("FRONTEND_URL '{frontend_url}' is not a valid origin; using permissive CORS");
            CorsLayer::permissive()
        }
    }
}
