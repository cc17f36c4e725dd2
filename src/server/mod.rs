//! HTTP server exposing the contribution analysis endpoint

pub mod error;
pub mod handlers;

pub use error::ApiError;

use crate::agent::{AgentFactory, AzureAgentFactory};
use crate::config::Config;
use anyhow::Result;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub factory: Arc<dyn AgentFactory>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(factory: Arc<dyn AgentFactory>, config: Config) -> Self {
        Self {
            factory,
            config: Arc::new(config),
        }
    }

    /// State backed by the Azure agent factory
    pub fn from_config(config: Config) -> Result<Self> {
        let factory = AzureAgentFactory::from_config(&config)?;
        Ok(Self::new(Arc::new(factory), config))
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(
            "/api/analyze-contribution",
            post(handlers::analyze_contribution),
        )
        .route("/health", get(handlers::health_check));

    if state.config.server.debug_endpoint {
        router = router.route("/debug", get(handlers::debug_info));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
