//! Route handlers

use super::AppState;
use super::error::ApiError;
use crate::config::env_keys;
use crate::constants;
use crate::orchestrator::{AgentOutcome, build_task, run_agent};
use crate::utils::{AnalyzeRequest, ValidationError, validate_analyze_request};
use analyzer_github::TokenContext;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Successful analysis envelope
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub task: String,
    pub final_response: String,
    pub completed_at: String,
}

/// `POST /api/analyze-contribution`
pub async fn analyze_contribution(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;
    let request = validate_analyze_request(request)?;

    let request_id = Uuid::new_v4();
    let span = info_span!(
        "analyze",
        %request_id,
        owner = %request.owner,
        project = %request.project,
        author = %request.author,
    );

    async move {
        info!(
            "Received analysis request (caller token: {})",
            if request.github_token.is_some() { "yes" } else { "no" }
        );

        let context = TokenContext::new(request.github_token);
        let agent = state.factory.create_agent(context)?;
        let task = build_task(&request.author, &request.owner, &request.project);

        let response = match run_agent(agent.as_ref(), &task).await {
            AgentOutcome::Answer(final_response) => Json(AnalysisResponse {
                success: true,
                task,
                final_response,
                completed_at: chrono::Utc::now().to_rfc3339(),
            })
            .into_response(),
            AgentOutcome::Failure(failure) => Json(failure).into_response(),
        };

        Ok::<_, ApiError>(response)
    }
    .instrument(span)
    .await
}

/// `GET /health`
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": constants::server::HEALTH_STATUS }))
}

/// `GET /debug`
///
/// Only reports whether each secret is set, never its value.
pub async fn debug_info(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    let is_set = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

    let environment: BTreeMap<&str, bool> = BTreeMap::from([
        (env_keys::GITHUB_TOKEN, is_set(&config.github.token)),
        (env_keys::AZURE_API_KEY, is_set(&config.azure.api_key)),
        (env_keys::AZURE_API_ENDPOINT, is_set(&config.azure.endpoint)),
        (env_keys::AZURE_DEPLOYMENT, is_set(&config.azure.deployment)),
    ]);

    let executable = std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let working_directory = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    Json(json!({
        "executable": executable,
        "working_directory": working_directory,
        "pid": std::process::id(),
        "version": env!("CARGO_PKG_VERSION"),
        "github_api_base": config.github.api_base,
        "environment": environment,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
