//! Runs an agent on a task and extracts its answer

use crate::agent::{Agent, AgentMessage, MessageKind};
use crate::constants::agent::{NO_RESPONSE, USER_SOURCE};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Task string for a contribution analysis
pub fn build_task(author: &str, owner: &str, project: &str) -> String {
    format!(
        "Analyze GitHub contributions for {} in the {}/{} repository",
        author, owner, project
    )
}

/// Structured report of a failed agent run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentFailure {
    pub success: bool,
    pub task: String,
    pub messages: Vec<AgentMessage>,
    pub final_response: String,
    pub error: String,
}

impl AgentFailure {
    pub fn new(task: &str, error: String) -> Self {
        Self {
            success: false,
            task: task.to_string(),
            messages: Vec::new(),
            final_response: format!("Error: {}", error),
            error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutcome {
    Answer(String),
    Failure(AgentFailure),
}

/// Newest text message in `messages` that did not come from the user
pub fn extract_final_answer(messages: &[AgentMessage]) -> String {
    messages
        .iter()
        .rev()
        .find(|m| m.kind == MessageKind::TextMessage && m.source != USER_SOURCE)
        .map(|m| m.content.clone())
        .unwrap_or_else(|| NO_RESPONSE.to_string())
}

/// Run `agent` on `task` with a fresh cancellation token.
///
/// Agent errors never propagate; they come back as [`AgentOutcome::Failure`].
pub async fn run_agent(agent: &dyn Agent, task: &str) -> AgentOutcome {
    info!("Processing task: {}", task);

    match agent.run(task, CancellationToken::new()).await {
        Ok(messages) => {
            let answer = extract_final_answer(&messages);
            info!(
                "Agent finished after {} messages ({} characters of answer)",
                messages.len(),
                answer.len()
            );
            AgentOutcome::Answer(answer)
        }
        Err(e) => {
            let message = format!("{:#}", e);
            error!("Agent run failed: {}", message);
            AgentOutcome::Failure(AgentFailure::new(task, message))
        }
    }
}
