//! Conversational agent that answers analysis tasks with GitHub tools

pub mod chat;
pub mod openai;
pub mod prompt;
pub mod tools;

pub use chat::ChatAgent;
pub use openai::AzureChatClient;
pub use tools::{GitHubTools, ToolExecutor};

use crate::config::Config;
use crate::constants;
use analyzer_github::{GitHubClient, TokenContext, TokenResolver};
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Kind of an entry in an agent's message trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageKind {
    TextMessage,
    ToolCallRequest,
    ToolCallExecution,
}

/// One entry in an agent's message trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub source: String,
    pub content: String,
}

impl AgentMessage {
    pub fn new(kind: MessageKind, source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            content: content.into(),
        }
    }
}

/// Trait that all agents must implement
#[async_trait]
pub trait Agent: Send + Sync {
    /// Work on `task` until done, returning the full message trace in order
    async fn run(&self, task: &str, cancel: CancellationToken) -> Result<Vec<AgentMessage>>;
}

/// Builds one agent per request, bound to that request's credentials
pub trait AgentFactory: Send + Sync {
    fn create_agent(&self, context: TokenContext) -> Result<Box<dyn Agent>>;
}

/// Production factory: Azure-hosted chat model over the GitHub tools
#[derive(Debug, Clone)]
pub struct AzureAgentFactory {
    chat: AzureChatClient,
    github: GitHubClient,
    max_tool_iterations: u32,
}

impl AzureAgentFactory {
    pub fn new(chat: AzureChatClient, github: GitHubClient, max_tool_iterations: u32) -> Self {
        Self {
            chat,
            github,
            max_tool_iterations,
        }
    }

    /// Build the clients from validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let chat = AzureChatClient::from_config(&config.azure)?;
        let resolver = TokenResolver::new(config.github.token.clone());
        if !resolver.has_fallback() {
            warn!("No fallback GitHub token; requests without their own token are unauthenticated");
        }
        let github = GitHubClient::new(&config.github.api_base, resolver);
        Ok(Self::new(chat, github, config.agent.max_tool_iterations))
    }
}

impl AgentFactory for AzureAgentFactory {
    fn create_agent(&self, context: TokenContext) -> Result<Box<dyn Agent>> {
        let tools = GitHubTools::new(self.github.scoped(context));
        Ok(Box::new(ChatAgent::new(
            constants::agent::AGENT_NAME,
            self.chat.clone(),
            Box::new(tools),
            prompt::system_prompt(),
            self.max_tool_iterations,
        )))
    }
}
