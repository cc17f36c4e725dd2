//! Azure OpenAI chat completions client

use crate::config::AzureConfig;
use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One entry in the conversation sent to the model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Tool {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub r#type: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments, exactly as produced by the model
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub r#type: String,
    pub function: FunctionDescription,
}

impl ToolDefinition {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            r#type: "function".to_string(),
            function: FunctionDescription {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDescription {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    Auto,
    None,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [ToolDefinition],
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
}

fn no_tools(tools: &&[ToolDefinition]) -> bool {
    tools.is_empty()
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantReply,
}

/// The model's reply for one turn
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AssistantReply {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

impl From<AssistantReply> for ChatMessage {
    fn from(reply: AssistantReply) -> Self {
        ChatMessage::Assistant {
            content: reply.content,
            tool_calls: reply.tool_calls,
        }
    }
}

/// Client for one Azure OpenAI deployment
#[derive(Clone)]
pub struct AzureChatClient {
    client: Client,
    endpoint: String,
    deployment: String,
    api_key: String,
    api_version: String,
    model: String,
}

impl AzureChatClient {
    pub fn new(
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
        api_key: impl Into<String>,
        api_version: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            deployment: deployment.into(),
            api_key: api_key.into(),
            api_version: api_version.into(),
            model: model.into(),
        }
    }

    /// Build a client from validated configuration
    pub fn from_config(config: &AzureConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .as_deref()
            .context("Azure endpoint is not configured")?;
        let deployment = config
            .deployment
            .as_deref()
            .context("Azure deployment is not configured")?;
        let api_key = config
            .api_key
            .as_deref()
            .context("Azure API key is not configured")?;

        Ok(Self::new(
            endpoint,
            deployment,
            api_key,
            &config.api_version,
            &config.model,
        ))
    }

    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }

    /// Run one chat completion turn
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
        tool_choice: Option<ToolChoice>,
    ) -> Result<AssistantReply> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            tools,
            tool_choice,
        };

        debug!(
            "Chat completion request: {} messages, {} tools",
            messages.len(),
            tools.len()
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send chat completion request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .context("Failed to read error response body")?;
            return Err(anyhow!(
                "Azure OpenAI API error: {} - {}",
                status,
                error_text
            ));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| anyhow!("Chat completion response contained no choices"))
    }
}

impl std::fmt::Debug for AzureChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureChatClient")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("api_key", &"***")
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .finish()
    }
}
