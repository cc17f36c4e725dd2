//! Tool-calling chat agent

use super::openai::{AzureChatClient, ChatMessage, ToolCall, ToolChoice};
use super::tools::ToolExecutor;
use super::{Agent, AgentMessage, MessageKind};
use crate::constants::agent::USER_SOURCE;
use anyhow::{Result, bail};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// An agent that alternates model turns and tool calls until the model
/// answers in plain text.
///
/// After `max_tool_iterations` turns that requested tools, the model is asked
/// once more with tools disabled, so every run ends with a text reply.
pub struct ChatAgent {
    name: String,
    chat: AzureChatClient,
    tools: Box<dyn ToolExecutor>,
    system_prompt: String,
    max_tool_iterations: u32,
}

impl ChatAgent {
    pub fn new(
        name: impl Into<String>,
        chat: AzureChatClient,
        tools: Box<dyn ToolExecutor>,
        system_prompt: impl Into<String>,
        max_tool_iterations: u32,
    ) -> Self {
        Self {
            name: name.into(),
            chat,
            tools,
            system_prompt: system_prompt.into(),
            max_tool_iterations,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn message(&self, kind: MessageKind, content: impl Into<String>) -> AgentMessage {
        AgentMessage::new(kind, self.name.clone(), content)
    }

    async fn execute_tool_calls(
        &self,
        calls: &[ToolCall],
        cancel: &CancellationToken,
        conversation: &mut Vec<ChatMessage>,
    ) -> Result<Vec<String>> {
        let mut outputs = Vec::with_capacity(calls.len());

        for call in calls {
            if cancel.is_cancelled() {
                bail!("Agent run was cancelled");
            }

            info!("Calling tool {}", call.function.name);
            debug!("Tool arguments: {}", call.function.arguments);

            let output = match self
                .tools
                .call(&call.function.name, &call.function.arguments)
                .await
            {
                Ok(output) => output,
                Err(e) => {
                    warn!("Tool {} failed: {:#}", call.function.name, e);
                    format!("Error: {:#}", e)
                }
            };

            conversation.push(ChatMessage::tool(&call.id, &output));
            outputs.push(output);
        }

        Ok(outputs)
    }
}

fn describe_calls(calls: &[ToolCall]) -> String {
    calls
        .iter()
        .map(|call| format!("{}({})", call.function.name, call.function.arguments))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Agent for ChatAgent {
    async fn run(&self, task: &str, cancel: CancellationToken) -> Result<Vec<AgentMessage>> {
        let definitions = self.tools.definitions();
        let mut conversation = vec![
            ChatMessage::system(&self.system_prompt),
            ChatMessage::user(task),
        ];
        let mut trace = vec![AgentMessage::new(
            MessageKind::TextMessage,
            USER_SOURCE,
            task,
        )];
        let mut tool_turns = 0;

        loop {
            if cancel.is_cancelled() {
                bail!("Agent run was cancelled");
            }

            let forced = tool_turns >= self.max_tool_iterations;
            if forced {
                info!(
                    "Tool budget of {} turns spent, requesting a final answer",
                    self.max_tool_iterations
                );
            }
            let tool_choice = forced.then_some(ToolChoice::None);

            let reply = self
                .chat
                .complete(&conversation, &definitions, tool_choice)
                .await?;

            if reply.tool_calls.is_empty() || forced {
                if let Some(content) = reply.content.filter(|c| !c.trim().is_empty()) {
                    trace.push(self.message(MessageKind::TextMessage, content));
                }
                return Ok(trace);
            }

            tool_turns += 1;
            trace.push(self.message(
                MessageKind::ToolCallRequest,
                describe_calls(&reply.tool_calls),
            ));

            let calls = reply.tool_calls.clone();
            conversation.push(reply.into());

            let outputs = self
                .execute_tool_calls(&calls, &cancel, &mut conversation)
                .await?;
            trace.push(self.message(MessageKind::ToolCallExecution, outputs.join("\n")));
        }
    }
}
