// src/agent/controller.rs
//! The bounded tool-calling loop. One exchange alternates completions and
//! tool rounds until the model answers in prose or the budget runs out.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::agent::conversation::{ConversationMessage, HistoryMessage, ToolCallTrace};
use crate::agent::error::AgentError;
use crate::agent::prompt::SYSTEM_PROMPT;
use crate::llm::Provider;
use crate::store::SentimentStore;
use crate::tools::{tool_specs, ToolExecutor, ToolSpec};

/// Tool rounds per exchange. After the budget is spent, one final completion
/// runs without tools so the user always gets prose back.
pub const MAX_ITERATIONS: usize = 5;

/// Everything an exchange needs: the provider handle, the executor bound to
/// the store, and the advertised tool registry. Built once at startup.
pub struct AgentContext {
    provider: Arc<dyn Provider>,
    executor: ToolExecutor,
    tool_specs: Vec<ToolSpec>,
}

/// The answer plus the trace of tool calls made along the way.
#[derive(Debug, Clone, Serialize)]
pub struct AgentReply {
    pub response: String,
    pub tool_calls_made: Vec<ToolCallTrace>,
}

impl AgentContext {
    pub fn new(provider: Arc<dyn Provider>, store: SentimentStore) -> Self {
        Self {
            provider,
            executor: ToolExecutor::new(store),
            tool_specs: tool_specs(),
        }
    }

    pub async fn run_agent(
        &self,
        user_message: &str,
        history: &[HistoryMessage],
    ) -> Result<AgentReply, AgentError> {
        debug!(
            "Starting {} exchange with {} history messages",
            self.provider.name(),
            history.len()
        );

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ConversationMessage::system(SYSTEM_PROMPT));
        for msg in history {
            messages.push(ConversationMessage {
                role: msg.role,
                content: msg.content.clone(),
                tool_calls: Vec::new(),
                tool_call_id: None,
            });
        }
        messages.push(ConversationMessage::user(user_message));

        let mut tool_calls_made: Vec<ToolCallTrace> = Vec::new();

        for round in 0..MAX_ITERATIONS {
            let turn = self.provider.complete(&messages, &self.tool_specs).await?;
            messages.push(ConversationMessage::assistant(
                turn.content.clone(),
                turn.tool_calls.clone(),
            ));

            if turn.tool_calls.is_empty() {
                info!(
                    "{} answered after {} rounds, {} tool calls",
                    self.provider.name(),
                    round + 1,
                    tool_calls_made.len()
                );
                return Ok(AgentReply {
                    response: turn.content,
                    tool_calls_made,
                });
            }

            for call in &turn.tool_calls {
                // Arguments that are not JSON at all mean the transcript is
                // corrupt; that ends the exchange rather than one tool round.
                let args: serde_json::Value = serde_json::from_str(&call.function.arguments)
                    .map_err(|source| AgentError::BadToolArguments {
                        name: call.function.name.clone(),
                        source,
                    })?;
                tool_calls_made.push(ToolCallTrace {
                    tool: call.function.name.clone(),
                    args: args.clone(),
                });

                debug!("Executing tool {}", call.function.name);
                let result = self.executor.execute(&call.function.name, &args).await;
                messages.push(ConversationMessage::tool(call.id.clone(), result));
            }
        }

        // Budget spent. One last completion without tools forces prose.
        info!(
            "{} exhausted the tool budget after {} rounds, requesting final answer",
            self.provider.name(),
            MAX_ITERATIONS
        );
        let turn = self.provider.complete(&messages, &[]).await?;
        Ok(AgentReply {
            response: turn.content,
            tool_calls_made,
        })
    }
}
