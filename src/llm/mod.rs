// src/llm/mod.rs
//! Reasoning service abstraction. The agent sees one seam: conversation in,
//! assistant turn out, where a turn is either free text or a batch of
//! tool-call requests.

mod openai;

pub use openai::OpenAiProvider;

use anyhow::Result;
use async_trait::async_trait;

use crate::agent::conversation::{ConversationMessage, ToolCallRequest};
use crate::tools::ToolSpec;

/// One assistant turn from the reasoning service.
#[derive(Debug, Clone, Default)]
pub struct AssistantTurn {
    pub content: String,
    pub tool_calls: Vec<ToolCallRequest>,
}

/// Chat-completion backend. An empty `tools` slice disables function calling
/// for that request.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        tools: &[ToolSpec],
    ) -> Result<AssistantTurn>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
