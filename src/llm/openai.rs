// src/llm/openai.rs
//! Chat Completions client for OpenAI and OpenAI-compatible services.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::agent::conversation::{ConversationMessage, ToolCallRequest};
use crate::config::FinsentConfig;
use crate::llm::{AssistantTurn, Provider};
use crate::tools::ToolSpec;

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(config: &FinsentConfig) -> Result<Self> {
        if config.openai_api_key.is_empty() {
            anyhow::bail!("OPENAI_API_KEY is not set");
        }
        // One deadline covers the whole request, connect through body.
        let client = Client::builder()
            .timeout(Duration::from_secs(config.openai_timeout))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            api_key: config.openai_api_key.clone(),
            url: config.chat_completions_url(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        tools: &[ToolSpec],
    ) -> Result<AssistantTurn> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            tools: if tools.is_empty() { None } else { Some(tools) },
            tool_choice: if tools.is_empty() { None } else { Some("auto") },
        };

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("(failed to read body: {})", e));
            anyhow::bail!("Chat completions error {}: {}", status, text);
        }

        let result: ChatCompletionResponse = response.json().await?;
        let choice = result
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No choices in response"))?;

        Ok(AssistantTurn {
            content: choice.message.content.unwrap_or_default(),
            tool_calls: choice.message.tool_calls.unwrap_or_default(),
        })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// ============================================================================
// Chat Completions wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ConversationMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolSpec]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCallRequest>>,
}
