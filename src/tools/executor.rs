// src/tools/executor.rs
//! Runs typed tool calls against the sentiment store and serializes the
//! results for the reasoning service. Execution never surfaces an error to
//! the caller: unknown tools, schema violations, and store failures all come
//! back as an `{"error": ...}` payload the model can read and recover from.

use anyhow::Result;
use serde_json::{json, Value};
use tracing::warn;

use crate::store::SentimentStore;
use crate::tools::call::ToolCall;
use crate::tools::divergence::divergence_series;

/// Sentence rows handed to the model per transcript. Full transcripts go over
/// the HTTP surface uncapped; the model gets enough to explain a score.
const SENTENCE_PAYLOAD_LIMIT: i64 = 50;

#[derive(Clone)]
pub struct ToolExecutor {
    store: SentimentStore,
}

impl ToolExecutor {
    pub fn new(store: SentimentStore) -> Self {
        Self { store }
    }

    /// Executes one (name, arguments) pair from the model and returns the
    /// payload string for its tool message.
    pub async fn execute(&self, name: &str, args: &Value) -> String {
        let call = match ToolCall::parse(name, args) {
            Ok(call) => call,
            Err(err) => {
                warn!("Rejected tool call {}: {}", name, err);
                return json!({"error": err.to_string()}).to_string();
            }
        };
        match self.run(call).await {
            Ok(payload) => payload.to_string(),
            Err(err) => {
                warn!("Tool {} failed: {}", name, err);
                json!({"error": err.to_string()}).to_string()
            }
        }
    }

    async fn run(&self, call: ToolCall) -> Result<Value> {
        match call {
            ToolCall::SentimentSummary(args) => {
                let rows = self
                    .store
                    .sentiment_summary(
                        &args.bank,
                        args.start_date.as_deref(),
                        args.end_date.as_deref(),
                    )
                    .await?;
                Ok(serde_json::to_value(rows)?)
            }
            ToolCall::Transcripts(args) => {
                let rows = self
                    .store
                    .transcripts(
                        args.bank.as_deref(),
                        args.start_date.as_deref(),
                        args.end_date.as_deref(),
                        args.limit,
                    )
                    .await?;
                // Titles are display metadata for the HTTP surface; the model
                // works from ids, dates, and scores.
                let payload: Vec<Value> = rows
                    .iter()
                    .map(|row| {
                        json!({
                            "id": row.id,
                            "bank": row.bank,
                            "date": row.date,
                            "sentiment": row.sentiment,
                            "sentence_count": row.sentence_count,
                        })
                    })
                    .collect();
                Ok(Value::Array(payload))
            }
            ToolCall::TranscriptSentences(args) => {
                let rows = self
                    .store
                    .transcript_sentences(args.transcript_id, Some(SENTENCE_PAYLOAD_LIMIT))
                    .await?;
                let payload: Vec<Value> = rows
                    .iter()
                    .map(|row| {
                        json!({
                            "text": row.text,
                            "score": row.score,
                            "impact": row.impact,
                            "topic": row.topic,
                            "reasoning": row.reasoning,
                        })
                    })
                    .collect();
                Ok(Value::Array(payload))
            }
            ToolCall::SearchSentences(args) => {
                let rows = self
                    .store
                    .search_sentences(&args.keyword, args.bank.as_deref(), args.topic.as_deref())
                    .await?;
                Ok(serde_json::to_value(rows)?)
            }
            ToolCall::Divergence(args) => {
                let rows = self
                    .store
                    .daily_stance(args.start_date.as_deref(), args.end_date.as_deref())
                    .await?;
                Ok(serde_json::to_value(divergence_series(&rows))?)
            }
        }
    }
}
