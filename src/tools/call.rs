// src/tools/call.rs
//! Typed tool invocations. The reasoning service hands back a tool name and a
//! JSON arguments object; `ToolCall::parse` turns that pair into a closed enum
//! so the executor never dispatches on raw strings.

use serde::Deserialize;
use thiserror::Error;

fn default_transcript_limit() -> i64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentimentSummaryArgs {
    pub bank: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptsArgs {
    pub bank: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default = "default_transcript_limit")]
    pub limit: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptSentencesArgs {
    pub transcript_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSentencesArgs {
    pub keyword: String,
    pub bank: Option<String>,
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DivergenceArgs {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Every tool the analyst can invoke, with its arguments already validated.
#[derive(Debug, Clone)]
pub enum ToolCall {
    SentimentSummary(SentimentSummaryArgs),
    Transcripts(TranscriptsArgs),
    TranscriptSentences(TranscriptSentencesArgs),
    SearchSentences(SearchSentencesArgs),
    Divergence(DivergenceArgs),
}

fn typed_args<T: for<'de> Deserialize<'de>>(
    tool: &'static str,
    args: &serde_json::Value,
) -> Result<T, ToolError> {
    serde_json::from_value(args.clone())
        .map_err(|source| ToolError::InvalidArguments { tool, source })
}

impl ToolCall {
    /// Maps a (name, arguments) pair from the model into a typed call.
    /// An unrecognized name or a schema violation is a `ToolError`, which the
    /// executor reports back to the model instead of failing the exchange.
    pub fn parse(name: &str, args: &serde_json::Value) -> Result<Self, ToolError> {
        match name {
            "get_sentiment_summary" => {
                Ok(Self::SentimentSummary(typed_args("get_sentiment_summary", args)?))
            }
            "get_transcripts" => Ok(Self::Transcripts(typed_args("get_transcripts", args)?)),
            "get_transcript_sentences" => Ok(Self::TranscriptSentences(typed_args(
                "get_transcript_sentences",
                args,
            )?)),
            "search_sentences" => {
                Ok(Self::SearchSentences(typed_args("search_sentences", args)?))
            }
            "get_divergence" => Ok(Self::Divergence(typed_args("get_divergence", args)?)),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SentimentSummary(_) => "get_sentiment_summary",
            Self::Transcripts(_) => "get_transcripts",
            Self::TranscriptSentences(_) => "get_transcript_sentences",
            Self::SearchSentences(_) => "search_sentences",
            Self::Divergence(_) => "get_divergence",
        }
    }
}
