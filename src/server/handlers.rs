// src/server/handlers.rs
//! HTTP handlers for the chat exchange and the dashboard queries.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::agent::{AgentError, AgentReply, HistoryMessage};
use crate::store::{SentenceRow, TranscriptRow};
use crate::tools::{divergence_series, DivergenceEntry};

/// Health check and status endpoint
pub async fn status_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "finsent",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.model,
    }))
}

// ============================================================================
// Chat
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryMessage>,
}

/// One analyst exchange. Tool-level failures come back inside the answer;
/// only provider faults and corrupt tool arguments surface as HTTP errors.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<AgentReply>, (StatusCode, String)> {
    let reply = state
        .agent
        .run_agent(&request.message, &request.history)
        .await
        .map_err(|e| {
            let status = match &e {
                AgentError::Reasoning(_) => StatusCode::BAD_GATEWAY,
                AgentError::BadToolArguments { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })?;
    Ok(Json(reply))
}

// ============================================================================
// Dashboard queries
// ============================================================================

fn default_transcripts_limit() -> i64 {
    100
}

#[derive(Debug, Deserialize)]
pub struct TranscriptsQuery {
    pub bank: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default = "default_transcripts_limit")]
    pub limit: i64,
}

/// Transcript list endpoint, newest first
pub async fn transcripts_handler(
    State(state): State<AppState>,
    Query(params): Query<TranscriptsQuery>,
) -> Result<Json<Vec<TranscriptRow>>, (StatusCode, String)> {
    let rows = state
        .store
        .transcripts(
            params.bank.as_deref(),
            params.start_date.as_deref(),
            params.end_date.as_deref(),
            params.limit,
        )
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(rows))
}

/// Full sentence-level breakdown for one transcript, uncapped
pub async fn transcript_sentences_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<SentenceRow>>, (StatusCode, String)> {
    let rows = state
        .store
        .transcript_sentences(id, None)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct DivergenceQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Fed-vs-BoC divergence series endpoint
pub async fn divergence_handler(
    State(state): State<AppState>,
    Query(params): Query<DivergenceQuery>,
) -> Result<Json<Vec<DivergenceEntry>>, (StatusCode, String)> {
    let rows = state
        .store
        .daily_stance(params.start_date.as_deref(), params.end_date.as_deref())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(divergence_series(&rows)))
}
