// src/server/mod.rs
//! HTTP server for the dashboard and chat clients.
//!
//! Endpoints:
//! - GET  /api/status - health check
//! - POST /api/chat - one analyst exchange
//! - GET  /api/transcripts - transcript list with aggregate sentiment
//! - GET  /api/transcripts/{id}/sentences - sentence-level breakdown
//! - GET  /api/divergence - Fed-vs-BoC divergence series

mod handlers;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::agent::AgentContext;
use crate::config::FinsentConfig;
use crate::store::SentimentStore;

// ============================================================================
// Server State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<AgentContext>,
    pub store: SentimentStore,
    pub model: String,
}

// ============================================================================
// Routes
// ============================================================================

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/status", get(handlers::status_handler))
        .route("/api/chat", post(handlers::chat_handler))
        .route("/api/transcripts", get(handlers::transcripts_handler))
        .route(
            "/api/transcripts/{id}/sentences",
            get(handlers::transcript_sentences_handler),
        )
        .route("/api/divergence", get(handlers::divergence_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP server
pub async fn run(
    config: &FinsentConfig,
    agent: Arc<AgentContext>,
    store: SentimentStore,
) -> Result<()> {
    let state = AppState {
        agent,
        store,
        model: config.model.clone(),
    };
    let app = create_router(state);
    let addr = config.bind_address();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
