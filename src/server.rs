//! HTTP front-end.
//!
//! `POST /api/chat` takes `{"message": ..., "history": [[user, assistant], ...]}`
//! and answers `{"reply": ...}`. Each request runs its own turn against a
//! shared [`Assistant`]; the only state shared between requests is the
//! ledger files the tools append to.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::agent::Assistant;
use crate::message::ChatTurn;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Create the router with the chat and health endpoints.
pub fn create_router(assistant: Arc<Assistant>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat))
        .with_state(assistant)
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "ok"
}

async fn chat(
    State(assistant): State<Arc<Assistant>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    if request.message.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "message must not be empty".to_string()));
    }
    let reply = assistant.reply(&request.message, &request.history).await;
    Ok(Json(ChatResponse { reply }))
}

/// Run the HTTP server until Ctrl+C.
pub async fn run_server(assistant: Arc<Assistant>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(assistant);

    let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C. If the handler cannot be installed the server keeps
/// running until the process is killed.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutting down"),
        Err(e) => {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
