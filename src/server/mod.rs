//! HTTP server for the question page and ask API

use crate::data::{CsvSource, FetchError};
use crate::llm::LlmProvider;
use crate::prompt;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

mod page;

pub use page::INDEX_HTML;

/// Shared application state
pub struct AppState {
    pub provider: Arc<dyn LlmProvider>,
    pub source: Arc<dyn CsvSource>,
    /// Model name, reported by /health
    pub model: String,
}

/// Request for a question about a CSV file
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// CSV file name on the configured host (the page takes it from ?file=)
    pub file: String,
    pub question: String,
}

/// Response carrying the model's answer
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<crate::llm::TokenUsage>,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    model: String,
}

/// Build the router; split out from run_server so tests can drive it directly
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/ask", post(handle_ask))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::version_string(),
        model: state.model.clone(),
    })
}

async fn handle_ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> impl IntoResponse {
    let file = req.file.trim();
    let question = req.question.trim();

    if file.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "missing 'file' parameter; open the page with ?file=<name>.csv"
            })),
        )
            .into_response();
    }
    if question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "question must not be empty" })),
        )
            .into_response();
    }

    // Each failure is caught individually and surfaced as the inline message;
    // nothing is retried.
    let csv_text = match state.source.fetch(file).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("CSV fetch failed: {}", e);
            let status = match e {
                FetchError::InvalidFilename(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            };
            return (
                status,
                Json(serde_json::json!({
                    "error": format!("Error loading CSV file: {}", e)
                })),
            )
                .into_response();
        }
    };

    let messages = prompt::build_messages(&csv_text, question);

    match state.provider.chat(&messages).await {
        Ok(response) => (
            StatusCode::OK,
            Json(AskResponse {
                answer: response.text,
                usage: response.usage,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Answer generation failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": format!("Error generating the response: {}", e)
                })),
            )
                .into_response()
        }
    }
}
