//! HTTP transport for prompt-architect
//!
//! Axum router exposing `POST /generate`, plus plain JSON `GET /frameworks`
//! and a `GET /health` probe.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::composer::{GenerationRequest, OutputFormat, PromptInput, StructuredPrompt};
use crate::config::Config;
use crate::error::{PromptArchitectError, Result};
use crate::frameworks::{FRAMEWORKS, FrameworkId};
use crate::gateway::CompletionGateway;

/// Shared state for HTTP server
#[derive(Clone)]
pub struct HttpState {
    pub gateway: Arc<CompletionGateway>,
}

/// Body of `POST /generate`.
///
/// `frameworkInstruction` and `formatInstructions` are accepted for
/// compatibility with older clients but ignored; directives are always
/// rebuilt from the server's own tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub user_input: Option<String>,
    #[serde(default)]
    pub structured: Option<StructuredPrompt>,
    pub format: OutputFormat,
    pub framework_id: FrameworkId,
    #[serde(default)]
    pub framework_instruction: Option<String>,
    #[serde(default)]
    pub format_instructions: Option<HashMap<String, String>>,
}

impl GenerateBody {
    pub fn into_request(self) -> Result<GenerationRequest> {
        let input = match (self.user_input, self.structured) {
            (Some(_), Some(_)) => {
                return Err(PromptArchitectError::validation(
                    "Provide either userInput or structured, not both.",
                ));
            }
            (_, Some(fields)) => PromptInput::Structured(fields),
            (text, None) => PromptInput::Simple(text.unwrap_or_default()),
        };
        GenerationRequest::new(input, self.format, self.framework_id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub prompt: String,
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// Framework and format catalog
pub async fn frameworks_handler() -> impl IntoResponse {
    let formats: Vec<&str> = OutputFormat::ALL.iter().map(|f| f.as_str()).collect();
    Json(json!({
        "frameworks": FRAMEWORKS,
        "formats": formats,
    }))
}

pub async fn generate_handler(
    State(state): State<HttpState>,
    payload: std::result::Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<GenerateResponse>> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!("rejected /generate body: {}", rejection.body_text());
        PromptArchitectError::validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        ))
    })?;

    if body.framework_instruction.is_some() || body.format_instructions.is_some() {
        tracing::debug!("ignoring client-supplied instructions");
    }

    let request = body.into_request()?;
    tracing::info!(
        framework = %request.framework,
        format = %request.format,
        structured = matches!(request.input(), PromptInput::Structured(_)),
        "generate request"
    );

    let prompt = state.gateway.generate(&request).await?;
    Ok(Json(GenerateResponse { prompt }))
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method Not Allowed" })),
    )
}

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/frameworks", get(frameworks_handler))
        .route(
            "/generate",
            post(generate_handler).fallback(method_not_allowed),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

/// Bind the listener and report the address actually bound (port 0 resolves here).
pub async fn bind_listener(addr: SocketAddr) -> anyhow::Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP listener: {}", e))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| anyhow::anyhow!("Failed to read bound address: {}", e))?;
    Ok((listener, local_addr))
}

/// Start the HTTP server
pub async fn start_http_server(config: Arc<Config>, gateway: Arc<CompletionGateway>) -> anyhow::Result<()> {
    let app = router(HttpState { gateway });

    let (listener, local_addr) = bind_listener(config.server.bind).await?;
    tracing::info!(
        "Starting HTTP server on {} (provider={}, model={})",
        local_addr,
        config.completion.provider,
        config.completion.model
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: serde_json::Value) -> GenerateBody {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn decodes_original_client_payload() {
        let b = body(json!({
            "userInput": "a 30-day workout plan",
            "format": "markdown",
            "frameworkId": "race",
            "frameworkInstruction": "ignored",
            "formatInstructions": {"markdown": "ignored"}
        }));
        let request = b.into_request().unwrap();
        assert_eq!(request.framework, FrameworkId::Race);
        assert_eq!(request.format, OutputFormat::Markdown);
    }

    #[test]
    fn rejects_unknown_tokens() {
        let unknown_format = serde_json::from_value::<GenerateBody>(json!({
            "userInput": "x", "format": "yaml", "frameworkId": "race"
        }));
        assert!(unknown_format.is_err());
        let unknown_framework = serde_json::from_value::<GenerateBody>(json!({
            "userInput": "x", "format": "json", "frameworkId": "RACE"
        }));
        assert!(unknown_framework.is_err());
    }

    #[test]
    fn rejects_both_input_modes() {
        let b = body(json!({
            "userInput": "x",
            "structured": {"role": "r"},
            "format": "text",
            "frameworkId": "standard"
        }));
        assert!(matches!(
            b.into_request(),
            Err(PromptArchitectError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn ephemeral_bind_reports_real_port() {
        let (listener, addr) = bind_listener("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        assert_ne!(addr.port(), 0);
        assert_eq!(listener.local_addr().unwrap(), addr);
    }

    #[test]
    fn missing_input_is_validation_error() {
        let b = body(json!({"format": "text", "frameworkId": "standard"}));
        assert!(matches!(
            b.into_request(),
            Err(PromptArchitectError::Validation { .. })
        ));
    }
}
