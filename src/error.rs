//! Domain-specific error types for prompt-architect

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Message returned to callers for every failure past validation.
pub const GENERIC_FAILURE_MESSAGE: &str = "An internal error occurred. Please try again later.";

/// Main error type for the prompt-architect service
#[derive(Error, Debug)]
pub enum PromptArchitectError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Opaque gateway failure. The cause has already been logged.
    #[error("Generation failed")]
    GenerationFailed,

    #[error("Generation cancelled")]
    Cancelled,
}

impl PromptArchitectError {
    pub fn config(message: impl Into<String>) -> Self {
        PromptArchitectError::Config {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PromptArchitectError::Validation {
            message: message.into(),
        }
    }

    /// Text safe to show the caller. Only validation messages pass through.
    pub fn public_message(&self) -> String {
        match self {
            PromptArchitectError::Validation { message } => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            PromptArchitectError::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<toml::de::Error> for PromptArchitectError {
    fn from(err: toml::de::Error) -> Self {
        PromptArchitectError::Config {
            message: err.to_string(),
        }
    }
}

/// Convert PromptArchitectError to an HTTP response
impl IntoResponse for PromptArchitectError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(json!({ "error": self.public_message() })),
        )
            .into_response()
    }
}

/// Result type alias for prompt-architect operations
pub type Result<T> = std::result::Result<T, PromptArchitectError>;
