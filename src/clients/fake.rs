//! Fake completion provider for tests and offline runs.
//!
//! Returns a scripted outcome and records every request it receives, so tests
//! can assert on exactly what would have gone over the wire.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::clients::traits::{ChatRequest, ChatResponse, CompletionProvider, ProviderError};

#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Content(String),
    /// A response with an empty `choices` list.
    NoChoices,
    ApiError { status: u16, message: String },
    Malformed(String),
}

#[derive(Debug)]
pub struct FakeProvider {
    outcome: FakeOutcome,
    delay: Option<Duration>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::new(FakeOutcome::Content("# Generated Prompt".to_string()))
    }
}

impl FakeProvider {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            delay: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_content(content: &str) -> Self {
        Self::new(FakeOutcome::Content(content.to_string()))
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self::new(FakeOutcome::ApiError {
            status,
            message: message.to_string(),
        })
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.outcome {
            FakeOutcome::Content(text) => Ok(ChatResponse::with_content(text)),
            FakeOutcome::NoChoices => Ok(ChatResponse::default()),
            FakeOutcome::ApiError { status, message } => Err(ProviderError::ApiError {
                status: *status,
                message: message.clone(),
            }),
            FakeOutcome::Malformed(body) => Err(ProviderError::ParseError(format!(
                "unexpected body: {}",
                body
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
