//! Completion gateway: the single network boundary of the service.
//!
//! Every failure past validation collapses into
//! [`PromptArchitectError::GenerationFailed`]. The underlying cause is logged
//! here and nowhere else, so callers never see transport or credential detail.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::clients::{ChatRequest, CompletionProvider};
use crate::composer::{ComposedInstruction, GenerationRequest, compose};
use crate::error::{PromptArchitectError, Result};

/// Lifecycle of one generation attempt.
///
/// `Succeeded` and `Failed` persist until the next attempt starts; only a
/// cancelled attempt returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Composing,
    AwaitingResponse,
    Succeeded,
    Failed,
}

/// Hands out generation sequence numbers; only the newest attempt's result is kept.
#[derive(Debug, Default)]
pub struct GenerationTracker {
    latest: AtomicU64,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new attempt, superseding all earlier ones.
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }
}

pub struct CompletionGateway {
    provider: Arc<dyn CompletionProvider>,
    state: watch::Sender<GenerationState>,
}

impl CompletionGateway {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        let (state, _) = watch::channel(GenerationState::Idle);
        Self { provider, state }
    }

    pub fn provider(&self) -> &Arc<dyn CompletionProvider> {
        &self.provider
    }

    /// Observe state transitions. Concurrent attempts share the channel, last write wins.
    pub fn subscribe(&self) -> watch::Receiver<GenerationState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> GenerationState {
        *self.state.borrow()
    }

    fn transition(&self, attempt: Uuid, next: GenerationState) {
        debug!(%attempt, state = ?next, "generation state");
        self.state.send_replace(next);
    }

    /// One outbound call. An empty choice list is an empty prompt, not an error.
    pub async fn complete(&self, instruction: &ComposedInstruction) -> Result<String> {
        let request = ChatRequest::new(
            self.provider.model_name(),
            &instruction.system_instruction,
            &instruction.user_content,
        );
        match self.provider.complete(&request).await {
            Ok(response) => {
                if response.choices.is_empty() {
                    info!(
                        provider = self.provider.provider_name(),
                        "completion returned no choices; treating as empty prompt"
                    );
                }
                Ok(response.first_content())
            }
            Err(e) => {
                error!(
                    provider = self.provider.provider_name(),
                    model = self.provider.model_name(),
                    "completion call failed: {}",
                    e
                );
                Err(PromptArchitectError::GenerationFailed)
            }
        }
    }

    /// Compose the instruction and run the completion.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let attempt = Uuid::new_v4();
        self.transition(attempt, GenerationState::Composing);
        let instruction = compose(request);
        debug!(
            %attempt,
            framework = %request.framework,
            format = %request.format,
            instruction_len = instruction.system_instruction.len(),
            "instruction composed"
        );

        self.transition(attempt, GenerationState::AwaitingResponse);
        let result = self.complete(&instruction).await;
        let terminal = if result.is_ok() {
            GenerationState::Succeeded
        } else {
            GenerationState::Failed
        };
        self.transition(attempt, terminal);
        result
    }

    /// Like [`generate`](Self::generate) but drops the in-flight call when `token` fires.
    pub async fn generate_cancellable(
        &self,
        request: &GenerationRequest,
        token: &CancellationToken,
    ) -> Result<String> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("generation cancelled by caller");
                self.state.send_replace(GenerationState::Idle);
                Err(PromptArchitectError::Cancelled)
            }
            result = self.generate(request) => result,
        }
    }

    /// Run a generation and return its result only if no newer attempt started meanwhile.
    pub async fn generate_latest(
        &self,
        tracker: &GenerationTracker,
        request: &GenerationRequest,
    ) -> Option<Result<String>> {
        let seq = tracker.begin();
        let result = self.generate(request).await;
        if tracker.is_current(seq) {
            Some(result)
        } else {
            debug!(seq, "discarding superseded generation result");
            None
        }
    }
}
