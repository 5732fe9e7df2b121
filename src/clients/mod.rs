pub mod fake;
pub mod groq;
pub mod traits;

pub use fake::{FakeOutcome, FakeProvider};
pub use groq::GroqProvider;
pub use traits::{ChatRequest, ChatResponse, CompletionProvider, ProviderError};

use crate::config::Config;
use crate::error::{PromptArchitectError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Build the provider named in the configuration.
pub fn create_provider(config: &Config) -> Result<Arc<dyn CompletionProvider>> {
    match config.completion.provider.as_str() {
        "groq" => {
            let provider = GroqProvider::new(
                config.completion.endpoint.clone(),
                config.completion.model.clone(),
                config.runtime.api_key.clone(),
                config.runtime.request_timeout_ms.map(Duration::from_millis),
            )
            .map_err(|e| PromptArchitectError::config(e.to_string()))?;
            Ok(Arc::new(provider))
        }
        "fake" => Ok(Arc::new(FakeProvider::default())),
        other => Err(PromptArchitectError::config(format!(
            "Unknown completion provider: {}",
            other
        ))),
    }
}
