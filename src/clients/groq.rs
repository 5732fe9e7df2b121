use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::clients::traits::{ChatRequest, ChatResponse, CompletionProvider, ProviderError};

pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Groq chat-completions client (OpenAI-compatible wire format).
#[derive(Clone, Debug)]
pub struct GroqProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: Client,
}

impl GroqProvider {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        let endpoint = endpoint.into();
        // Accept a base URL as well as the full completions path
        let endpoint = if endpoint.ends_with("/chat/completions") {
            endpoint
        } else {
            format!("{}/chat/completions", endpoint.trim_end_matches('/'))
        };

        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("GROQ_API_KEY not set".to_string()))?;

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "groq"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_completions_path() {
        let p = GroqProvider::new("http://127.0.0.1:9/v1/", DEFAULT_MODEL, None, None).unwrap();
        assert_eq!(p.endpoint(), "http://127.0.0.1:9/v1/chat/completions");

        let p = GroqProvider::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, None, None).unwrap();
        assert_eq!(p.endpoint(), DEFAULT_ENDPOINT);
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        let p = GroqProvider::new("http://127.0.0.1:9", DEFAULT_MODEL, Some("  ".to_string()), None)
            .unwrap();
        let err = p
            .complete(&ChatRequest::new(DEFAULT_MODEL, "s", "u"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
