use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;

use crate::clients::groq::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::error::{PromptArchitectError, Result};

pub const DEFAULT_LOG_LEVEL: &str = "prompt_architect=info,tower_http=info";

/// Main configuration structure loaded from prompt_architect.toml and environment variables
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

/// Completion API settings. Sampling parameters are fixed and not configurable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// "groq" or "fake"
    pub provider: String,
    pub model: String,
    pub endpoint: String,
}

/// Runtime configuration loaded from environment variables
#[derive(Clone, Default)]
pub struct RuntimeConfig {
    pub api_key: Option<String>,
    pub request_timeout_ms: Option<u64>,
    pub log_level: String,
}

// Never print the credential
impl fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8787"
                .parse()
                .expect("default bind address should parse"),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            completion: CompletionConfig::default(),
            runtime: RuntimeConfig {
                log_level: DEFAULT_LOG_LEVEL.to_string(),
                ..Default::default()
            },
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: lookup("GROQ_API_KEY").filter(|v| !v.trim().is_empty()),
            request_timeout_ms: lookup("PROMPT_ARCHITECT_REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Config {
    /// Load the `.env` file named by PROMPT_ARCHITECT_ENV_FILE, or `./.env`.
    /// Variables already set in the process win.
    pub fn load_env_file() {
        if let Ok(env_path) = std::env::var("PROMPT_ARCHITECT_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }
    }

    /// Load configuration from TOML file and environment variables
    /// Uses PROMPT_ARCHITECT_CONFIG environment variable or defaults to "prompt_architect.toml"
    ///
    /// Emits warnings through `tracing`, so install the subscriber first.
    pub fn load() -> Result<Self> {
        Self::load_env_file();

        let config_path = std::env::var("PROMPT_ARCHITECT_CONFIG")
            .unwrap_or_else(|_| "prompt_architect.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.runtime = RuntimeConfig {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            ..Default::default()
        };
        Ok(config)
    }

    /// Apply env-first overrides for file-backed settings
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = lookup("PROMPT_ARCHITECT_BIND") {
            match bind.parse::<SocketAddr>() {
                Ok(addr) => self.server.bind = addr,
                Err(_) => tracing::warn!("Ignoring unparseable PROMPT_ARCHITECT_BIND '{}'", bind),
            }
        }
        if let Some(provider) = lookup("PROMPT_ARCHITECT_PROVIDER") {
            self.completion.provider = provider;
        }
        if let Some(model) = lookup("PROMPT_ARCHITECT_MODEL") {
            self.completion.model = model;
        }
        if let Some(endpoint) = lookup("PROMPT_ARCHITECT_ENDPOINT") {
            tracing::debug!("PROMPT_ARCHITECT_ENDPOINT env override applied");
            self.completion.endpoint = endpoint;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.completion.provider.as_str() {
            "groq" | "fake" => {}
            other => {
                return Err(PromptArchitectError::config(format!(
                    "Unknown completion provider '{}'",
                    other
                )));
            }
        }
        if !self.completion.endpoint.starts_with("http://")
            && !self.completion.endpoint.starts_with("https://")
        {
            return Err(PromptArchitectError::config(format!(
                "Completion endpoint '{}' must start with http:// or https://",
                self.completion.endpoint
            )));
        }
        if self.completion.model.trim().is_empty() {
            return Err(PromptArchitectError::config("Completion model must not be empty"));
        }
        if self.completion.provider == "groq" && self.runtime.api_key.is_none() {
            tracing::warn!("GROQ_API_KEY is not set; every generation will fail");
        }
        Ok(())
    }
}
