pub mod clients;
pub mod composer;
pub mod config;
pub mod error;
pub mod frameworks;
pub mod gateway;
pub mod http;

pub use composer::{ComposedInstruction, GenerationRequest, OutputFormat, PromptInput, compose};
pub use config::Config;
pub use error::{PromptArchitectError, Result};
pub use frameworks::FrameworkId;
pub use gateway::CompletionGateway;
