//! Instruction composer: builds the exact text sent to the completion model.
//!
//! Composition is pure and deterministic. Validation of the user's input
//! happens once, when a [`GenerationRequest`] is constructed, so that
//! [`compose`] itself cannot fail.

pub mod format;
pub mod fragments;

pub use format::OutputFormat;

use crate::error::{PromptArchitectError, Result};
use crate::frameworks::FrameworkId;
use serde::{Deserialize, Serialize};

pub const EMPTY_INPUT_MESSAGE: &str = "Please provide some input to generate a prompt.";

/// The six labelled fields of structured mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredPrompt {
    pub role: String,
    pub task: String,
    pub format: String,
    pub example: String,
    pub input: String,
    pub context: String,
}

impl StructuredPrompt {
    /// Labelled concatenation, one field per line, trimmed as a whole.
    pub fn render(&self) -> String {
        let lines = [
            ("Role", &self.role),
            ("Task", &self.task),
            ("Format", &self.format),
            ("Example", &self.example),
            ("Input", &self.input),
            ("Context", &self.context),
        ];
        lines
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

/// What the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    Simple(String),
    Structured(StructuredPrompt),
}

impl PromptInput {
    /// User content as sent to the completion API.
    pub fn user_content(&self) -> String {
        match self {
            PromptInput::Simple(text) => text.trim().to_string(),
            PromptInput::Structured(fields) => fields.render(),
        }
    }

    /// Empty when the user content is blank after trimming. Structured
    /// input always carries its labels, so it is never empty.
    pub fn is_empty(&self) -> bool {
        self.user_content().trim().is_empty()
    }
}

/// One validated generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    input: PromptInput,
    pub format: OutputFormat,
    pub framework: FrameworkId,
}

impl GenerationRequest {
    pub fn new(input: PromptInput, format: OutputFormat, framework: FrameworkId) -> Result<Self> {
        if input.is_empty() {
            return Err(PromptArchitectError::validation(EMPTY_INPUT_MESSAGE));
        }
        Ok(Self {
            input,
            format,
            framework,
        })
    }

    pub fn simple(text: impl Into<String>, format: OutputFormat, framework: FrameworkId) -> Result<Self> {
        Self::new(PromptInput::Simple(text.into()), format, framework)
    }

    pub fn input(&self) -> &PromptInput {
        &self.input
    }
}

/// The payload handed to the completion gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedInstruction {
    pub system_instruction: String,
    pub user_content: String,
}

/// Assemble the system instruction for a framework and format.
pub fn system_instruction(framework: FrameworkId, format: OutputFormat) -> String {
    [
        fragments::IDENTITY.to_string(),
        fragments::hygiene_rules(),
        fragments::core_directives(framework, format),
        fragments::CLOSING.to_string(),
    ]
    .join("\n")
}

pub fn compose(request: &GenerationRequest) -> ComposedInstruction {
    ComposedInstruction {
        system_instruction: system_instruction(request.framework, request.format),
        user_content: request.input.user_content(),
    }
}
