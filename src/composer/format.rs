//! Output formats and their literal contracts.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Json,
    Xml,
    Text,
}

const TEXT_CONTRACT: &str = "The generated prompt must be in plain text format. The output must be ONLY the plain text prompt, without any surrounding text or explanatory phrases.";

const MARKDOWN_CONTRACT: &str = "The generated prompt MUST be valid Markdown. Use Markdown syntax for structure and clarity: use '#', '##' for headings, '*' or '-' for bullet points, and '**' for bolding key terms. The final output must be ONLY the raw Markdown content. Do NOT wrap the output in a markdown code block (```).";

const JSON_CONTRACT: &str = "The generated prompt MUST be a valid JSON object. The final output must be ONLY the raw JSON string. Do not wrap it in markdown code blocks like ```json ... ```. The top-level key MUST be descriptive and based on the user's request (e.g., 'socialMediaCalendar'). It must be a valid JSON object that can be parsed directly.";

const XML_CONTRACT: &str = "The generated prompt MUST be valid XML. The final output must be ONLY the raw XML string. Do not wrap it in markdown code blocks like ```xml ... ```. The root element MUST be descriptive and based on the user's request (e.g., '<recipeRequest>'). Do not include any text before the opening XML tag.";

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Markdown,
        OutputFormat::Json,
        OutputFormat::Xml,
        OutputFormat::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
            OutputFormat::Text => "text",
        }
    }

    /// Verbatim contract text inserted as the ADHERE TO FORMAT directive.
    pub fn contract(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => MARKDOWN_CONTRACT,
            OutputFormat::Json => JSON_CONTRACT,
            OutputFormat::Xml => XML_CONTRACT,
            OutputFormat::Text => TEXT_CONTRACT,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown format '{}'", s))
    }
}
