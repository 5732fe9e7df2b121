//! Named text fragments that make up the system instruction.
//!
//! Each fragment is fixed text except the framework and format slots, which
//! are filled from the closed catalogs. Fragments are joined with newlines in
//! the order [`IDENTITY`], [`hygiene_rules`], [`core_directives`], [`CLOSING`].

use super::format::OutputFormat;
use crate::frameworks::FrameworkId;

pub const SECTION_RULE: &str = "---";

pub const IDENTITY: &str = "You are the Prompt Architect, a specialized AI that transforms simple user ideas into high-quality, structured, and detailed prompts ready for another AI.\nYour single, critical task is to take the user's input and expand it into a complete, ready-to-use prompt, formatted according to their request.";

pub const HYGIENE_HEADING: &str = "### ABSOLUTE RULES FOR YOUR OUTPUT ---\nYour response MUST be ONLY the raw, unadorned prompt. Failure to follow these rules will result in an invalid output.";

pub const HYGIENE_RULES: [&str; 4] = [
    "**NO WRAPPERS:** Your response MUST NOT contain any markdown code fences like ```json or ```.",
    "**NO PREFACE/POSTFACE:** Your response MUST NOT include any introductory or concluding text. Do not say \"Here is the prompt\" or anything similar.",
    "**NO HEADERS/LABELS:** Your response MUST NOT start with headers or labels like \"Prompt:\", \"### Prompt\", or \"<prompt>\". Start DIRECTLY with the prompt content.",
    "**NO EXPLANATIONS:** Your response MUST NOT contain any explanatory text about the prompt you created.",
];

pub const DIRECTIVES_HEADING: &str = "### CORE DIRECTIVES FOR PROMPT GENERATION ---";

pub const EXPAND: &str = "**EXPAND THE USER'S IDEA INTO A DETAILED PROMPT:** Your primary goal is to take the user's simple idea and expand it into a comprehensive, detailed, and structured prompt. The output should be a complete, ready-to-use prompt that the user can copy and paste into another AI to get a high-quality result.";

pub const INCORPORATE: &str = "**INCORPORATE, DON'T REPLACE:** You MUST integrate the user's original idea directly into the prompt you generate. Do NOT replace their idea with generic placeholders. For example, if the user's input is \"a 30-day workout plan\", that phrase should appear in the final prompt you create.";

pub const ADD_STRUCTURE: &str = "**ADD STRUCTURE AND DETAIL:** Enhance the user's basic idea by adding relevant sections, questions, and constraints based on the selected framework. For example, for a workout plan, you might add sections for 'Current Fitness Level', 'Available Equipment', 'Goals', 'Constraints'. This makes the prompt more powerful.";

pub const AVOID_PLACEHOLDERS: &str = "**AVOID GENERIC PLACEHOLDERS:** Do NOT use placeholders like \"[Insert details here]\" or \"[Your Goal Here]\". The prompt you generate should be a finished product. If details are missing from the user's initial idea, structure the final prompt to ask the *next* AI for them, or provide common options as examples within the prompt.";

pub const DESCRIPTIVE_ROOT: &str = "**USE DESCRIPTIVE ROOT ELEMENT (FOR XML/JSON):** For XML and JSON formats, the top-level root element or key MUST be descriptive and directly related to the user's core request. AVOID generic names like '<prompt>', '<template>', or '<prompt_template>'.";

pub const CLOSING: &str = "Your final output will be directly copied and pasted by the user. It must be a complete, powerful, and ready-to-use prompt.";

/// Framework slot.
pub fn framework_rule(framework: FrameworkId) -> String {
    format!("**ADHERE TO FRAMEWORK:** {}", framework.directive())
}

/// Format slot.
pub fn format_rule(format: OutputFormat) -> String {
    format!("**ADHERE TO FORMAT:** {}", format.contract())
}

fn numbered<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}.  {}", i + 1, item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn hygiene_rules() -> String {
    format!(
        "{}\n{}\n{}",
        SECTION_RULE,
        HYGIENE_HEADING,
        numbered(&HYGIENE_RULES)
    )
}

pub fn core_directives(framework: FrameworkId, format: OutputFormat) -> String {
    let directives = [
        EXPAND.to_string(),
        INCORPORATE.to_string(),
        ADD_STRUCTURE.to_string(),
        AVOID_PLACEHOLDERS.to_string(),
        framework_rule(framework),
        format_rule(format),
        DESCRIPTIVE_ROOT.to_string(),
    ];
    format!(
        "{}\n{}\n{}",
        SECTION_RULE,
        DIRECTIVES_HEADING,
        numbered(&directives)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hygiene_rules_are_numbered() {
        let rules = hygiene_rules();
        assert!(rules.starts_with("---\n### ABSOLUTE RULES"));
        assert!(rules.contains("1.  **NO WRAPPERS:**"));
        assert!(rules.contains("4.  **NO EXPLANATIONS:**"));
        assert!(!rules.contains("5.  "));
    }

    #[test]
    fn core_directives_place_slots_fifth_and_sixth() {
        let text = core_directives(FrameworkId::Tag, OutputFormat::Json);
        assert!(text.contains("5.  **ADHERE TO FRAMEWORK:** You MUST structure"));
        assert!(text.contains("6.  **ADHERE TO FORMAT:** The generated prompt MUST be a valid JSON object."));
        assert!(text.contains("7.  **USE DESCRIPTIVE ROOT ELEMENT"));
    }

    #[test]
    fn format_rule_embeds_contract_verbatim() {
        for format in OutputFormat::ALL {
            assert!(format_rule(format).ends_with(format.contract()));
        }
    }
}
