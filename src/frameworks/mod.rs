//! Prompting frameworks: the closed catalog of structures a generated prompt can follow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a prompting framework. Wire tokens are lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkId {
    Standard,
    Reasoning,
    Race,
    Care,
    Ape,
    Create,
    Tag,
    Creo,
    Rise,
    Pain,
    Coast,
    Roses,
}

/// Static description of one framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameworkDefinition {
    pub id: FrameworkId,
    #[serde(rename = "name")]
    pub display_name: &'static str,
    pub description: &'static str,
    /// Named fields the generated prompt should expose, in order.
    pub sections: &'static [&'static str],
}

/// All frameworks in display order.
pub static FRAMEWORKS: [FrameworkDefinition; 12] = [
    FrameworkDefinition {
        id: FrameworkId::Standard,
        display_name: "Standard Prompt – For general use prompt generation",
        description: "For general use prompt generation",
        sections: &[],
    },
    FrameworkDefinition {
        id: FrameworkId::Reasoning,
        display_name: "Reasoning Prompt – For reasoning tasks and complex problem solving",
        description: "For reasoning tasks and complex problem solving",
        sections: &[],
    },
    FrameworkDefinition {
        id: FrameworkId::Race,
        display_name: "Race [Role, Action, Context, Explanation] – Role-based responses",
        description: "RACE Framework [Role, Action, Context, Explanation] – Role-based responses with structured instructions",
        sections: &["Role", "Action", "Context", "Explanation"],
    },
    FrameworkDefinition {
        id: FrameworkId::Care,
        display_name: "Care [Context, Action, Result, Example] – Helpful, real-world responses",
        description: "CARE Framework [Context, Action, Result, Example] – Helpful, real-world responses with practical value",
        sections: &["Context", "Action", "Result", "Example"],
    },
    FrameworkDefinition {
        id: FrameworkId::Ape,
        display_name: "Ape [Action, Purpose, Execution] – Clear task execution",
        description: "APE Framework [Action, Purpose, Execution] – Clear task execution with defined goals and outcomes",
        sections: &["Action", "Purpose", "Execution"],
    },
    FrameworkDefinition {
        id: FrameworkId::Create,
        display_name: "Create [Character, Request, Examples, Adjustments, Type, Extras] – Guided task execution",
        description: "CREATE Framework [Character, Request, Examples, Adjustments, Type, Extras] – Clear, specific & guided task execution",
        sections: &[
            "Character",
            "Request",
            "Examples",
            "Adjustments",
            "Type",
            "Extras",
        ],
    },
    FrameworkDefinition {
        id: FrameworkId::Tag,
        display_name: "Tag [Task, Action, Goal] – Step-by-step tasks",
        description: "TAG Framework [Task, Action, Goal] – Step-by-step tasks aimed at achieving a specific result",
        sections: &["Task", "Action", "Goal"],
    },
    FrameworkDefinition {
        id: FrameworkId::Creo,
        display_name: "Creo [Context, Request, Explanation, Outcome] – Structured idea generation",
        description: "CREO Framework [Context, Request, Explanation, Outcome] – Structured ideas, strategies, or problem-solving",
        sections: &["Context", "Request", "Explanation", "Outcome"],
    },
    FrameworkDefinition {
        id: FrameworkId::Rise,
        display_name: "Rise [Role, Input, Steps, Execution] – Guided learning flows",
        description: "RISE Framework [Role, Input, Steps, Execution] – Guided, step-by-step instructions or learning flows",
        sections: &["Role", "Input", "Steps", "Execution"],
    },
    FrameworkDefinition {
        id: FrameworkId::Pain,
        display_name: "Pain [Problem, Action, Information, Next Steps] – Action-oriented problem-solving",
        description: "PAIN Framework [Problem, Action, Information, Next Steps] – Solving problems or getting action-oriented information",
        sections: &["Problem", "Action", "Information", "Next Steps"],
    },
    FrameworkDefinition {
        id: FrameworkId::Coast,
        display_name: "Coast [Context, Objective, Actions, Scenario, Task] – Detailed workflow planning",
        description: "COAST Framework [Context, Objective, Actions, Scenario, Task] – For detailed workflows or process planning",
        sections: &["Context", "Objective", "Actions", "Scenario", "Task"],
    },
    FrameworkDefinition {
        id: FrameworkId::Roses,
        display_name: "Roses [Role, Objective, Scenario, Expected Solution, Steps] – Analytical decision-making",
        description: "ROSES Framework [Role, Objective, Scenario, Expected Solution, Steps] – Analytical or scenario-based decision-making",
        sections: &["Role", "Objective", "Scenario", "Expected Solution", "Steps"],
    },
];

/// Directive used when no named framework is selected.
pub const STANDARD_DIRECTIVE: &str =
    "You will generate a standard, high-quality prompt based on the user input.";

impl FrameworkId {
    pub const ALL: [FrameworkId; 12] = [
        FrameworkId::Standard,
        FrameworkId::Reasoning,
        FrameworkId::Race,
        FrameworkId::Care,
        FrameworkId::Ape,
        FrameworkId::Create,
        FrameworkId::Tag,
        FrameworkId::Creo,
        FrameworkId::Rise,
        FrameworkId::Pain,
        FrameworkId::Coast,
        FrameworkId::Roses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameworkId::Standard => "standard",
            FrameworkId::Reasoning => "reasoning",
            FrameworkId::Race => "race",
            FrameworkId::Care => "care",
            FrameworkId::Ape => "ape",
            FrameworkId::Create => "create",
            FrameworkId::Tag => "tag",
            FrameworkId::Creo => "creo",
            FrameworkId::Rise => "rise",
            FrameworkId::Pain => "pain",
            FrameworkId::Coast => "coast",
            FrameworkId::Roses => "roses",
        }
    }

    pub fn definition(&self) -> &'static FrameworkDefinition {
        // FRAMEWORKS is declared in the same order as the enum
        &FRAMEWORKS[*self as usize]
    }

    /// The ADHERE TO FRAMEWORK directive for this framework.
    pub fn directive(&self) -> String {
        match self {
            FrameworkId::Standard => STANDARD_DIRECTIVE.to_string(),
            other => format!(
                "You MUST structure the generated prompt according to the \"{}\" framework. Ensure the final prompt has clear sections corresponding to this framework.",
                other.definition().display_name
            ),
        }
    }
}

impl fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FrameworkId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FrameworkId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown framework '{}'", s))
    }
}
