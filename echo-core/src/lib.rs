//! Rule engine deciding whether an echocardiogram request is appropriate,
//! how urgently it should happen and in which care setting.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod disposition;
pub mod evaluator;
pub mod guidance;
pub mod investigations;
pub mod reference;
pub mod scenario;
pub mod surveillance;
pub mod verdict;

pub use disposition::{decide, Disposition};
pub use evaluator::{evaluate, Evaluator};
pub use investigations::{required_investigations, Investigation, RequiredTestSet};
pub use reference::{
    surveillance_interval, EchoCategory, EchoType, PatientType, ReferringDoctor,
    SurveillanceInterval, TimeInterval, ValveSeverity, ValveType,
};
pub use scenario::{
    AcuteConditionScenario, AcuteIndication, ArrhythmiaScenario, ArrhythmiaType, FollowUpRequest,
    InitialAssessment, PatientLocation, Scenario, ScenarioInput, Stability,
};
pub use surveillance::{check_interval, IntervalCheck};
pub use verdict::Verdict;

/// Tunable parameters of the evaluator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Days counted as one month when measuring time since the previous echo.
    pub days_per_month: u32,
    /// Reject follow-up requests whose category belongs to another echo type.
    pub enforce_category_match: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            days_per_month: 30,
            enforce_category_match: true,
        }
    }
}

/// A single problem found while validating a follow-up form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::new(field, format!("{field} is required"))
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Errors surfaced by the evaluator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("request failed validation: {}", join_issues(.0))]
    Validation(Vec<FieldIssue>),
}

impl EvaluationError {
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            EvaluationError::Validation(issues) => issues,
        }
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
