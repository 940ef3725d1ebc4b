//! Interpreter turning assistant answers into the four-field assessment shown
//! on the results screen.
//!
//! The assistant is asked to answer with labelled sections
//! (`Recommendation:`, `Rationale:`, `Next Steps:`, `Consult Other Teams:`)
//! or a JSON object. Neither is guaranteed, so every path here degrades to
//! fixed defaults instead of failing.

use std::sync::LazyLock;

use echo_core::PatientType;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const NOT_INDICATED: &str = "Echocardiogram is not indicated.";
pub const DEFAULT_RECOMMENDATION: &str = "Assessment completed - please review rationale.";
pub const DEFAULT_RATIONALE: &str = "Please review the details in the assessment.";
pub const DEFAULT_NEXT_STEPS: &str =
    "Please review the assessment and follow appropriate clinical guidelines.";
pub const DEFAULT_CONSULT: &str =
    "Consider consultation with specialists as needed based on the assessment.";

/// Structured form of an assistant answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssistantAssessment {
    pub recommendation: String,
    pub rationale: String,
    pub next_steps: String,
    pub consult_other_teams: String,
}

impl Default for AssistantAssessment {
    fn default() -> Self {
        Self {
            recommendation: DEFAULT_RECOMMENDATION.to_string(),
            rationale: DEFAULT_RATIONALE.to_string(),
            next_steps: DEFAULT_NEXT_STEPS.to_string(),
            consult_other_teams: DEFAULT_CONSULT.to_string(),
        }
    }
}

/// Care pathway implied by a recommendation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentOutcome {
    Inpatient,
    Outpatient,
    NotIndicated,
}

impl AssessmentOutcome {
    pub fn classify(assessment: &AssistantAssessment) -> Self {
        let lower = assessment.recommendation.to_lowercase();
        if lower.contains("not indicated") {
            AssessmentOutcome::NotIndicated
        } else if lower.contains("inpatient") {
            AssessmentOutcome::Inpatient
        } else if lower.contains("outpatient") {
            AssessmentOutcome::Outpatient
        } else {
            AssessmentOutcome::NotIndicated
        }
    }

    pub fn patient_type(self) -> Option<PatientType> {
        match self {
            AssessmentOutcome::Inpatient => Some(PatientType::Inpatient),
            AssessmentOutcome::Outpatient => Some(PatientType::Outpatient),
            AssessmentOutcome::NotIndicated => None,
        }
    }
}

/// Interpret a raw assistant answer. Never fails.
pub fn interpret(raw: &str) -> AssistantAssessment {
    let cleaned = strip_citations(raw);

    if let Ok(value) = serde_json::from_str::<Value>(cleaned.trim()) {
        if let Some(assessment) = interpret_value(&value) {
            return assessment;
        }
        debug!("assistant answer is JSON without usable fields; falling back to text");
    }

    interpret_text(&cleaned)
}

/// Interpret a payload that already arrived as JSON.
///
/// Accepts the four-field object, a `sections` map keyed by section title,
/// a `response` string, or a bare string. Returns `None` for anything else.
pub fn interpret_value(value: &Value) -> Option<AssistantAssessment> {
    match value {
        Value::String(text) => Some(interpret_text(&strip_citations(text))),
        Value::Object(map) => {
            if let Some(assessment) = four_fields(value) {
                return Some(assessment);
            }
            if let Some(sections) = map.get("sections").and_then(Value::as_object) {
                return Some(from_section_map(sections));
            }
            map.get("response")
                .and_then(Value::as_str)
                .map(interpret)
        }
        _ => None,
    }
}

/// All four keys must be present as strings; blank values take the defaults.
fn four_fields(value: &Value) -> Option<AssistantAssessment> {
    let field = |name: &str, default: &str| {
        value.get(name).and_then(Value::as_str).map(|text| {
            Some(text.trim())
                .filter(|text| !text.is_empty())
                .unwrap_or(default)
                .to_string()
        })
    };
    Some(AssistantAssessment {
        recommendation: field("recommendation", DEFAULT_RECOMMENDATION)?,
        rationale: field("rationale", DEFAULT_RATIONALE)?,
        next_steps: field("nextSteps", DEFAULT_NEXT_STEPS)?,
        consult_other_teams: field("consultOtherTeams", DEFAULT_CONSULT)?,
    })
}

fn from_section_map(sections: &serde_json::Map<String, Value>) -> AssistantAssessment {
    let section = |title: &str, default: &str| {
        sections
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(title))
            .and_then(|(_, value)| value.as_str())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(default)
            .to_string()
    };
    AssistantAssessment {
        recommendation: section("Recommendation", DEFAULT_RECOMMENDATION),
        rationale: section("Rationale", DEFAULT_RATIONALE),
        next_steps: section("Next Steps", DEFAULT_NEXT_STEPS),
        consult_other_teams: section("Consult Other Teams", DEFAULT_CONSULT),
    }
}

static CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【[^】]*】|\[\d+(?:\s*,\s*\d+)*\]").expect("citation pattern"));

static SECTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\**[ \t]*(recommendation|rationale|next\s+steps|consult\s+other\s+teams)[ \t]*:[ \t]*\**",
    )
    .expect("section label pattern")
});

static WITHIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)within\s+(\d+)\s+(hours?|days?|weeks?)").expect("timeframe pattern")
});

/// Remove assistant citation markers such as `【4:0†source.txt】` or `[2]`.
pub fn strip_citations(text: &str) -> String {
    CITATION.replace_all(text, "").into_owned()
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Sections {
    recommendation: Option<String>,
    rationale: Option<String>,
    next_steps: Option<String>,
    consult_other_teams: Option<String>,
}

/// Cut labelled sections out of free text. Each section runs to the next
/// known label or the end of the text; the first occurrence of a label wins.
fn split_sections(text: &str) -> Sections {
    let labels: Vec<_> = SECTION_LABEL.captures_iter(text).collect();
    let mut sections = Sections::default();

    for (idx, caps) in labels.iter().enumerate() {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let end = labels
            .get(idx + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |next| next.start());
        let body = text[whole.end()..end].trim();
        if body.is_empty() {
            continue;
        }

        let normalized = name
            .as_str()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let slot = match normalized.as_str() {
            "recommendation" => &mut sections.recommendation,
            "rationale" => &mut sections.rationale,
            "next steps" => &mut sections.next_steps,
            _ => &mut sections.consult_other_teams,
        };
        if slot.is_none() {
            *slot = Some(body.to_string());
        }
    }

    sections
}

/// Heuristic interpretation of free text.
pub fn interpret_text(text: &str) -> AssistantAssessment {
    let sections = split_sections(text);
    debug!(
        recommendation = sections.recommendation.is_some(),
        rationale = sections.rationale.is_some(),
        next_steps = sections.next_steps.is_some(),
        consult = sections.consult_other_teams.is_some(),
        "assistant sections located"
    );

    let recommendation = recommendation_from(text, sections.recommendation.as_deref());

    AssistantAssessment {
        recommendation,
        rationale: sections
            .rationale
            .unwrap_or_else(|| DEFAULT_RATIONALE.to_string()),
        next_steps: sections
            .next_steps
            .unwrap_or_else(|| DEFAULT_NEXT_STEPS.to_string()),
        consult_other_teams: sections
            .consult_other_teams
            .unwrap_or_else(|| DEFAULT_CONSULT.to_string()),
    }
}

fn recommendation_from(text: &str, section: Option<&str>) -> String {
    let lower = text.to_lowercase();
    if lower.contains("not indicated") {
        return NOT_INDICATED.to_string();
    }

    if let Some(section) = section {
        if let Some(patient_type) = patient_type_in(section) {
            let timeframe = timeframe_in(section, Scope::Section)
                .or_else(|| timeframe_in(text, Scope::WholeText))
                .or_else(|| {
                    (patient_type == PatientType::Inpatient)
                        .then(|| "during this admission".to_string())
                });
            return match timeframe {
                Some(timeframe) => format!(
                    "{} echocardiogram is indicated {timeframe}.",
                    patient_type.label()
                ),
                None => format!("{} echocardiogram is indicated.", patient_type.label()),
            };
        }
    }

    if NEGATIVE_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        return NOT_INDICATED.to_string();
    }

    DEFAULT_RECOMMENDATION.to_string()
}

const NEGATIVE_PHRASES: [&str; 3] = [
    "not appropriate",
    "inappropriateness criterion",
    "does not warrant",
];

fn patient_type_in(text: &str) -> Option<PatientType> {
    let lower = text.to_lowercase();
    if lower.contains("inpatient") {
        Some(PatientType::Inpatient)
    } else if lower.contains("outpatient") {
        Some(PatientType::Outpatient)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Section,
    WholeText,
}

/// Timeframe wording by precedence: explicit "within N unit", then
/// urgent/emergency, immediate, routine/elective, as soon as possible.
/// "not urgent" only cancels an urgent hit when searching the whole text.
fn timeframe_in(text: &str, scope: Scope) -> Option<String> {
    if let Some(caps) = WITHIN.captures(text) {
        return Some(format!("within {} {}", &caps[1], &caps[2]));
    }

    let lower = text.to_lowercase();
    let urgent = lower.contains("urgent")
        && !(scope == Scope::WholeText && lower.contains("not urgent"));
    if urgent || lower.contains("emergency") {
        Some("urgent".to_string())
    } else if lower.contains("immediate") {
        Some("immediate".to_string())
    } else if lower.contains("routine") {
        Some("routine".to_string())
    } else if lower.contains("elective") {
        Some("elective".to_string())
    } else if lower.contains("as soon as possible") || lower.contains("asap") {
        Some("as soon as possible".to_string())
    } else {
        None
    }
}
