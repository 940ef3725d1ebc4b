//! Orchestrates the rule components into a single verdict.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::disposition::decide;
use crate::investigations::required_investigations;
use crate::reference::{
    EchoCategory, EchoType, PatientType, ReferringDoctor, TimeInterval, ValveSeverity, ValveType,
};
use crate::scenario::{FollowUpRequest, InitialAssessment, Scenario, ScenarioInput};
use crate::surveillance::check_interval;
use crate::verdict::Verdict;
use crate::{EvaluationError, EvaluatorConfig, FieldIssue};

pub const UNRESOLVED_SCENARIO_REASON: &str = "Assessment completed - please review rationale.";
pub const URGENT_ALWAYS_APPROPRIATE: &str = "Urgent echocardiogram is always appropriate";

/// Appropriateness evaluator. Holds configuration only; every call is
/// independent of the previous one.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate one request as of `today`.
    ///
    /// Only incomplete follow-up forms produce an error; every other input
    /// resolves to a verdict.
    pub fn evaluate(
        &self,
        input: &ScenarioInput,
        today: NaiveDate,
    ) -> Result<Verdict, EvaluationError> {
        match &input.scenario {
            Scenario::InitialAssessment { assessment } => {
                debug!(path = "initial_assessment", "evaluating echo request");
                Ok(self.evaluate_initial(input, assessment.as_ref()))
            }
            Scenario::FollowUp(request) => {
                debug!(path = "follow_up", "evaluating echo request");
                self.evaluate_follow_up(input, request, today)
            }
        }
    }

    fn evaluate_initial(
        &self,
        input: &ScenarioInput,
        assessment: Option<&InitialAssessment>,
    ) -> Verdict {
        let mut verdict = Verdict::new(EchoType::Initial);
        verdict.echo_category = input.echo_category;
        verdict.billing_code = billing_code(EchoType::Initial, input.referring_doctor);

        let Some(assessment) = assessment else {
            warn!("initial assessment has no scenario payload; using default verdict");
            verdict.push_reason(UNRESOLVED_SCENARIO_REASON);
            verdict.patient_type = input.patient_type;
            return verdict;
        };

        let required = required_investigations(assessment);
        let missing = assessment
            .completed_tests()
            .map(|completed| required.missing(completed))
            .unwrap_or_default();

        let disposition = decide(assessment, &missing);
        debug!(
            required = required.len(),
            missing = missing.len(),
            appropriate = disposition.appropriate,
            "initial assessment resolved"
        );

        verdict.is_appropriate = disposition.appropriate;
        verdict.reasons = disposition.reasons;
        verdict.time_interval = disposition.time_interval;
        verdict.patient_type = match disposition.patient_type {
            Some(patient_type) => Some(patient_type),
            None if disposition.appropriate => input.patient_type,
            None => None,
        };
        verdict
    }

    fn evaluate_follow_up(
        &self,
        input: &ScenarioInput,
        request: &FollowUpRequest,
        today: NaiveDate,
    ) -> Result<Verdict, EvaluationError> {
        let form = validate_follow_up(input, request, &self.config)?;

        let mut verdict = Verdict::new(form.echo_type);
        verdict.echo_category = Some(form.echo_category);
        verdict.time_interval = Some(form.requested_time_interval);
        verdict.patient_type = Some(form.patient_type);
        verdict.valve_type = Some(form.valve_type);
        verdict.valve_severity = Some(form.valve_severity);
        verdict.billing_code = billing_code(form.echo_type, Some(form.referring_doctor));

        if form.requested_time_interval == TimeInterval::Urgent24h {
            debug!("urgent follow-up bypasses surveillance interval");
            verdict.push_reason(URGENT_ALWAYS_APPROPRIATE);
            return Ok(verdict);
        }

        let check = check_interval(
            form.valve_type,
            form.valve_severity,
            form.previous_study_date,
            today,
            &self.config,
        );
        debug!(?check, "surveillance interval checked");

        if let Some(appropriate) = check.override_appropriate() {
            verdict.is_appropriate = appropriate;
        }
        if let Some(reason) = check.reason() {
            verdict.push_reason(reason);
        }

        Ok(verdict)
    }
}

/// Evaluate with the default configuration.
pub fn evaluate(input: &ScenarioInput, today: NaiveDate) -> Result<Verdict, EvaluationError> {
    Evaluator::default().evaluate(input, today)
}

fn billing_code(echo_type: EchoType, referring_doctor: Option<ReferringDoctor>) -> Option<String> {
    echo_type
        .billing_code(referring_doctor)
        .map(str::to_string)
}

/// Follow-up form with every field present.
struct CompleteFollowUp {
    patient_type: PatientType,
    echo_type: EchoType,
    echo_category: EchoCategory,
    referring_doctor: ReferringDoctor,
    requested_time_interval: TimeInterval,
    valve_severity: ValveSeverity,
    valve_type: ValveType,
    previous_study_date: NaiveDate,
}

fn require<T>(issues: &mut Vec<FieldIssue>, field: &'static str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        issues.push(FieldIssue::required(field));
    }
    value
}

fn validate_follow_up(
    input: &ScenarioInput,
    request: &FollowUpRequest,
    config: &EvaluatorConfig,
) -> Result<CompleteFollowUp, EvaluationError> {
    let mut issues = Vec::new();

    let patient_type = require(&mut issues, "patient_type", input.patient_type);
    let echo_type = require(&mut issues, "echo_type", request.echo_type);
    let echo_category = require(&mut issues, "echo_category", input.echo_category);
    let referring_doctor = require(&mut issues, "referring_doctor", input.referring_doctor);
    let requested_time_interval = require(
        &mut issues,
        "requested_time_interval",
        request.requested_time_interval,
    );
    let valve_severity = require(&mut issues, "valve_severity", request.valve_severity);
    let valve_type = require(&mut issues, "valve_type", request.valve_type);
    let previous_study_date = require(
        &mut issues,
        "previous_study_date",
        request.previous_study_date,
    );

    if echo_type == Some(EchoType::Initial) {
        issues.push(FieldIssue::new(
            "echo_type",
            "echo_type must not be initial for a follow-up request",
        ));
    }

    if config.enforce_category_match {
        if let (Some(echo_type), Some(category)) = (echo_type, echo_category) {
            if category.echo_type() != echo_type {
                issues.push(FieldIssue::new(
                    "echo_category",
                    format!(
                        "echo_category {} does not belong to echo type {}",
                        category.label(),
                        echo_type.label()
                    ),
                ));
            }
        }
    }

    if !issues.is_empty() {
        warn!(issues = issues.len(), "follow-up request failed validation");
        return Err(EvaluationError::Validation(issues));
    }

    match (
        patient_type,
        echo_type,
        echo_category,
        referring_doctor,
        requested_time_interval,
        valve_severity,
        valve_type,
        previous_study_date,
    ) {
        (
            Some(patient_type),
            Some(echo_type),
            Some(echo_category),
            Some(referring_doctor),
            Some(requested_time_interval),
            Some(valve_severity),
            Some(valve_type),
            Some(previous_study_date),
        ) => Ok(CompleteFollowUp {
            patient_type,
            echo_type,
            echo_category,
            referring_doctor,
            requested_time_interval,
            valve_severity,
            valve_type,
            previous_study_date,
        }),
        _ => Err(EvaluationError::Validation(issues)),
    }
}
