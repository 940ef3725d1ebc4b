//! Urgency and care-setting policy for initial assessments.

use serde::{Deserialize, Serialize};

use crate::reference::{PatientType, TimeInterval};
use crate::scenario::{
    AcuteConditionScenario, AcuteIndication, ArrhythmiaScenario, ArrhythmiaType, InitialAssessment,
    Stability,
};

pub const MISSING_PREFIX: &str = "Missing required investigation(s): ";
pub const COMPLETE_TESTS_FIRST: &str =
    "Please complete the required tests before requesting an echocardiogram.";
pub const ALL_TESTS_COMPLETED: &str = "All required investigations have been completed.";

/// Partial verdict produced by the policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Disposition {
    pub appropriate: bool,
    pub time_interval: Option<TimeInterval>,
    pub patient_type: Option<PatientType>,
    pub reasons: Vec<String>,
}

/// Decide appropriateness, urgency and setting for an initial assessment.
pub fn decide(assessment: &InitialAssessment, missing: &[String]) -> Disposition {
    if !missing.is_empty() {
        return Disposition {
            appropriate: false,
            time_interval: None,
            patient_type: None,
            reasons: vec![
                format!("{MISSING_PREFIX}{}", missing.join(", ")),
                COMPLETE_TESTS_FIRST.to_string(),
            ],
        };
    }

    let (time_interval, patient_type, reason) = match assessment {
        InitialAssessment::Arrhythmia(scenario) => {
            let (interval, patient, reason) = arrhythmia_branch(scenario);
            (Some(interval), Some(patient), reason)
        }
        InitialAssessment::AcuteCondition(scenario) => {
            let (interval, patient, reason) = acute_branch(scenario);
            (Some(interval), Some(patient), reason)
        }
        InitialAssessment::GenericInitial => (
            None,
            None,
            "No scenario-specific investigations are required for this indication.",
        ),
    };

    Disposition {
        appropriate: true,
        time_interval,
        patient_type,
        reasons: vec![ALL_TESTS_COMPLETED.to_string(), reason.to_string()],
    }
}

fn arrhythmia_branch(scenario: &ArrhythmiaScenario) -> (TimeInterval, PatientType, &'static str) {
    use PatientType::*;
    use TimeInterval::*;

    match (scenario.arrhythmia_type, scenario.stability) {
        (ArrhythmiaType::NewAf, Stability::Unstable) => (
            Urgent24h,
            Inpatient,
            "New atrial fibrillation with unstable symptoms requires urgent assessment.",
        ),
        (ArrhythmiaType::NewAf, Stability::ModerateSymptoms) => (
            Prompt,
            Outpatient,
            "New atrial fibrillation with moderate symptoms should be assessed promptly.",
        ),
        (ArrhythmiaType::NewAf, _) => (
            Routine,
            Outpatient,
            "New stable atrial fibrillation can be assessed routinely.",
        ),
        (ArrhythmiaType::PersistentAf | ArrhythmiaType::AtrialFlutter, Stability::Unstable) => (
            Urgent24h,
            Inpatient,
            "Persistent AF/flutter with unstable symptoms requires urgent assessment.",
        ),
        (ArrhythmiaType::PersistentAf | ArrhythmiaType::AtrialFlutter, _) => (
            Routine,
            Outpatient,
            "Stable persistent AF/flutter can be assessed routinely.",
        ),
        (ArrhythmiaType::NewVt | ArrhythmiaType::RecurrentVt, _) => (
            Urgent24h,
            Inpatient,
            "Ventricular tachycardia requires urgent assessment.",
        ),
        (ArrhythmiaType::AvBlock, _) => (
            Urgent48h,
            Inpatient,
            "High-grade AV block requires urgent assessment.",
        ),
        (ArrhythmiaType::FrequentPvcs | ArrhythmiaType::Other, Stability::Unstable) => (
            Urgent48h,
            Inpatient,
            "Unstable arrhythmia requires urgent assessment.",
        ),
        (ArrhythmiaType::FrequentPvcs | ArrhythmiaType::Other, _) => (
            Routine,
            Outpatient,
            "Stable arrhythmia can be assessed routinely.",
        ),
    }
}

fn acute_branch(scenario: &AcuteConditionScenario) -> (TimeInterval, PatientType, &'static str) {
    match scenario.indication {
        AcuteIndication::AcuteHeartFailure
        | AcuteIndication::AcuteMi
        | AcuteIndication::ConfirmedMyocarditis
        | AcuteIndication::SuspectedEndocarditis => (
            TimeInterval::Urgent24h,
            PatientType::Inpatient,
            "Acute cardiac condition requires urgent assessment.",
        ),
        AcuteIndication::NewHeartFailure => (
            TimeInterval::Prompt,
            scenario.patient_location.patient_type(),
            "New heart failure should be assessed promptly.",
        ),
        AcuteIndication::SuspectedHeartFailure
        | AcuteIndication::SuspectedAmi
        | AcuteIndication::SuspectedMyocarditis
        | AcuteIndication::Other => (
            TimeInterval::Urgent48h,
            scenario.patient_location.patient_type(),
            "Acute cardiac condition requires prompt assessment.",
        ),
    }
}
