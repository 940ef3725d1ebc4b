//! Request model: the answers collected for one echo request.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reference::{
    EchoCategory, EchoType, PatientType, ReferringDoctor, TimeInterval, ValveSeverity, ValveType,
};

/// One echo request, built once per evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioInput {
    #[serde(default)]
    pub patient_type: Option<PatientType>,
    #[serde(default)]
    pub referring_doctor: Option<ReferringDoctor>,
    #[serde(default)]
    pub echo_category: Option<EchoCategory>,
    pub scenario: Scenario,
}

impl ScenarioInput {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            patient_type: None,
            referring_doctor: None,
            echo_category: None,
            scenario,
        }
    }

    /// Initial-assessment request carrying a resolved sub-scenario.
    pub fn initial(assessment: InitialAssessment) -> Self {
        Self::new(Scenario::InitialAssessment {
            assessment: Some(assessment),
        })
    }

    pub fn follow_up(request: FollowUpRequest) -> Self {
        Self::new(Scenario::FollowUp(request))
    }

    pub fn with_patient_type(mut self, patient_type: PatientType) -> Self {
        self.patient_type = Some(patient_type);
        self
    }

    pub fn with_referring_doctor(mut self, doctor: ReferringDoctor) -> Self {
        self.referring_doctor = Some(doctor);
        self
    }

    pub fn with_category(mut self, category: EchoCategory) -> Self {
        self.echo_category = Some(category);
        self
    }

    /// Echo type implied by the active scenario.
    pub fn echo_type(&self) -> Option<EchoType> {
        match &self.scenario {
            Scenario::InitialAssessment { .. } => Some(EchoType::Initial),
            Scenario::FollowUp(request) => request.echo_type,
        }
    }
}

/// The evaluation path and its payload. Exactly one is active.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum Scenario {
    InitialAssessment {
        #[serde(default)]
        assessment: Option<InitialAssessment>,
    },
    FollowUp(FollowUpRequest),
}

/// Sub-scenario answered on the initial-assessment screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialAssessment {
    Arrhythmia(ArrhythmiaScenario),
    AcuteCondition(AcuteConditionScenario),
    GenericInitial,
}

impl InitialAssessment {
    pub fn completed_tests(&self) -> Option<&BTreeSet<String>> {
        match self {
            InitialAssessment::Arrhythmia(scenario) => Some(&scenario.completed_tests),
            InitialAssessment::AcuteCondition(scenario) => Some(&scenario.completed_tests),
            InitialAssessment::GenericInitial => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArrhythmiaScenario {
    pub arrhythmia_type: ArrhythmiaType,
    pub stability: Stability,
    #[serde(default)]
    pub completed_tests: BTreeSet<String>,
}

impl ArrhythmiaScenario {
    pub fn new<I, S>(arrhythmia_type: ArrhythmiaType, stability: Stability, completed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            arrhythmia_type,
            stability,
            completed_tests: completed.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcuteConditionScenario {
    pub indication: AcuteIndication,
    pub patient_location: PatientLocation,
    #[serde(default)]
    pub completed_tests: BTreeSet<String>,
}

impl AcuteConditionScenario {
    pub fn new<I, S>(indication: AcuteIndication, patient_location: PatientLocation, completed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            indication,
            patient_location,
            completed_tests: completed.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArrhythmiaType {
    NewAf,
    PersistentAf,
    AtrialFlutter,
    NewVt,
    RecurrentVt,
    FrequentPvcs,
    AvBlock,
    #[serde(other)]
    Other,
}

/// Clinical stability of an arrhythmia presentation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    Unstable,
    ModerateSymptoms,
    #[serde(other)]
    Stable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AcuteIndication {
    SuspectedHeartFailure,
    NewHeartFailure,
    AcuteHeartFailure,
    SuspectedAmi,
    AcuteMi,
    SuspectedMyocarditis,
    ConfirmedMyocarditis,
    SuspectedEndocarditis,
    #[serde(other)]
    Other,
}

/// Where the patient is at the time of the request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PatientLocation {
    Inpatient,
    #[serde(other)]
    Outpatient,
}

impl PatientLocation {
    pub fn patient_type(self) -> PatientType {
        match self {
            PatientLocation::Inpatient => PatientType::Inpatient,
            PatientLocation::Outpatient => PatientType::Outpatient,
        }
    }
}

/// Follow-up / surveillance form. Every field is required at evaluation
/// time; they are optional here so that incomplete forms can be reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FollowUpRequest {
    #[serde(default)]
    pub echo_type: Option<EchoType>,
    #[serde(default)]
    pub valve_type: Option<ValveType>,
    #[serde(default)]
    pub valve_severity: Option<ValveSeverity>,
    #[serde(default)]
    pub previous_study_date: Option<NaiveDate>,
    #[serde(default)]
    pub requested_time_interval: Option<TimeInterval>,
}
