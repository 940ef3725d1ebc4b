//! Investigations that must be on file before an echo can be justified.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::scenario::{AcuteIndication, ArrhythmiaType, InitialAssessment};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Investigation {
    Ecg,
    ThyroidFunctionTests,
    Electrolytes,
    HolterMonitoring,
    NatriureticPeptide,
    ChestXray,
    Troponin,
    BloodCultures,
}

impl Investigation {
    /// Name as it appears on the request form and in reasons.
    pub fn name(self) -> &'static str {
        match self {
            Investigation::Ecg => "ECG",
            Investigation::ThyroidFunctionTests => "thyroid function tests",
            Investigation::Electrolytes => "electrolytes",
            Investigation::HolterMonitoring => "Holter monitoring",
            Investigation::NatriureticPeptide => "BNP/NT-proBNP",
            Investigation::ChestXray => "CXR",
            Investigation::Troponin => "troponin",
            Investigation::BloodCultures => "blood cultures",
        }
    }
}

/// Ordered, duplicate-free set of required investigations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredTestSet {
    tests: Vec<Investigation>,
}

impl RequiredTestSet {
    fn push(&mut self, test: Investigation) {
        if !self.tests.contains(&test) {
            self.tests.push(test);
        }
    }

    fn extend(&mut self, tests: &[Investigation]) {
        for test in tests {
            self.push(*test);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Investigation> + '_ {
        self.tests.iter().copied()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(Investigation::name).collect()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Required investigations absent from `completed`, in required order.
    pub fn missing(&self, completed: &BTreeSet<String>) -> Vec<String> {
        self.iter()
            .map(Investigation::name)
            .filter(|name| !completed.contains(*name))
            .map(str::to_string)
            .collect()
    }
}

/// Resolve the investigations a sub-scenario needs. Unknown subtypes only
/// get the baseline ECG.
pub fn required_investigations(assessment: &InitialAssessment) -> RequiredTestSet {
    let mut required = RequiredTestSet::default();

    match assessment {
        InitialAssessment::Arrhythmia(scenario) => {
            required.push(Investigation::Ecg);
            match scenario.arrhythmia_type {
                ArrhythmiaType::NewAf | ArrhythmiaType::PersistentAf | ArrhythmiaType::AtrialFlutter => {
                    required.extend(&[
                        Investigation::ThyroidFunctionTests,
                        Investigation::Electrolytes,
                    ]);
                }
                ArrhythmiaType::NewVt | ArrhythmiaType::RecurrentVt => {
                    required.push(Investigation::Electrolytes);
                }
                ArrhythmiaType::FrequentPvcs => required.push(Investigation::HolterMonitoring),
                ArrhythmiaType::AvBlock | ArrhythmiaType::Other => {}
            }
        }
        InitialAssessment::AcuteCondition(scenario) => {
            required.push(Investigation::Ecg);
            match scenario.indication {
                AcuteIndication::SuspectedHeartFailure
                | AcuteIndication::NewHeartFailure
                | AcuteIndication::AcuteHeartFailure => {
                    required.extend(&[Investigation::NatriureticPeptide, Investigation::ChestXray]);
                }
                AcuteIndication::SuspectedAmi
                | AcuteIndication::AcuteMi
                | AcuteIndication::SuspectedMyocarditis
                | AcuteIndication::ConfirmedMyocarditis => required.push(Investigation::Troponin),
                AcuteIndication::SuspectedEndocarditis => {
                    required.push(Investigation::BloodCultures)
                }
                AcuteIndication::Other => {}
            }
        }
        InitialAssessment::GenericInitial => {}
    }

    required
}
