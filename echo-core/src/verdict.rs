use serde::{Deserialize, Serialize};

use crate::reference::{EchoCategory, EchoType, PatientType, TimeInterval, ValveSeverity, ValveType};

/// Final decision for one echo request.
///
/// Carries semantic values only; callers pick display labels through the
/// `label()` methods on each enum or [`Verdict::summary_lines`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    pub is_appropriate: bool,
    /// Reasons in generation order. For missing investigations the first
    /// reason lists them.
    pub reasons: Vec<String>,
    pub time_interval: Option<TimeInterval>,
    pub patient_type: Option<PatientType>,
    pub billing_code: Option<String>,
    pub echo_type: EchoType,
    pub echo_category: Option<EchoCategory>,
    pub valve_severity: Option<ValveSeverity>,
    pub valve_type: Option<ValveType>,
}

impl Verdict {
    pub(crate) fn new(echo_type: EchoType) -> Self {
        Self {
            is_appropriate: true,
            reasons: Vec::new(),
            time_interval: None,
            patient_type: None,
            billing_code: None,
            echo_type,
            echo_category: None,
            valve_severity: None,
            valve_type: None,
        }
    }

    pub(crate) fn push_reason(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    /// First reason, if any.
    pub fn primary_reason(&self) -> Option<&str> {
        self.reasons.first().map(String::as_str)
    }
}
