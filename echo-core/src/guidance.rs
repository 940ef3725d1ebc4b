//! Display helpers applied at the presentation boundary.

use crate::disposition::MISSING_PREFIX;
use crate::reference::TimeInterval;
use crate::verdict::Verdict;

pub fn headline(is_appropriate: bool) -> &'static str {
    if is_appropriate {
        "Based on the information provided, an echocardiogram is indicated."
    } else {
        "Based on the information provided, an echocardiogram is not indicated at this time."
    }
}

/// Note shown next to the recommended timeframe.
pub fn timeframe_note(interval: TimeInterval) -> &'static str {
    if interval.is_urgent() {
        "For urgent/immediate tests, inpatient assessment is typically recommended."
    } else {
        "For routine/prompt tests, outpatient assessment is typically appropriate."
    }
}

/// Investigations listed in the first reason, or empty when the first
/// reason is not a missing-investigation message.
pub fn missing_investigations(reasons: &[String]) -> Vec<String> {
    let Some(first) = reasons.first() else {
        return Vec::new();
    };
    match first.strip_prefix(MISSING_PREFIX) {
        Some(list) => list
            .split(", ")
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

impl Verdict {
    /// Labelled lines for the result screen.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![headline(self.is_appropriate).to_string()];

        if self.is_appropriate {
            let timeframe = self
                .time_interval
                .map(TimeInterval::label)
                .unwrap_or("Based on clinical urgency");
            lines.push(format!("Recommended Timeframe: {timeframe}"));
            if let Some(patient_type) = self.patient_type {
                lines.push(format!(
                    "Patient Type: This is recommended as an {} test.",
                    patient_type.label()
                ));
            }
            if let Some(interval) = self.time_interval {
                lines.push(format!("Note: {}", timeframe_note(interval)));
            }
        } else {
            let missing = missing_investigations(&self.reasons);
            if missing.is_empty() {
                lines.push(
                    "Consider alternative diagnostic approaches or consult with a cardiologist."
                        .to_string(),
                );
            } else {
                lines.push(format!(
                    "Please complete the following tests before requesting an echocardiogram: {}",
                    missing.join(", ")
                ));
            }
        }

        if let (Some(valve_type), Some(severity)) = (self.valve_type, self.valve_severity) {
            lines.push(format!("Valve: {} ({})", valve_type.label(), severity.label()));
        }
        if let Some(code) = &self.billing_code {
            lines.push(format!("Billing code: {code}"));
        }

        lines
    }
}
