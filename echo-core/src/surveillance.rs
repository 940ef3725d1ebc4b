//! Minimum spacing between surveillance echos for valve disease.

use chrono::NaiveDate;
use serde::Serialize;

use crate::reference::{surveillance_interval, ValveSeverity, ValveType};
use crate::EvaluatorConfig;

/// Outcome of comparing elapsed time against the surveillance table.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IntervalCheck {
    /// No recommendation exists for this valve/severity pair.
    NoEntry,
    Satisfied {
        recommended_months: u32,
        elapsed_months: f64,
        label: &'static str,
    },
    TooRecent {
        recommended_months: u32,
        elapsed_months: f64,
        label: &'static str,
    },
}

impl IntervalCheck {
    /// `Some(false)` when the check overrides appropriateness.
    pub fn override_appropriate(&self) -> Option<bool> {
        match self {
            IntervalCheck::TooRecent { .. } => Some(false),
            _ => None,
        }
    }

    /// Reason to append to the verdict, if any.
    pub fn reason(&self) -> Option<String> {
        match self {
            IntervalCheck::NoEntry => None,
            IntervalCheck::Satisfied { label, .. } => Some(format!(
                "Time since the previous echo meets the recommended surveillance interval ({label})."
            )),
            IntervalCheck::TooRecent {
                recommended_months, ..
            } => Some(format!(
                "Previous echo was too recent. Recommended interval is {recommended_months} months."
            )),
        }
    }
}

/// Months elapsed between two dates, counted as days divided by the
/// configured month length.
pub fn elapsed_months(previous: NaiveDate, today: NaiveDate, config: &EvaluatorConfig) -> f64 {
    let days = today.signed_duration_since(previous).num_days();
    days as f64 / f64::from(config.days_per_month.max(1))
}

pub fn check_interval(
    valve_type: ValveType,
    severity: ValveSeverity,
    previous: NaiveDate,
    today: NaiveDate,
    config: &EvaluatorConfig,
) -> IntervalCheck {
    let Some(interval) = surveillance_interval(valve_type, severity) else {
        return IntervalCheck::NoEntry;
    };

    let elapsed = elapsed_months(previous, today, config);
    if elapsed < f64::from(interval.min_months) {
        IntervalCheck::TooRecent {
            recommended_months: interval.min_months,
            elapsed_months: elapsed,
            label: interval.label,
        }
    } else {
        IntervalCheck::Satisfied {
            recommended_months: interval.min_months,
            elapsed_months: elapsed,
            label: interval.label,
        }
    }
}
