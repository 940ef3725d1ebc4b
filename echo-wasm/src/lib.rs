//! Framework-neutral bridge between the request form in the browser and the
//! evaluator.

use chrono::NaiveDate;
use echo_core::{EvaluationError, Evaluator, EvaluatorConfig, ScenarioInput};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsEvaluatorConfig {
    #[serde(default)]
    days_per_month: Option<u32>,
    #[serde(default)]
    enforce_category_match: Option<bool>,
}

impl From<JsEvaluatorConfig> for EvaluatorConfig {
    fn from(cfg: JsEvaluatorConfig) -> Self {
        let mut base = EvaluatorConfig::default();
        if let Some(days) = cfg.days_per_month {
            base.days_per_month = days;
        }
        if let Some(enforce) = cfg.enforce_category_match {
            base.enforce_category_match = enforce;
        }
        base
    }
}

/// Evaluate a request form. `today` is an ISO date (`YYYY-MM-DD`).
#[wasm_bindgen]
pub fn evaluate_request(
    input: JsValue,
    today: String,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let request: ScenarioInput = from_value(input)
        .map_err(|err| JsValue::from_str(&format!("Could not read request: {err}")))?;

    let today = NaiveDate::parse_from_str(today.trim(), "%Y-%m-%d")
        .map_err(|err| JsValue::from_str(&format!("Could not read date {today:?}: {err}")))?;

    let cfg = match config {
        Some(js_cfg) => {
            let cfg: JsEvaluatorConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            EvaluatorConfig::from(cfg)
        }
        None => EvaluatorConfig::default(),
    };

    let verdict = Evaluator::new(cfg)
        .evaluate(&request, today)
        .map_err(|err| JsValue::from_str(&format_evaluation_error(err)))?;

    to_value(&verdict).map_err(|err| JsValue::from_str(&format!("Could not serialize verdict: {err}")))
}

/// Interpret the raw text returned by the assistant service.
#[wasm_bindgen]
pub fn interpret_response(text: String) -> Result<JsValue, JsValue> {
    let assessment = echo_assistant::interpret(&text);
    to_value(&assessment)
        .map_err(|err| JsValue::from_str(&format!("Could not serialize assessment: {err}")))
}

/// Interpret an assistant payload that already arrived as a JSON value.
#[wasm_bindgen]
pub fn interpret_payload(payload: JsValue) -> Result<JsValue, JsValue> {
    let value = from_value::<serde_json::Value>(payload)
        .map_err(|err| JsValue::from_str(&format!("Could not read payload: {err}")))?;

    let assessment = echo_assistant::interpret_value(&value).unwrap_or_default();
    to_value(&assessment)
        .map_err(|err| JsValue::from_str(&format!("Could not serialize assessment: {err}")))
}

fn format_evaluation_error(err: EvaluationError) -> String {
    format!("Evaluation error: {err}")
}
