use chrono::{Duration, NaiveDate};
use echo_core::{
    check_interval, evaluate, EchoCategory, EchoType, EvaluationError, Evaluator, EvaluatorConfig,
    FollowUpRequest, IntervalCheck, PatientType, ReferringDoctor, ScenarioInput, TimeInterval,
    ValveSeverity, ValveType,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
}

fn days_ago(days: i64) -> NaiveDate {
    today() - Duration::days(days)
}

fn valvular_request(
    valve_type: ValveType,
    severity: ValveSeverity,
    previous: NaiveDate,
    interval: TimeInterval,
) -> ScenarioInput {
    ScenarioInput::follow_up(FollowUpRequest {
        echo_type: Some(EchoType::Valvular),
        valve_type: Some(valve_type),
        valve_severity: Some(severity),
        previous_study_date: Some(previous),
        requested_time_interval: Some(interval),
    })
    .with_patient_type(PatientType::Outpatient)
    .with_referring_doctor(ReferringDoctor::Cardiologist)
    .with_category(EchoCategory::AorticValve)
}

#[test]
fn severe_aortic_stenosis_two_months_after_previous_is_too_recent() {
    let input = valvular_request(
        ValveType::AorticStenosis,
        ValveSeverity::Severe,
        days_ago(60),
        TimeInterval::Routine,
    );

    let verdict = evaluate(&input, today()).expect("complete form");

    assert!(!verdict.is_appropriate);
    assert_eq!(
        verdict.reasons,
        vec!["Previous echo was too recent. Recommended interval is 6 months.".to_string()]
    );
    assert_eq!(verdict.valve_type, Some(ValveType::AorticStenosis));
    assert_eq!(verdict.valve_severity, Some(ValveSeverity::Severe));
    assert_eq!(verdict.time_interval, Some(TimeInterval::Routine));
    assert_eq!(verdict.patient_type, Some(PatientType::Outpatient));
    assert_eq!(verdict.billing_code.as_deref(), Some("55127"));
}

#[test]
fn urgent_follow_up_is_always_appropriate() {
    for days in [0, 1, 30, 400, 5000] {
        let input = valvular_request(
            ValveType::AorticStenosis,
            ValveSeverity::Mild,
            days_ago(days),
            TimeInterval::Urgent24h,
        );

        let verdict = evaluate(&input, today()).expect("complete form");

        assert!(verdict.is_appropriate, "{days} days");
        assert_eq!(
            verdict.reasons,
            vec!["Urgent echocardiogram is always appropriate".to_string()]
        );
    }
}

#[test]
fn urgent_48h_still_checks_interval() {
    let input = valvular_request(
        ValveType::MitralRegurgitation,
        ValveSeverity::Moderate,
        days_ago(90),
        TimeInterval::Urgent48h,
    );

    let verdict = evaluate(&input, today()).expect("complete form");

    assert!(!verdict.is_appropriate);
    assert_eq!(
        verdict.reasons[0],
        "Previous echo was too recent. Recommended interval is 12 months."
    );
}

#[test]
fn interval_met_keeps_request_appropriate() {
    let input = valvular_request(
        ValveType::AorticRegurgitation,
        ValveSeverity::Severe,
        days_ago(200),
        TimeInterval::Routine,
    );

    let verdict = evaluate(&input, today()).expect("complete form");

    assert!(verdict.is_appropriate);
    assert_eq!(
        verdict.reasons,
        vec![
            "Time since the previous echo meets the recommended surveillance interval (6-12 monthly)."
                .to_string()
        ]
    );
}

#[test]
fn severe_mitral_stenosis_uses_annual_interval() {
    let input = valvular_request(
        ValveType::MitralStenosis,
        ValveSeverity::Severe,
        days_ago(300),
        TimeInterval::Prompt,
    );

    let verdict = evaluate(&input, today()).expect("complete form");

    assert!(!verdict.is_appropriate);
    assert_eq!(
        verdict.reasons[0],
        "Previous echo was too recent. Recommended interval is 12 months."
    );
}

#[test]
fn valve_without_table_entry_passes_silently() {
    let input = valvular_request(
        ValveType::TricuspidRegurgitation,
        ValveSeverity::Severe,
        days_ago(1),
        TimeInterval::Routine,
    );

    let verdict = evaluate(&input, today()).expect("complete form");

    assert!(verdict.is_appropriate);
    assert!(verdict.reasons.is_empty());
}

#[test]
fn elapsed_months_use_thirty_day_months() {
    let config = EvaluatorConfig::default();

    // 179 days is 5.97 months, 180 days is exactly 6.
    let early = check_interval(
        ValveType::AorticStenosis,
        ValveSeverity::Severe,
        days_ago(179),
        today(),
        &config,
    );
    let on_time = check_interval(
        ValveType::AorticStenosis,
        ValveSeverity::Severe,
        days_ago(180),
        today(),
        &config,
    );

    assert!(matches!(early, IntervalCheck::TooRecent { recommended_months: 6, .. }));
    assert!(matches!(on_time, IntervalCheck::Satisfied { recommended_months: 6, .. }));
    assert_eq!(
        check_interval(
            ValveType::PulmonicStenosis,
            ValveSeverity::Mild,
            days_ago(1),
            today(),
            &config,
        ),
        IntervalCheck::NoEntry
    );
}

#[test]
fn month_length_is_configurable() {
    let evaluator = Evaluator::new(EvaluatorConfig {
        days_per_month: 31,
        ..EvaluatorConfig::default()
    });
    // 180 days is 5.8 months of 31 days.
    let input = valvular_request(
        ValveType::AorticStenosis,
        ValveSeverity::Severe,
        days_ago(180),
        TimeInterval::Routine,
    );

    let verdict = evaluator.evaluate(&input, today()).expect("complete form");

    assert!(!verdict.is_appropriate);
}

#[test]
fn incomplete_form_reports_every_missing_field() {
    let input = ScenarioInput::follow_up(FollowUpRequest {
        echo_type: Some(EchoType::Valvular),
        ..FollowUpRequest::default()
    });

    let err = evaluate(&input, today()).expect_err("form is incomplete");
    let messages: Vec<&str> = err
        .issues()
        .iter()
        .map(|issue| issue.message.as_str())
        .collect();

    assert_eq!(
        messages,
        vec![
            "patient_type is required",
            "echo_category is required",
            "referring_doctor is required",
            "requested_time_interval is required",
            "valve_severity is required",
            "valve_type is required",
            "previous_study_date is required",
        ]
    );
    assert!(err.to_string().starts_with("request failed validation: "));
}

#[test]
fn follow_up_rejects_initial_echo_type() {
    let mut input = valvular_request(
        ValveType::AorticStenosis,
        ValveSeverity::Mild,
        days_ago(2000),
        TimeInterval::Routine,
    );
    input.echo_category = Some(EchoCategory::Arrhythmia);
    if let echo_core::Scenario::FollowUp(request) = &mut input.scenario {
        request.echo_type = Some(EchoType::Initial);
    }

    let err = evaluate(&input, today()).expect_err("initial echo type on follow-up path");

    assert!(matches!(err, EvaluationError::Validation(_)));
    assert_eq!(err.issues().len(), 1);
    assert_eq!(err.issues()[0].field, "echo_type");
}

#[test]
fn category_must_belong_to_echo_type() {
    let input = valvular_request(
        ValveType::AorticStenosis,
        ValveSeverity::Mild,
        days_ago(2000),
        TimeInterval::Routine,
    )
    .with_category(EchoCategory::Pericarditis);

    let err = evaluate(&input, today()).expect_err("category mismatch");
    assert_eq!(
        err.issues()[0].message,
        "echo_category Pericarditis does not belong to echo type Valvular Heart Disease"
    );

    let lenient = Evaluator::new(EvaluatorConfig {
        enforce_category_match: false,
        ..EvaluatorConfig::default()
    });
    let verdict = lenient.evaluate(&input, today()).expect("check disabled");
    assert!(verdict.is_appropriate);
}

#[test]
fn rural_gp_valvular_and_heart_failure_billing() {
    let rural = valvular_request(
        ValveType::AorticStenosis,
        ValveSeverity::Mild,
        days_ago(2000),
        TimeInterval::Routine,
    )
    .with_referring_doctor(ReferringDoctor::GpRural);
    assert_eq!(
        evaluate(&rural, today())
            .expect("complete form")
            .billing_code
            .as_deref(),
        Some("55128")
    );

    let mut heart_failure = rural.clone().with_category(EchoCategory::KnownHeartFailure);
    if let echo_core::Scenario::FollowUp(request) = &mut heart_failure.scenario {
        request.echo_type = Some(EchoType::HeartFailure);
    }
    assert_eq!(
        evaluate(&heart_failure, today())
            .expect("complete form")
            .billing_code
            .as_deref(),
        Some("55129")
    );

    let mut pericardial = rural.with_category(EchoCategory::PericardialEffusion);
    if let echo_core::Scenario::FollowUp(request) = &mut pericardial.scenario {
        request.echo_type = Some(EchoType::Pericardial);
    }
    assert_eq!(
        evaluate(&pericardial, today())
            .expect("complete form")
            .billing_code,
        None
    );
}

#[test]
fn request_reports_echo_type_and_primary_reason() {
    let input = valvular_request(
        ValveType::AorticStenosis,
        ValveSeverity::Severe,
        days_ago(60),
        TimeInterval::Routine,
    );
    assert_eq!(input.echo_type(), Some(EchoType::Valvular));
    assert_eq!(
        ScenarioInput::follow_up(FollowUpRequest::default()).echo_type(),
        None
    );

    let evaluator = Evaluator::new(EvaluatorConfig {
        days_per_month: 28,
        ..EvaluatorConfig::default()
    });
    assert_eq!(evaluator.config().days_per_month, 28);
    assert!(evaluator.config().enforce_category_match);

    let verdict = evaluator.evaluate(&input, today()).expect("complete form");
    assert_eq!(
        verdict.primary_reason(),
        Some("Previous echo was too recent. Recommended interval is 6 months.")
    );

    let silent = valvular_request(
        ValveType::TricuspidRegurgitation,
        ValveSeverity::Mild,
        days_ago(1),
        TimeInterval::Routine,
    );
    assert_eq!(
        evaluate(&silent, today()).expect("complete form").primary_reason(),
        None
    );
}
