use echo_core::guidance::{headline, missing_investigations, timeframe_note};
use echo_core::{
    evaluate, surveillance_interval, ArrhythmiaScenario, ArrhythmiaType, EchoType,
    InitialAssessment, ReferringDoctor, ScenarioInput, Stability, TimeInterval, ValveSeverity,
    ValveType,
};

#[test]
fn every_category_belongs_to_the_type_that_lists_it() {
    for echo_type in EchoType::ALL {
        assert!(!echo_type.categories().is_empty(), "{echo_type:?}");
        for category in echo_type.categories() {
            assert_eq!(category.echo_type(), echo_type, "{category:?}");
        }
    }
}

#[test]
fn billing_codes_by_echo_type() {
    assert_eq!(EchoType::Initial.billing_code(None), Some("55126"));
    assert_eq!(
        EchoType::Valvular.billing_code(Some(ReferringDoctor::Cardiologist)),
        Some("55127")
    );
    assert_eq!(EchoType::Valvular.billing_code(None), Some("55127"));
    assert_eq!(
        EchoType::Valvular.billing_code(Some(ReferringDoctor::GpRural)),
        Some("55128")
    );
    assert_eq!(EchoType::HeartFailure.billing_code(None), Some("55129"));
    assert_eq!(EchoType::Chemo.billing_code(None), None);
    assert_eq!(EchoType::Other.billing_code(None), None);
}

#[test]
fn surveillance_table_covers_left_sided_lesions_only() {
    let severe_as = surveillance_interval(ValveType::AorticStenosis, ValveSeverity::Severe)
        .expect("severe AS has an interval");
    assert_eq!((severe_as.min_months, severe_as.max_months), (6, 12));
    assert_eq!(severe_as.label, "6-12 monthly");

    let severe_ms = surveillance_interval(ValveType::MitralStenosis, ValveSeverity::Severe)
        .expect("severe MS has an interval");
    assert_eq!(severe_ms.label, "Annually");

    let mild_mr = surveillance_interval(ValveType::MitralRegurgitation, ValveSeverity::Mild)
        .expect("mild MR has an interval");
    assert_eq!(mild_mr.min_months, 36);

    let with_entries = ValveType::ALL
        .iter()
        .filter(|valve| surveillance_interval(**valve, ValveSeverity::Moderate).is_some())
        .count();
    assert_eq!(with_entries, 4);
}

#[test]
fn labels_are_for_display() {
    assert_eq!(TimeInterval::Urgent24h.label(), "Urgent (within 24 hours)");
    assert_eq!(TimeInterval::Routine.label(), "Routine (2-4 weeks)");
    assert_eq!(ValveType::AorticStenosis.label(), "Aortic Stenosis (AS)");
    assert_eq!(ValveSeverity::Moderate.label(), "Moderate");
    assert_eq!(
        ReferringDoctor::GpRural.label(),
        "General Practitioner (Rural - MMM 3 to 7)"
    );
}

#[test]
fn enum_wire_names_are_snake_case() {
    assert_eq!(
        serde_json::to_string(&TimeInterval::Urgent24h).expect("serializes"),
        "\"urgent24h\""
    );
    assert_eq!(
        serde_json::to_string(&EchoType::HeartFailure).expect("serializes"),
        "\"heart_failure\""
    );
    assert_eq!(
        serde_json::to_string(&ArrhythmiaType::FrequentPvcs).expect("serializes"),
        "\"frequent_pvcs\""
    );
}

#[test]
fn timeframe_notes_follow_urgency() {
    assert_eq!(
        timeframe_note(TimeInterval::Urgent48h),
        "For urgent/immediate tests, inpatient assessment is typically recommended."
    );
    assert_eq!(
        timeframe_note(TimeInterval::Prompt),
        "For routine/prompt tests, outpatient assessment is typically appropriate."
    );
    assert!(headline(false).ends_with("not indicated at this time."));
}

#[test]
fn missing_investigations_are_read_back_from_the_first_reason() {
    let input = ScenarioInput::initial(InitialAssessment::Arrhythmia(ArrhythmiaScenario::new(
        ArrhythmiaType::NewAf,
        Stability::Stable,
        Vec::<String>::new(),
    )));
    let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date");
    let verdict = evaluate(&input, today).expect("initial path never fails");

    assert_eq!(
        missing_investigations(&verdict.reasons),
        vec!["ECG", "thyroid function tests", "electrolytes"]
    );
    assert!(missing_investigations(&["Urgent echocardiogram is always appropriate".to_string()])
        .is_empty());
    assert!(missing_investigations(&[]).is_empty());

    let lines = verdict.summary_lines();
    assert_eq!(lines[0], headline(false));
    assert_eq!(
        lines[1],
        "Please complete the following tests before requesting an echocardiogram: ECG, thyroid function tests, electrolytes"
    );
    assert_eq!(lines.last().map(String::as_str), Some("Billing code: 55126"));
}

#[test]
fn summary_lines_for_an_indicated_study() {
    let input = ScenarioInput::initial(InitialAssessment::Arrhythmia(ArrhythmiaScenario::new(
        ArrhythmiaType::NewVt,
        Stability::Stable,
        ["ECG", "electrolytes"],
    )));
    let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date");
    let verdict = evaluate(&input, today).expect("initial path never fails");

    assert_eq!(
        verdict.summary_lines(),
        vec![
            headline(true).to_string(),
            "Recommended Timeframe: Urgent (within 24 hours)".to_string(),
            "Patient Type: This is recommended as an Inpatient test.".to_string(),
            "Note: For urgent/immediate tests, inpatient assessment is typically recommended."
                .to_string(),
            "Billing code: 55126".to_string(),
        ]
    );
}
