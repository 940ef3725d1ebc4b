use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use echo_assistant::AssessmentOutcome;
use echo_core::{
    surveillance_interval, EchoType, Evaluator, EvaluatorConfig, ReferringDoctor, ScenarioInput,
    ValveSeverity, ValveType,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "echo-cli",
    about = "Check echocardiogram requests against appropriate-use rules."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a request form stored as JSON.
    Evaluate {
        /// Path to the request JSON file.
        #[arg(short, long)]
        input: PathBuf,
        /// Evaluation date (YYYY-MM-DD). Defaults to the local date.
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Optional evaluator config JSON file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the verdict as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Interpret a saved assistant answer.
    Interpret {
        /// Path to the answer, plain text or JSON.
        #[arg(short, long)]
        input: PathBuf,
        /// Print the assessment as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print categories, surveillance intervals and billing codes.
    Reference,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("echo_core=info".parse()?)
                .add_directive("echo_assistant=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match args.command {
        Command::Evaluate {
            input,
            today,
            config,
            json,
        } => evaluate(&input, today, config.as_deref(), json),
        Command::Interpret { input, json } => interpret(&input, json),
        Command::Reference => {
            print_reference();
            Ok(())
        }
    }
}

fn evaluate(
    input: &Path,
    today: Option<NaiveDate>,
    config: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(input)
        .with_context(|| format!("Could not read request file {input:?}"))?;
    let request: ScenarioInput = serde_json::from_str(&data)
        .with_context(|| format!("Request file {input:?} is not a valid request"))?;

    let config = match config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read config file {path:?}"))?;
            serde_json::from_str::<EvaluatorConfig>(&raw)
                .with_context(|| format!("Config file {path:?} is invalid"))?
        }
        None => EvaluatorConfig::default(),
    };

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let evaluator = Evaluator::new(config);
    info!(
        %today,
        echo_type = ?request.echo_type(),
        days_per_month = evaluator.config().days_per_month,
        "evaluating request"
    );

    let verdict = evaluator.evaluate(&request, today)?;
    info!(
        appropriate = verdict.is_appropriate,
        reason = verdict.primary_reason().unwrap_or("none"),
        "verdict ready"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        for line in verdict.summary_lines() {
            println!("{line}");
        }
        if !verdict.reasons.is_empty() {
            println!("Reasons:");
        }
        for reason in &verdict.reasons {
            println!("- {reason}");
        }
    }

    Ok(())
}

fn interpret(input: &Path, json: bool) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Could not read answer file {input:?}"))?;

    let assessment = echo_assistant::interpret(&raw);

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    let outcome = AssessmentOutcome::classify(&assessment);
    println!(
        "Outcome: {}\nRecommendation: {}\nRationale: {}\nNext Steps: {}\nConsult Other Teams: {}",
        serde_json::to_string(&outcome)?.trim_matches('"'),
        assessment.recommendation,
        assessment.rationale,
        assessment.next_steps,
        assessment.consult_other_teams
    );

    Ok(())
}

fn print_reference() {
    println!("Echo types and categories:");
    for echo_type in EchoType::ALL {
        let billing = match (
            echo_type.billing_code(None),
            echo_type.billing_code(Some(ReferringDoctor::GpRural)),
        ) {
            (Some(code), Some(rural)) if code != rural => format!("{code} (rural GP {rural})"),
            (Some(code), _) => code.to_string(),
            (None, _) => "none".to_string(),
        };
        println!("  {} [billing: {billing}]", echo_type.label());
        for category in echo_type.categories() {
            println!("    - {}", category.label());
        }
    }

    println!("Surveillance intervals:");
    for valve in ValveType::ALL {
        for severity in [
            ValveSeverity::Mild,
            ValveSeverity::Moderate,
            ValveSeverity::Severe,
        ] {
            if let Some(interval) = surveillance_interval(valve, severity) {
                println!(
                    "  {} {}: {} (at least {} months)",
                    severity.label(),
                    valve.label(),
                    interval.label,
                    interval.min_months
                );
            }
        }
    }
}
