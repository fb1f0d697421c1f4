//! Docket workflow simulator
//!
//! Runs the case-update engine against the in-memory collaborators, either
//! from a captured extraction JSON file or the built-in demo scenario.
//! Prints per-payload outcomes and the full operation log.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Arg, Command};
use docket_model::{
    ActorContext, CaseAction, CaseSummary, ExtractedCasePayload, ExtractionOutcome,
};
use docket_test_utils::{
    senior_actor, InMemoryCaseStore, RecordingCalendar, RecordingMailer, ScriptedExtractor,
};
use docket_workflow::{CaseWorkflow, RunResult};
use serde::Deserialize;
use std::sync::Arc;

/// Input file shape for `docket-sim run`
#[derive(Debug, Deserialize)]
struct SimInput {
    /// Actor running the workflow; defaults to the demo senior
    #[serde(default)]
    actor: Option<ActorContext>,
    /// Cases pre-seeded into the in-memory store
    #[serde(default)]
    seed: Vec<CaseSummary>,
    /// The captured extraction to process
    extraction: ExtractionOutcome,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Command::new("docket-sim")
        .version("0.1.0")
        .about("Docket workflow simulator over in-memory collaborators")
        .arg_required_else_help(true)
        .subcommand(Command::new("demo").about("Run the built-in two-payload demo scenario"))
        .subcommand(
            Command::new("run")
                .about("Process a captured extraction file")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .required(true)
                        .help("Path to a JSON file with {actor?, seed?, extraction}"),
                ),
        );

    match cli.get_matches().subcommand() {
        Some(("demo", _)) => run_demo().await,
        Some(("run", matches)) => {
            let path: &String = matches
                .get_one("input")
                .context("--input is required")?;
            run_file(path).await
        }
        _ => unreachable!("arg_required_else_help"),
    }
}

async fn run_file(path: &str) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading input file {path}"))?;
    let input: SimInput =
        serde_json::from_str(&raw).with_context(|| format!("parsing input file {path}"))?;

    let actor = input.actor.unwrap_or_else(senior_actor);
    let store = Arc::new(InMemoryCaseStore::new());
    store.seed(input.seed);

    let result = run_workflow(store, input.extraction, &actor).await;
    print_result(&result)
}

async fn run_demo() -> anyhow::Result<()> {
    let store = Arc::new(InMemoryCaseStore::new());
    store.seed([CaseSummary::new("demo-1", "Priya Sharma Bail Application")
        .with_client_name("Priya Sharma")
        .with_client_email("priya.sharma@gmail.com")
        .with_hearings_held(1)]);

    let mut update = ExtractedCasePayload::new(CaseAction::UpdateExisting);
    update.lookup_key = Some("Sharma".to_string());
    update.outcome = Some("Bail granted, sureties to be furnished".to_string());
    update.next_hearing_date = NaiveDate::from_ymd_opt(2025, 1, 15);
    update.next_hearing_time = Some("2:30 PM".to_string());

    let mut create = ExtractedCasePayload::new(CaseAction::CreateNew);
    create.case_name = Some("John Smith Property Dispute".to_string());
    create.client_name = Some("John Smith".to_string());
    create.client_email = Some("john.smith@outlook.com".to_string());
    create.documents_needed = vec!["sale deed".to_string(), "survey map".to_string()];

    let extraction = ExtractionOutcome {
        cases: vec![update, create],
        overall_summary: Some("One hearing update, one new property matter".to_string()),
        ..ExtractionOutcome::default()
    };

    let result = run_workflow(store, extraction, &senior_actor()).await;
    print_result(&result)
}

async fn run_workflow(
    store: Arc<InMemoryCaseStore>,
    extraction: ExtractionOutcome,
    actor: &ActorContext,
) -> RunResult {
    let workflow = CaseWorkflow::new(
        store,
        Arc::new(RecordingCalendar::new()),
        Arc::new(RecordingMailer::new()),
        // The scripted extractor is unused by process_extraction but
        // completes the collaborator set.
        Arc::new(ScriptedExtractor::with_payloads(Vec::new())),
    );
    workflow.process_extraction(extraction, actor).await
}

fn print_result(result: &RunResult) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
