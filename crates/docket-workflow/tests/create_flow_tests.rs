//! Create-branch integration tests against the in-memory collaborators

use chrono::NaiveDate;
use docket_model::{ActorPreferences, ActorRole, CaseStatus, CaseSummary, ExtractionOutcome};
use docket_test_utils::{
    create_payload, senior_actor, InMemoryCaseStore, RecordingCalendar, RecordingMailer,
    ScriptedExtractor,
};
use docket_workflow::{CaseWorkflow, OutcomeStatus, RunResult};
use regex::Regex;
use std::sync::Arc;

struct Harness {
    store: Arc<InMemoryCaseStore>,
    calendar: Arc<RecordingCalendar>,
    mailer: Arc<RecordingMailer>,
    workflow: CaseWorkflow,
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryCaseStore::new());
    let calendar = Arc::new(RecordingCalendar::new());
    let mailer = Arc::new(RecordingMailer::new());
    let workflow = CaseWorkflow::new(
        store.clone(),
        calendar.clone(),
        mailer.clone(),
        Arc::new(ScriptedExtractor::with_payloads(Vec::new())),
    );
    Harness {
        store,
        calendar,
        mailer,
        workflow,
    }
}

async fn run_one(
    harness: &Harness,
    payload: docket_model::ExtractedCasePayload,
    actor: &docket_model::ActorContext,
) -> RunResult {
    harness
        .workflow
        .process_extraction(
            ExtractionOutcome {
                cases: vec![payload],
                ..ExtractionOutcome::default()
            },
            actor,
        )
        .await
}

#[tokio::test]
async fn complete_payload_creates_active_case() {
    let h = harness();
    let payload = create_payload(
        "John Smith Property Dispute",
        "John Smith",
        "john@example.com",
    );

    let result = run_one(&h, payload, &senior_actor()).await;
    let outcome = &result.cases[0];

    assert_eq!(outcome.status, OutcomeStatus::Created);
    assert!(outcome.missing_fields.is_empty());

    let number_format = Regex::new(r"^CASE-\d{4}-[A-Z0-9]{5}$").unwrap();
    assert!(number_format.is_match(outcome.case_number.as_deref().unwrap()));

    let stored = h.store.case_by_name("John Smith").unwrap();
    assert_eq!(stored.summary.status, CaseStatus::Active);

    // No delegation requested: nobody is emailed at intake
    assert!(h.mailer.sent.lock().is_empty());
}

#[tokio::test]
async fn missing_field_creates_silent_draft() {
    let h = harness();
    let mut payload = create_payload("Patel Tax Appeal", "Dev Patel", "dev.patel@gmail.com");
    payload.client_email = None;
    payload.next_hearing_date = NaiveDate::from_ymd_opt(2025, 2, 1);
    payload.documents_needed = vec!["assessment order".to_string()];

    let result = run_one(&h, payload, &senior_actor()).await;
    let outcome = &result.cases[0];

    assert_eq!(outcome.status, OutcomeStatus::CreatedAsDraft);
    assert!(outcome.missing_fields.contains(&"client_email".to_string()));

    let stored = h.store.case_by_name("Patel Tax").unwrap();
    assert_eq!(stored.summary.status, CaseStatus::Draft);

    // Incomplete data must not trigger any communication or scheduling
    assert!(h.mailer.sent.lock().is_empty());
    assert!(h.calendar.events.lock().is_empty());
    assert!(h.calendar.reminders.lock().is_empty());
}

#[tokio::test]
async fn duplicate_client_blocks_creation() {
    let h = harness();
    h.store.seed([CaseSummary::new("c-1", "Sharma Bail Application")
        .with_client_name("Priya Sharma")
        .with_case_number("CASE-2024-AAAAA")]);

    let payload = create_payload(
        "Sharma New Property Matter",
        "Priya Sharma",
        "priya.sharma@gmail.com",
    );

    let result = run_one(&h, payload, &senior_actor()).await;
    let outcome = &result.cases[0];

    assert_eq!(outcome.status, OutcomeStatus::DuplicateCase);
    let existing = outcome.existing_case.as_ref().unwrap();
    assert_eq!(existing.case_name, "Sharma Bail Application");
    assert_eq!(existing.url, "memstore://case/c-1");

    // Creation never proceeds past a detected duplicate
    assert_eq!(h.store.len(), 1);
}

#[tokio::test]
async fn requested_delegation_notifies_junior_not_client() {
    let h = harness();
    let mut payload = create_payload(
        "Mehta Lease Renewal",
        "Arun Mehta",
        "arun.mehta@gmail.com",
    );
    payload.assign_to_junior = true;
    payload.documents_needed = vec!["lease deed".to_string()];

    let result = run_one(&h, payload, &senior_actor()).await;
    let outcome = &result.cases[0];

    assert_eq!(outcome.status, OutcomeStatus::Created);
    assert!(outcome.actions.iter().any(|a| a == "notified junior"));

    let stored = h.store.case_by_name("Mehta Lease").unwrap();
    assert_eq!(stored.summary.junior_email.as_deref(), Some("kiran@raochambers.in"));

    assert!(!h.mailer.sent_to("kiran@raochambers.in").is_empty());
    assert_eq!(h.calendar.reminders.lock().len(), 1);
    // Client communication is withheld until the first hearing
    assert!(h.mailer.sent_to("arun.mehta@gmail.com").is_empty());
}

#[tokio::test]
async fn auto_assign_preference_delegates_without_request() {
    let h = harness();
    let actor = senior_actor().with_preferences(ActorPreferences {
        auto_assign_junior: true,
        ..ActorPreferences::default()
    });
    let payload = create_payload("Rao Probate Matter", "Sunita Rao", "sunita.rao@gmail.com");

    let result = run_one(&h, payload, &actor).await;
    assert_eq!(result.cases[0].status, OutcomeStatus::Created);
    assert_eq!(h.mailer.sent_to("kiran@raochambers.in").len(), 1);
}

#[tokio::test]
async fn junior_actor_never_delegates() {
    let h = harness();
    let actor = docket_model::ActorContext::new("u-2", ActorRole::Junior, "Kiran Desai")
        .with_email("kiran@raochambers.in");
    let mut payload = create_payload("Verma Appeal", "Raj Verma", "raj.verma@gmail.com");
    payload.assign_to_junior = true;
    payload.junior_email = Some("other@firm.com".to_string());

    let result = run_one(&h, payload, &actor).await;
    assert_eq!(result.cases[0].status, OutcomeStatus::Created);
    assert!(h.mailer.sent.lock().is_empty());
}

#[tokio::test]
async fn duplicate_search_failure_never_blocks_creation() {
    let h = harness();
    h.store.fail_searches(true);
    let payload = create_payload(
        "Iyer Trademark Opposition",
        "Lakshmi Iyer",
        "lakshmi.iyer@gmail.com",
    );

    let result = run_one(&h, payload, &senior_actor()).await;
    assert_eq!(result.cases[0].status, OutcomeStatus::Created);
    assert_eq!(h.store.len(), 1);
}

#[tokio::test]
async fn first_hearing_date_lands_on_calendar() {
    let h = harness();
    let mut payload = create_payload(
        "Joshi Eviction Suit",
        "Anand Joshi",
        "anand.joshi@gmail.com",
    );
    payload.next_hearing_date = NaiveDate::from_ymd_opt(2025, 3, 10);
    payload.next_hearing_time = Some("11:00".to_string());

    let result = run_one(&h, payload, &senior_actor()).await;
    let outcome = &result.cases[0];

    assert_eq!(outcome.status, OutcomeStatus::Created);
    assert!(outcome.calendar_event.is_some());

    let events = h.calendar.events.lock();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].start.to_string(), "2025-03-10 11:00:00");
}

#[tokio::test]
async fn raw_notes_synthesize_missing_summary() {
    let h = harness();
    let mut payload = create_payload(
        "Kapoor Custody Petition",
        "Nisha Kapoor",
        "nisha.kapoor@gmail.com",
    );
    payload.raw_notes = Some(
        "Met Nisha about custody of the two children. Father has filed in family court."
            .to_string(),
    );

    let result = run_one(&h, payload, &senior_actor()).await;
    assert_eq!(result.cases[0].status, OutcomeStatus::Created);

    let stored = h.store.case_by_name("Kapoor Custody").unwrap();
    // The scripted extractor keeps the first sentence
    assert_eq!(
        stored.summary.summary.as_deref(),
        Some("Met Nisha about custody of the two children")
    );
}
