//! Update-branch integration tests against the in-memory collaborators

use chrono::NaiveDate;
use docket_model::{CaseStatus, CaseSummary, ExtractionOutcome};
use docket_test_utils::{
    senior_actor, update_payload, InMemoryCaseStore, RecordingCalendar, RecordingMailer,
    ScriptedExtractor,
};
use docket_workflow::{CaseWorkflow, OutcomeStatus, RunResult};
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
) -> RunResult {
    harness
        .workflow
        .process_extraction(
            ExtractionOutcome {
                cases: vec![payload],
                ..ExtractionOutcome::default()
            },
            &senior_actor(),
        )
        .await
}

#[tokio::test]
async fn update_records_hearing_schedules_and_notifies() {
    let h = harness();
    h.store.seed([CaseSummary::new("c-1", "Sharma Bail Application")
        .with_client_name("Sharma")
        .with_client_email("sharma@gmail.com")
        .with_hearings_held(2)]);

    let mut payload = update_payload("Sharma");
    payload.outcome = Some("Bail granted".to_string());
    payload.next_hearing_date = NaiveDate::from_ymd_opt(2025, 1, 15);

    let result = run_one(&h, payload).await;
    let outcome = &result.cases[0];

    assert_eq!(outcome.status, OutcomeStatus::Updated);
    assert_eq!(outcome.hearing_number, Some(3));
    assert!(outcome.calendar_event.is_some());
    assert!(outcome.email_sent);

    let stored = h.store.case_by_name("Sharma Bail").unwrap();
    assert_eq!(stored.summary.hearings_held, 3);
    assert_eq!(stored.summary.latest_outcome.as_deref(), Some("Bail granted"));
    assert_eq!(stored.hearings.len(), 1);
    assert_eq!(stored.hearings[0].sequence_number, 3);

    let reports = h.mailer.sent_to("sharma@gmail.com");
    assert_eq!(reports.len(), 1);
    assert!(reports[0].subject.contains("Hearing #3"));
    assert_eq!(h.calendar.events.lock().len(), 1);
}

#[tokio::test]
async fn unresolved_lookup_creates_placeholder_draft() {
    let h = harness();

    let mut payload = update_payload("Nonexistent Person");
    payload.outcome = Some("Hearing adjourned".to_string());

    let result = run_one(&h, payload).await;
    let outcome = &result.cases[0];

    assert_eq!(outcome.status, OutcomeStatus::CreatedAsDraft);
    assert_eq!(outcome.case_name, "Unknown Case: Nonexistent Person");
    assert!(outcome
        .missing_fields
        .contains(&"case_verification".to_string()));

    let stored = h.store.case_by_name("Unknown Case").unwrap();
    assert_eq!(stored.summary.status, CaseStatus::Draft);
    assert_eq!(stored.summary.summary.as_deref(), Some("Hearing adjourned"));
    assert!(stored.history_notes[0].contains("Nonexistent Person"));

    // Drafts never trigger outbound communication
    assert!(h.mailer.sent.lock().is_empty());
}

#[tokio::test]
async fn ambiguous_lookup_lists_both_candidates() {
    let h = harness();
    h.store.seed([
        CaseSummary::new("c-1", "Arun Mehta Contract Breach"),
        CaseSummary::new("c-2", "Arun Mehta Property Case"),
    ]);

    let result = run_one(&h, update_payload("Arun Mehta")).await;
    let outcome = &result.cases[0];

    assert_eq!(outcome.status, OutcomeStatus::ClarificationNeeded);
    assert_eq!(outcome.candidates.len(), 2);
    let names: Vec<_> = outcome
        .candidates
        .iter()
        .map(|c| c.case_name.as_str())
        .collect();
    assert!(names.contains(&"Arun Mehta Contract Breach"));
    assert!(names.contains(&"Arun Mehta Property Case"));
}

#[tokio::test]
async fn placeholder_drafts_filtered_from_ambiguity() {
    let h = harness();
    h.store.seed([
        CaseSummary::new("c-1", "Unknown Case: Mehta"),
        CaseSummary::new("c-2", "Arun Mehta Contract Breach"),
    ]);

    let mut payload = update_payload("Mehta");
    payload.outcome = Some("Arguments heard".to_string());

    let result = run_one(&h, payload).await;
    let outcome = &result.cases[0];

    // The real case wins once the placeholder is filtered out
    assert_eq!(outcome.status, OutcomeStatus::Updated);
    assert_eq!(outcome.case_name, "Arun Mehta Contract Breach");
}

#[tokio::test]
async fn finalized_status_closes_case_and_notifies_client() {
    let h = harness();
    h.store.seed([CaseSummary::new("c-1", "Sharma Bail Application")
        .with_client_name("Sharma")
        .with_client_email("sharma@gmail.com")]);

    let mut payload = update_payload("Sharma");
    payload.outcome = Some("Judgment delivered in client's favor".to_string());
    payload.status = Some("FINALIZED".to_string());

    let result = run_one(&h, payload).await;
    let outcome = &result.cases[0];

    assert_eq!(outcome.status, OutcomeStatus::Updated);
    assert!(outcome.actions.iter().any(|a| a == "closed case"));
    assert!(outcome.email_sent);

    let stored = h.store.case_by_name("Sharma").unwrap();
    assert_eq!(stored.summary.status, CaseStatus::Closed);

    let sent = h.mailer.sent_to("sharma@gmail.com");
    assert!(sent.iter().any(|e| e.subject.contains("concluded")));
}

#[tokio::test]
async fn first_hearing_sets_welcome_flag_once() {
    let h = harness();
    h.store.seed([CaseSummary::new("c-1", "Sharma Bail Application")
        .with_client_name("Sharma")
        .with_client_email("sharma@gmail.com")]);

    let mut payload = update_payload("Sharma");
    payload.outcome = Some("First hearing held".to_string());

    let result = run_one(&h, payload).await;
    assert_eq!(result.cases[0].hearing_number, Some(1));

    let stored = h.store.case_by_name("Sharma").unwrap();
    assert!(stored.summary.welcome_sent);

    // No separate welcome email: the hearing report is the first contact
    let sent = h.mailer.sent_to("sharma@gmail.com");
    assert_eq!(sent.len(), 1);
    assert!(sent[0].subject.contains("Hearing #1"));
}

#[tokio::test]
async fn junior_assignment_notifies_on_update() {
    let h = harness();
    h.store.seed([CaseSummary::new("c-1", "Sharma Bail Application")
        .with_client_name("Sharma")]);

    let mut payload = update_payload("Sharma");
    payload.assign_to_junior = true;

    let result = run_one(&h, payload).await;
    let outcome = &result.cases[0];

    assert_eq!(outcome.status, OutcomeStatus::Updated);
    assert!(outcome.actions.iter().any(|a| a == "notified junior"));

    let stored = h.store.case_by_name("Sharma").unwrap();
    assert_eq!(stored.summary.junior_name.as_deref(), Some("Kiran Desai"));
    assert_eq!(
        h.mailer.sent_to("kiran@raochambers.in").len(),
        1
    );
}

#[tokio::test]
async fn placeholder_client_email_falls_back_to_actor() {
    let h = harness();
    h.store.seed([CaseSummary::new("c-1", "Sharma Bail Application")
        .with_client_name("Sharma")
        .with_client_email("test@example.com")]);

    let mut payload = update_payload("Sharma");
    payload.outcome = Some("Bail granted".to_string());

    let result = run_one(&h, payload).await;
    assert!(result.cases[0].email_sent);

    // The dummy address is overridden by the actor's own email
    assert!(h.mailer.sent_to("test@example.com").is_empty());
    assert_eq!(h.mailer.sent_to("meera@raochambers.in").len(), 1);
}

#[tokio::test]
async fn store_write_failure_is_payload_error() {
    let h = harness();
    h.store.seed([CaseSummary::new("c-1", "Sharma Bail Application")
        .with_client_name("Sharma")]);
    h.store.fail_writes(true);

    let mut payload = update_payload("Sharma");
    payload.outcome = Some("Bail granted".to_string());

    let result = run_one(&h, payload).await;
    let outcome = &result.cases[0];

    assert_eq!(outcome.status, OutcomeStatus::Error);
    assert!(outcome.error.as_deref().unwrap().contains("store"));
    // The run itself still completes
    assert!(result.success);
}

#[tokio::test]
async fn calendar_failure_degrades_without_aborting() {
    let h = harness();
    h.store.seed([CaseSummary::new("c-1", "Sharma Bail Application")
        .with_client_name("Sharma")
        .with_client_email("sharma@gmail.com")]);
    h.calendar.fail(true);

    let mut payload = update_payload("Sharma");
    payload.outcome = Some("Bail granted".to_string());
    payload.next_hearing_date = NaiveDate::from_ymd_opt(2025, 1, 15);

    let result = run_one(&h, payload).await;
    let outcome = &result.cases[0];

    assert_eq!(outcome.status, OutcomeStatus::Updated);
    assert!(outcome.calendar_event.is_none());
    // Hearing recording and client notification still happened
    assert_eq!(outcome.hearing_number, Some(1));
    assert!(outcome.email_sent);
}

#[tokio::test]
async fn document_handling_reminds_and_requests() {
    let h = harness();
    h.store.seed([CaseSummary::new("c-1", "Sharma Bail Application")
        .with_client_name("Sharma")
        .with_client_email("sharma@gmail.com")]);

    let mut payload = update_payload("Sharma");
    payload.documents_needed = vec!["surety affidavit".to_string(), "id proof".to_string()];

    let result = run_one(&h, payload).await;
    let outcome = &result.cases[0];

    assert_eq!(outcome.status, OutcomeStatus::Updated);
    assert_eq!(h.calendar.reminders.lock().len(), 1);

    // Client gets the document request, the junior gets a follow-up
    let client_mail = h.mailer.sent_to("sharma@gmail.com");
    assert!(client_mail.iter().any(|e| e.subject.contains("Documents needed")));
    let junior_mail = h.mailer.sent_to("kiran@raochambers.in");
    assert!(junior_mail.iter().any(|e| e.subject.contains("Follow up")));
}
