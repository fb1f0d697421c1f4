//! Testing utilities for the Docket workspace
//!
//! In-memory implementations of every collaborator interface, plus shared
//! fixtures. The fakes honor the collaborator contracts: the store does
//! plain case-insensitive substring search and assigns `CASE-YYYY-XXXXX`
//! numbers; unconfigured sinks return skipped markers instead of erroring;
//! failure injection is available for exercising the degradation paths.

#![allow(missing_docs)]

use chrono::{Datelike, Utc};
use docket_model::{
    ActorContext, ActorPreferences, ActorRole, CaseAction, CaseId, CasePatch, CaseStatus,
    CaseSummary, CreatedCase, ExtractedCasePayload, ExtractionOutcome, HearingAck, HearingRecord,
    NewCase, NewHearing,
};
use docket_workflow::{
    CalendarOutcome, CalendarSink, CaseStore, CollabError, DocumentReminder, EmailOutcome,
    EmailSink, EntityExtractor, HearingEvent,
};
use parking_lot::Mutex;
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Characters used in generated case-number suffixes
const CASE_NUMBER_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A fully stored case: summary plus child records
#[derive(Debug, Clone)]
pub struct StoredCase {
    pub summary: CaseSummary,
    pub hearings: Vec<HearingRecord>,
    pub history_notes: Vec<String>,
    pub missing_fields: Vec<String>,
    pub documents_needed: Vec<String>,
}

/// In-memory case store with document-store semantics (last-write-wins)
#[derive(Debug, Default)]
pub struct InMemoryCaseStore {
    cases: Mutex<Vec<StoredCase>>,
    fail_searches: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryCaseStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing case summaries
    pub fn seed(&self, summaries: impl IntoIterator<Item = CaseSummary>) {
        let mut cases = self.cases.lock();
        for summary in summaries {
            cases.push(StoredCase {
                summary,
                hearings: Vec::new(),
                history_notes: Vec::new(),
                missing_fields: Vec::new(),
                documents_needed: Vec::new(),
            });
        }
    }

    /// Make every subsequent search fail
    pub fn fail_searches(&self, fail: bool) {
        self.fail_searches.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write (create/update/close/hearing) fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot a stored case for assertions
    #[must_use]
    pub fn case(&self, id: &CaseId) -> Option<StoredCase> {
        self.cases.lock().iter().find(|c| &c.summary.id == id).cloned()
    }

    /// Snapshot the first case whose name contains the fragment
    #[must_use]
    pub fn case_by_name(&self, fragment: &str) -> Option<StoredCase> {
        let fragment = fragment.to_lowercase();
        self.cases
            .lock()
            .iter()
            .find(|c| c.summary.case_name.to_lowercase().contains(&fragment))
            .cloned()
    }

    /// Number of stored cases
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.lock().len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.lock().is_empty()
    }

    fn generate_case_number() -> String {
        let mut rng = rand::rng();
        let suffix: String = (0..5)
            .map(|_| {
                let idx = rng.random_range(0..CASE_NUMBER_CHARSET.len());
                CASE_NUMBER_CHARSET[idx] as char
            })
            .collect();
        format!("CASE-{}-{suffix}", Utc::now().year())
    }

    fn check_write(&self) -> Result<(), CollabError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CollabError::Store("store write unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CaseStore for InMemoryCaseStore {
    async fn search(&self, query: &str) -> Result<Vec<CaseSummary>, CollabError> {
        if self.fail_searches.load(Ordering::SeqCst) {
            return Err(CollabError::Store("store search unavailable".to_string()));
        }
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let hits = self
            .cases
            .lock()
            .iter()
            .filter(|c| {
                let s = &c.summary;
                s.case_name.to_lowercase().contains(&query)
                    || s.case_number
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&query))
                    || s.client_name
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&query))
            })
            .map(|c| c.summary.clone())
            .collect();
        Ok(hits)
    }

    async fn get_by_id(&self, id: &CaseId) -> Result<CaseSummary, CollabError> {
        self.cases
            .lock()
            .iter()
            .find(|c| &c.summary.id == id)
            .map(|c| c.summary.clone())
            .ok_or_else(|| CollabError::Store(format!("case not found: {id}")))
    }

    async fn create(
        &self,
        data: NewCase,
        _actor: &ActorContext,
    ) -> Result<CreatedCase, CollabError> {
        self.check_write()?;
        let id = CaseId::new(uuid::Uuid::new_v4().to_string());
        let case_number = Self::generate_case_number();
        let summary = CaseSummary {
            id: id.clone(),
            case_name: data.case_name,
            case_number: Some(case_number.clone()),
            client_name: data.client_name,
            client_email: data.client_email,
            junior_name: data.junior_name,
            junior_email: data.junior_email,
            status: data.status,
            hearings_held: 0,
            next_hearing_date: data.next_hearing_date,
            welcome_sent: false,
            summary: data.summary,
            latest_outcome: None,
        };
        let is_draft = summary.status == CaseStatus::Draft;
        self.cases.lock().push(StoredCase {
            summary,
            hearings: Vec::new(),
            history_notes: Vec::new(),
            missing_fields: data.missing_fields,
            documents_needed: data.documents_needed,
        });
        Ok(CreatedCase {
            id,
            case_number: Some(case_number),
            is_draft,
        })
    }

    async fn update(
        &self,
        id: &CaseId,
        patch: CasePatch,
        _actor: &ActorContext,
    ) -> Result<(), CollabError> {
        self.check_write()?;
        let mut cases = self.cases.lock();
        let case = cases
            .iter_mut()
            .find(|c| &c.summary.id == id)
            .ok_or_else(|| CollabError::Store(format!("case not found: {id}")))?;

        let s = &mut case.summary;
        if let Some(status) = patch.status {
            s.status = status;
        }
        if let Some(date) = patch.next_hearing_date {
            s.next_hearing_date = Some(date);
        }
        if let Some(documents) = patch.documents_needed {
            case.documents_needed = documents;
        }
        if let Some(email) = patch.client_email {
            s.client_email = Some(email);
        }
        if let Some(name) = patch.client_name {
            s.client_name = Some(name);
        }
        if let Some(summary) = patch.case_summary {
            s.summary = Some(summary);
        }
        if let Some(outcome) = patch.latest_outcome {
            s.latest_outcome = Some(outcome);
        }
        // Case numbers are immutable once assigned
        if s.case_number.is_none() {
            if let Some(number) = patch.case_number {
                s.case_number = Some(number);
            }
        }
        if let Some(name) = patch.junior_name {
            s.junior_name = Some(name);
        }
        if let Some(email) = patch.junior_email {
            s.junior_email = Some(email);
        }
        if let Some(flag) = patch.welcome_sent {
            s.welcome_sent = flag;
        }
        Ok(())
    }

    async fn close(&self, id: &CaseId, _actor: &ActorContext) -> Result<(), CollabError> {
        self.check_write()?;
        let mut cases = self.cases.lock();
        let case = cases
            .iter_mut()
            .find(|c| &c.summary.id == id)
            .ok_or_else(|| CollabError::Store(format!("case not found: {id}")))?;
        case.summary.status = CaseStatus::Closed;
        Ok(())
    }

    async fn add_hearing(
        &self,
        id: &CaseId,
        hearing: NewHearing,
        _actor: &ActorContext,
    ) -> Result<HearingAck, CollabError> {
        self.check_write()?;
        let mut cases = self.cases.lock();
        let case = cases
            .iter_mut()
            .find(|c| &c.summary.id == id)
            .ok_or_else(|| CollabError::Store(format!("case not found: {id}")))?;
        let sequence_number = case.summary.hearings_held + 1;
        case.hearings.push(HearingRecord {
            sequence_number,
            date: hearing.date.unwrap_or_else(|| Utc::now().date_naive()),
            description: hearing.description,
            outcome: hearing.outcome,
            next_steps: hearing.next_steps,
            documents_submitted: hearing.documents_submitted,
            court_or_judge: hearing.court_or_judge,
        });
        case.summary.hearings_held = sequence_number;
        Ok(HearingAck {
            hearing_number: sequence_number,
        })
    }

    async fn append_history_note(
        &self,
        id: &CaseId,
        note: &str,
        _actor: &ActorContext,
    ) -> Result<(), CollabError> {
        let mut cases = self.cases.lock();
        let case = cases
            .iter_mut()
            .find(|c| &c.summary.id == id)
            .ok_or_else(|| CollabError::Store(format!("case not found: {id}")))?;
        case.history_notes.push(note.to_string());
        Ok(())
    }

    fn record_url(&self, id: &CaseId) -> String {
        format!("memstore://case/{id}")
    }
}

/// Recording calendar sink
#[derive(Debug)]
pub struct RecordingCalendar {
    configured: bool,
    failing: AtomicBool,
    next_event: AtomicU64,
    pub events: Mutex<Vec<HearingEvent>>,
    pub reminders: Mutex<Vec<DocumentReminder>>,
}

impl RecordingCalendar {
    #[must_use]
    pub fn new() -> Self {
        Self {
            configured: true,
            failing: AtomicBool::new(false),
            next_event: AtomicU64::new(1),
            events: Mutex::new(Vec::new()),
            reminders: Mutex::new(Vec::new()),
        }
    }

    /// A sink with no calendar configured: every call returns skipped
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Make every subsequent call fail
    pub fn fail(&self, fail: bool) {
        self.failing.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<bool, CollabError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CollabError::Calendar("calendar unavailable".to_string()));
        }
        Ok(self.configured)
    }
}

impl Default for RecordingCalendar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CalendarSink for RecordingCalendar {
    async fn create_hearing_event(
        &self,
        event: HearingEvent,
        _actor: &ActorContext,
    ) -> Result<CalendarOutcome, CollabError> {
        if !self.check()? {
            return Ok(CalendarOutcome::Skipped);
        }
        let n = self.next_event.fetch_add(1, Ordering::SeqCst);
        self.events.lock().push(event);
        Ok(CalendarOutcome::Scheduled {
            event_id: format!("evt-{n}"),
            link: Some(format!("calendar://event/evt-{n}")),
        })
    }

    async fn create_document_reminder(
        &self,
        reminder: DocumentReminder,
        _actor: &ActorContext,
    ) -> Result<Option<CalendarOutcome>, CollabError> {
        if !self.check()? {
            return Ok(None);
        }
        let n = self.next_event.fetch_add(1, Ordering::SeqCst);
        self.reminders.lock().push(reminder);
        Ok(Some(CalendarOutcome::Scheduled {
            event_id: format!("rem-{n}"),
            link: None,
        }))
    }
}

/// One captured outbound email
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Recording email sink
#[derive(Debug)]
pub struct RecordingMailer {
    configured: bool,
    failing: AtomicBool,
    pub sent: Mutex<Vec<SentEmail>>,
}

impl RecordingMailer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            configured: true,
            failing: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// A sink with no mailer configured: every call returns skipped
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Make every subsequent call fail
    pub fn fail(&self, fail: bool) {
        self.failing.store(fail, Ordering::SeqCst);
    }

    /// Emails sent so far, for assertions
    #[must_use]
    pub fn sent_to(&self, recipient: &str) -> Vec<SentEmail> {
        self.sent
            .lock()
            .iter()
            .filter(|e| e.to == recipient)
            .cloned()
            .collect()
    }
}

impl Default for RecordingMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EmailSink for RecordingMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<EmailOutcome, CollabError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CollabError::Email("mailer unavailable".to_string()));
        }
        if !self.configured {
            return Ok(EmailOutcome::Skipped);
        }
        self.sent.lock().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(EmailOutcome::Sent)
    }
}

/// Extractor that returns a preset outcome
#[derive(Debug)]
pub struct ScriptedExtractor {
    outcome: Mutex<ExtractionOutcome>,
    failing: AtomicBool,
}

impl ScriptedExtractor {
    #[must_use]
    pub fn new(outcome: ExtractionOutcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            failing: AtomicBool::new(false),
        }
    }

    /// Extractor yielding the given payloads
    #[must_use]
    pub fn with_payloads(payloads: Vec<ExtractedCasePayload>) -> Self {
        Self::new(ExtractionOutcome {
            cases: payloads,
            ..ExtractionOutcome::default()
        })
    }

    /// Make every subsequent extraction fail
    pub fn fail(&self, fail: bool) {
        self.failing.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl EntityExtractor for ScriptedExtractor {
    async fn extract(
        &self,
        _transcript: &str,
        _actor: &ActorContext,
    ) -> Result<ExtractionOutcome, CollabError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CollabError::Extractor("model unavailable".to_string()));
        }
        Ok(self.outcome.lock().clone())
    }

    async fn summarize_notes(&self, notes: &str) -> Result<String, CollabError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CollabError::Extractor("model unavailable".to_string()));
        }
        // Deterministic: first sentence, capped at 120 chars
        let first = notes.split('.').next().unwrap_or(notes).trim();
        Ok(first.chars().take(120).collect())
    }
}

/// A senior actor with a configured junior and real email
#[must_use]
pub fn senior_actor() -> ActorContext {
    ActorContext::new("user-senior", ActorRole::Senior, "Adv. Meera Rao")
        .with_email("meera@raochambers.in")
        .with_junior("Kiran Desai", "kiran@raochambers.in")
}

/// A junior actor with a real email and no delegation rights
#[must_use]
pub fn junior_actor() -> ActorContext {
    ActorContext::new("user-junior", ActorRole::Junior, "Kiran Desai")
        .with_email("kiran@raochambers.in")
        .with_preferences(ActorPreferences::default())
}

/// An update payload referencing the given lookup key
#[must_use]
pub fn update_payload(lookup_key: &str) -> ExtractedCasePayload {
    let mut payload = ExtractedCasePayload::new(CaseAction::UpdateExisting);
    payload.lookup_key = Some(lookup_key.to_string());
    payload
}

/// A create payload with the three mandatory fields
#[must_use]
pub fn create_payload(case_name: &str, client_name: &str, client_email: &str) -> ExtractedCasePayload {
    let mut payload = ExtractedCasePayload::new(CaseAction::CreateNew);
    payload.case_name = Some(case_name.to_string());
    payload.client_name = Some(client_name.to_string());
    payload.client_email = Some(client_email.to_string());
    payload
}
