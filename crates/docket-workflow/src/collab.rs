//! Collaborator interfaces
//!
//! The engine is stateless over these seams: every external system (record
//! store, calendar, email, entity extractor) is an injected trait object,
//! so the whole workflow runs against in-memory fakes with zero network
//! dependency. Calendar and email sinks must no-op gracefully (return a
//! skipped marker) when unconfigured rather than erroring.

use crate::error::CollabError;
use chrono::NaiveDateTime;
use docket_model::{
    ActorContext, CaseId, CasePatch, CaseSummary, CreatedCase, ExtractionOutcome, HearingAck,
    NewCase, NewHearing,
};
use serde::{Deserialize, Serialize};

/// Case record store (document-store semantics, last-write-wins)
#[async_trait::async_trait]
pub trait CaseStore: Send + Sync {
    /// Case-insensitive substring search over case name, case number, and
    /// client name
    async fn search(&self, query: &str) -> Result<Vec<CaseSummary>, CollabError>;

    /// Fetch a single case by identifier
    async fn get_by_id(&self, id: &CaseId) -> Result<CaseSummary, CollabError>;

    /// Persist a new case, assigning id and case number
    async fn create(
        &self,
        data: NewCase,
        actor: &ActorContext,
    ) -> Result<CreatedCase, CollabError>;

    /// Apply a sparse patch to an existing case
    async fn update(
        &self,
        id: &CaseId,
        patch: CasePatch,
        actor: &ActorContext,
    ) -> Result<(), CollabError>;

    /// Transition a case to CLOSED (irreversible)
    async fn close(&self, id: &CaseId, actor: &ActorContext) -> Result<(), CollabError>;

    /// Append a hearing record, returning its assigned sequence number
    async fn add_hearing(
        &self,
        id: &CaseId,
        hearing: NewHearing,
        actor: &ActorContext,
    ) -> Result<HearingAck, CollabError>;

    /// Append a free-text history note (best-effort; callers swallow failures)
    async fn append_history_note(
        &self,
        id: &CaseId,
        note: &str,
        actor: &ActorContext,
    ) -> Result<(), CollabError>;

    /// Derived record-store URL for redirecting a user to an existing case
    fn record_url(&self, id: &CaseId) -> String;
}

/// Calendar event for a scheduled hearing (fixed two-hour window)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HearingEvent {
    /// Case display title
    pub case_name: String,
    /// Event start
    pub start: NaiveDateTime,
    /// Event end
    pub end: NaiveDateTime,
    /// Free-text event description
    pub description: String,
}

/// Reminder to collect outstanding documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReminder {
    /// Case display title
    pub case_name: String,
    /// Documents still outstanding
    pub documents: Vec<String>,
    /// Reminder lead time in hours
    pub lead_hours: u32,
}

/// Result of a calendar sink call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarOutcome {
    /// Event created
    Scheduled {
        /// Sink-assigned event identifier
        event_id: String,
        /// Shareable event link, when the sink provides one
        link: Option<String>,
    },
    /// Sink unconfigured or declined; workflow continues
    Skipped,
}

/// Result of an email sink call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailOutcome {
    /// Message accepted for delivery
    Sent,
    /// Sink unconfigured; workflow continues
    Skipped,
}

/// Calendar (scheduler) sink
#[async_trait::async_trait]
pub trait CalendarSink: Send + Sync {
    /// Create a hearing event; `Skipped` when unconfigured
    async fn create_hearing_event(
        &self,
        event: HearingEvent,
        actor: &ActorContext,
    ) -> Result<CalendarOutcome, CollabError>;

    /// Create a document-collection reminder; `None` when unconfigured
    async fn create_document_reminder(
        &self,
        reminder: DocumentReminder,
        actor: &ActorContext,
    ) -> Result<Option<CalendarOutcome>, CollabError>;
}

/// Email (notifier) sink
#[async_trait::async_trait]
pub trait EmailSink: Send + Sync {
    /// Send a message; `Skipped` when unconfigured
    async fn send(&self, to: &str, subject: &str, body: &str)
        -> Result<EmailOutcome, CollabError>;
}

/// Upstream natural-language entity extractor
///
/// Treated as opaque: prompt engineering and provider fallback live behind
/// this seam. The workflow never retries it.
#[async_trait::async_trait]
pub trait EntityExtractor: Send + Sync {
    /// Extract structured case payloads from a transcript
    async fn extract(
        &self,
        transcript: &str,
        actor: &ActorContext,
    ) -> Result<ExtractionOutcome, CollabError>;

    /// Synthesize a short case summary from raw notes
    async fn summarize_notes(&self, notes: &str) -> Result<String, CollabError>;
}
