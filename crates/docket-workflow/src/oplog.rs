//! Per-run operation log
//!
//! Append-only audit trail accumulated across a single workflow run and
//! returned to the caller with the response. Owned exclusively by one run,
//! never shared across runs, never persisted.

use chrono::{DateTime, Utc};
use docket_model::RunId;
use serde::{Deserialize, Serialize};

/// Operation type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// A case was created (active)
    CaseCreated,
    /// A placeholder or incomplete case was created as draft
    DraftCreated,
    /// A lookup key resolved to an existing case
    CaseLocated,
    /// A hearing record was appended
    HearingRecorded,
    /// A field patch was persisted
    CaseUpdated,
    /// A case transitioned to CLOSED
    CaseClosed,
    /// A calendar hearing event was scheduled
    EventScheduled,
    /// A document-collection reminder was scheduled
    ReminderScheduled,
    /// An email was sent
    EmailSent,
    /// A history note was appended
    NoteAppended,
    /// A proposed creation collided with an existing case
    DuplicateDetected,
    /// Resolution was ambiguous; clarification surfaced to the user
    ClarificationRequested,
    /// A payload failed
    Error,
}

/// One log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationEntry {
    /// Entry timestamp
    pub at: DateTime<Utc>,
    /// Operation type tag
    pub kind: OperationKind,
    /// Human-readable message
    pub message: String,
    /// Display name of the actor who triggered the run
    pub actor: String,
}

/// Append-only operation log, scoped to one workflow run
#[derive(Debug)]
pub struct OperationLog {
    run_id: RunId,
    actor: String,
    entries: Vec<OperationEntry>,
}

impl OperationLog {
    /// Start a log for a new run
    #[must_use]
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            run_id: RunId::new(),
            actor: actor.into(),
            entries: Vec::new(),
        }
    }

    /// Run identifier
    #[inline]
    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Append an entry stamped with the current time
    pub fn record(&mut self, kind: OperationKind, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(?kind, %message, "operation");
        self.entries.push(OperationEntry {
            at: Utc::now(),
            kind,
            message,
            actor: self.actor.clone(),
        });
    }

    /// Entries recorded so far
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[OperationEntry] {
        &self.entries
    }

    /// Consume the log, yielding its entries for the response
    #[inline]
    #[must_use]
    pub fn into_entries(self) -> Vec<OperationEntry> {
        self.entries
    }
}
