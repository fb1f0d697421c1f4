//! Workflow configuration and result types
//!
//! Defines the shapes returned upward from a run:
//! - Per-payload outcomes with the actions taken
//! - The aggregated run result carrying the operation log
//! - Engine configuration

use crate::oplog::OperationEntry;
use docket_match::CandidateCase;
use docket_model::CaseId;
use serde::{Deserialize, Serialize};

/// Workflow engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Master toggle for outbound client emails
    pub send_client_emails: bool,
    /// Master toggle for junior-assignment and follow-up emails
    pub notify_juniors: bool,
    /// Default document reminder lead time in hours, used when the actor
    /// has no preference set
    pub default_reminder_lead_hours: u32,
}

impl WorkflowConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With client emails enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_client_emails(mut self, enabled: bool) -> Self {
        self.send_client_emails = enabled;
        self
    }

    /// With junior notifications enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_junior_notifications(mut self, enabled: bool) -> Self {
        self.notify_juniors = enabled;
        self
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            send_client_emails: true,
            notify_juniors: true,
            default_reminder_lead_hours: 24,
        }
    }
}

/// Status of one processed payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    /// New active case created
    Created,
    /// Case persisted as draft (missing fields or unresolved lookup)
    CreatedAsDraft,
    /// Existing case updated
    Updated,
    /// Resolution ambiguous; candidates returned for the user to pick
    ClarificationNeeded,
    /// Proposed creation collided with an existing case
    DuplicateCase,
    /// Payload carried an unrecognized action tag
    UnknownAction,
    /// Payload processing failed
    Error,
}

/// Reference to an already-existing case, returned on duplicate detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistingCaseRef {
    /// Store identifier
    pub id: CaseId,
    /// Case display title
    pub case_name: String,
    /// Human-readable case number
    pub case_number: Option<String>,
    /// Record-store URL for redirecting the user
    pub url: String,
}

/// Result of processing one extracted payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadOutcome {
    /// Outcome status
    pub status: OutcomeStatus,
    /// Case display title the payload resolved to (or proposed)
    pub case_name: String,
    /// Case number, when known
    pub case_number: Option<String>,
    /// Human-readable actions taken, in execution order
    pub actions: Vec<String>,
    /// Mandatory fields still missing (draft outcomes)
    pub missing_fields: Vec<String>,
    /// The colliding case (duplicate outcomes)
    pub existing_case: Option<ExistingCaseRef>,
    /// Scored candidates (clarification outcomes)
    pub candidates: Vec<CandidateCase>,
    /// Link or id of the scheduled calendar event
    pub calendar_event: Option<String>,
    /// Whether a client email went out
    pub email_sent: bool,
    /// Sequence number of the recorded hearing
    pub hearing_number: Option<u32>,
    /// Error message (error outcomes)
    pub error: Option<String>,
}

impl PayloadOutcome {
    /// Outcome with the given status and case name, everything else empty
    #[must_use]
    pub fn new(status: OutcomeStatus, case_name: impl Into<String>) -> Self {
        Self {
            status,
            case_name: case_name.into(),
            case_number: None,
            actions: Vec::new(),
            missing_fields: Vec::new(),
            existing_case: None,
            candidates: Vec::new(),
            calendar_event: None,
            email_sent: false,
            hearing_number: None,
            error: None,
        }
    }

    /// Error outcome for a failed payload
    #[must_use]
    pub fn error(case_name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut outcome = Self::new(OutcomeStatus::Error, case_name);
        outcome.error = Some(message.into());
        outcome
    }
}

/// Status of a whole workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Every payload processed without error
    Completed,
    /// At least one payload failed; the rest were still processed
    CompletedWithErrors,
    /// The extractor needs the whole note clarified
    ClarificationNeeded,
    /// The run failed before any payload could be processed
    Error,
}

/// Aggregated result of one workflow run
#[derive(Debug, Serialize, Deserialize)]
pub struct RunResult {
    /// Whether the run itself completed (per-payload errors included)
    pub success: bool,
    /// Run status
    pub status: RunStatus,
    /// Transcript-level summary from the extractor
    pub summary: Option<String>,
    /// Per-payload outcomes, in payload order
    pub cases: Vec<PayloadOutcome>,
    /// Operation log accumulated across the run
    pub operations: Vec<OperationEntry>,
    /// Whole-run error message
    pub error: Option<String>,
}
