//! Case record types
//!
//! Defines the shared shapes exchanged with the record store:
//! - Case status lifecycle
//! - Search-result summaries consumed by matching and branching
//! - Sparse update patches
//! - Hearing records and store acknowledgements

use crate::ids::CaseId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display-name prefix given to auto-created placeholder drafts when an
/// update's lookup key resolves to nothing in the store.
pub const PLACEHOLDER_CASE_PREFIX: &str = "Unknown Case";

/// Check whether a case name is an auto-created placeholder draft
#[inline]
#[must_use]
pub fn is_placeholder_name(case_name: &str) -> bool {
    case_name.starts_with(PLACEHOLDER_CASE_PREFIX)
}

/// Case lifecycle status
///
/// `Closed` is terminal: this workflow never reopens a closed case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    /// Persisted with incomplete mandatory fields
    Draft,
    /// Complete and in progress
    #[default]
    Active,
    /// Hearing held, further hearings expected
    Continuing,
    /// Final hearing held, judgment delivered
    Finalized,
    /// Terminal state, irreversible via this workflow
    Closed,
    /// Awaiting input from the assigned lawyer
    ActionRequired,
}

impl CaseStatus {
    /// Map a status string from an extracted payload
    ///
    /// Unmapped values coerce to `Active` rather than failing the payload.
    #[must_use]
    pub fn from_payload_value(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "CONTINUING" => Self::Continuing,
            "FINALIZED" => Self::Finalized,
            "DRAFT" => Self::Draft,
            _ => Self::Active,
        }
    }

    /// Stable string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Active => "ACTIVE",
            Self::Continuing => "CONTINUING",
            Self::Finalized => "FINALIZED",
            Self::Closed => "CLOSED",
            Self::ActionRequired => "ACTION_REQUIRED",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search-result projection of a case record
///
/// This is what `CaseStore::search` and `get_by_id` return and what the
/// matcher, duplicate detector, and both branches consume. The full record
/// (hearing list included) stays inside the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSummary {
    /// Store-assigned identifier
    pub id: CaseId,
    /// Display title, never empty after creation
    pub case_name: String,
    /// Human-readable code, immutable once assigned
    pub case_number: Option<String>,
    /// Client display name
    pub client_name: Option<String>,
    /// Client email, if captured
    pub client_email: Option<String>,
    /// Delegated junior's name
    pub junior_name: Option<String>,
    /// Delegated junior's email
    pub junior_email: Option<String>,
    /// Current lifecycle status
    pub status: CaseStatus,
    /// Count of hearings held so far
    pub hearings_held: u32,
    /// Next scheduled hearing date
    pub next_hearing_date: Option<NaiveDate>,
    /// Whether the first client communication has gone out
    pub welcome_sent: bool,
    /// Free-text case summary
    pub summary: Option<String>,
    /// Free-text latest outcome
    pub latest_outcome: Option<String>,
}

impl CaseSummary {
    /// Create a minimal summary with the given id and name
    #[must_use]
    pub fn new(id: impl Into<CaseId>, case_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            case_name: case_name.into(),
            case_number: None,
            client_name: None,
            client_email: None,
            junior_name: None,
            junior_email: None,
            status: CaseStatus::Active,
            hearings_held: 0,
            next_hearing_date: None,
            welcome_sent: false,
            summary: None,
            latest_outcome: None,
        }
    }

    /// With case number
    #[inline]
    #[must_use]
    pub fn with_case_number(mut self, number: impl Into<String>) -> Self {
        self.case_number = Some(number.into());
        self
    }

    /// With client name
    #[inline]
    #[must_use]
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    /// With client email
    #[inline]
    #[must_use]
    pub fn with_client_email(mut self, email: impl Into<String>) -> Self {
        self.client_email = Some(email.into());
        self
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = status;
        self
    }

    /// With hearings held count
    #[inline]
    #[must_use]
    pub fn with_hearings_held(mut self, count: u32) -> Self {
        self.hearings_held = count;
        self
    }

    /// Whether this summary is an auto-created placeholder draft
    #[inline]
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        is_placeholder_name(&self.case_name)
    }
}

/// Data for creating a new case record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCase {
    /// Display title
    pub case_name: String,
    /// Client display name
    pub client_name: Option<String>,
    /// Client email
    pub client_email: Option<String>,
    /// Delegated junior's name
    pub junior_name: Option<String>,
    /// Delegated junior's email
    pub junior_email: Option<String>,
    /// Free-text case summary
    pub summary: Option<String>,
    /// Initial status (`Draft` when mandatory fields are missing)
    pub status: CaseStatus,
    /// First hearing date, if known
    pub next_hearing_date: Option<NaiveDate>,
    /// Outstanding required documents
    pub documents_needed: Vec<String>,
    /// Mandatory fields still absent at creation time
    pub missing_fields: Vec<String>,
}

/// Sparse update patch for an existing case
///
/// Only fields actually present in the triggering payload are set; an empty
/// patch is never sent to the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CasePatch {
    /// New lifecycle status
    pub status: Option<CaseStatus>,
    /// Next hearing date
    pub next_hearing_date: Option<NaiveDate>,
    /// Outstanding required documents
    pub documents_needed: Option<Vec<String>>,
    /// Client email
    pub client_email: Option<String>,
    /// Client name
    pub client_name: Option<String>,
    /// Case summary text
    pub case_summary: Option<String>,
    /// Latest outcome text
    pub latest_outcome: Option<String>,
    /// Case number, only ever set when the case lacks one
    pub case_number: Option<String>,
    /// Delegated junior's name
    pub junior_name: Option<String>,
    /// Delegated junior's email
    pub junior_email: Option<String>,
    /// First client communication flag
    pub welcome_sent: Option<bool>,
}

impl CasePatch {
    /// True when no field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.next_hearing_date.is_none()
            && self.documents_needed.is_none()
            && self.client_email.is_none()
            && self.client_name.is_none()
            && self.case_summary.is_none()
            && self.latest_outcome.is_none()
            && self.case_number.is_none()
            && self.junior_name.is_none()
            && self.junior_email.is_none()
            && self.welcome_sent.is_none()
    }
}

/// One recorded court appearance, child of a case record
///
/// Created exactly once per processed update that carries an outcome;
/// never mutated or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HearingRecord {
    /// 1-based sequence number, monotonic per case
    pub sequence_number: u32,
    /// Hearing date
    pub date: NaiveDate,
    /// Free-text description of what happened
    pub description: String,
    /// Free-text outcome
    pub outcome: Option<String>,
    /// Free-text next-steps note
    pub next_steps: Option<String>,
    /// Documents submitted at this hearing
    pub documents_submitted: Vec<String>,
    /// Court or judge identifier
    pub court_or_judge: Option<String>,
}

/// Data for appending a hearing to a case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewHearing {
    /// Hearing date
    pub date: Option<NaiveDate>,
    /// Free-text description of what happened
    pub description: String,
    /// Free-text outcome
    pub outcome: Option<String>,
    /// Free-text next-steps note
    pub next_steps: Option<String>,
    /// Documents submitted at this hearing
    pub documents_submitted: Vec<String>,
    /// Court or judge identifier
    pub court_or_judge: Option<String>,
}

/// Store acknowledgement for an appended hearing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HearingAck {
    /// Sequence number the store assigned (previous count + 1)
    pub hearing_number: u32,
}

/// Store acknowledgement for a created case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedCase {
    /// Assigned identifier
    pub id: CaseId,
    /// Assigned human-readable case number
    pub case_number: Option<String>,
    /// Whether the case was persisted as a draft
    pub is_draft: bool,
}
