//! Extracted case payloads
//!
//! The upstream entity extractor returns loosely-shaped JSON; this module
//! gives it a strongly-typed boundary. Every field except the action tag is
//! optional, and [`ExtractedCasePayload::normalized`] is applied immediately
//! on receipt, before any branch logic runs: strings are trimmed, empties
//! dropped to `None`, and role constraints from the actor context enforced.

use crate::actor::ActorContext;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Action classification produced by the extractor
///
/// Unknown tags are preserved in `Other` and routed to the
/// "unknown action" result instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CaseAction {
    /// Update an existing case
    UpdateExisting,
    /// Create a new case
    CreateNew,
    /// Extractor could not disambiguate; ask the user
    ClarificationNeeded,
    /// Unrecognized action tag, carried verbatim
    Other(String),
}

impl From<String> for CaseAction {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "UPDATE_EXISTING" => Self::UpdateExisting,
            "CREATE_NEW" => Self::CreateNew,
            "CLARIFICATION_NEEDED" => Self::ClarificationNeeded,
            _ => Self::Other(value),
        }
    }
}

impl From<CaseAction> for String {
    fn from(action: CaseAction) -> Self {
        match action {
            CaseAction::UpdateExisting => "UPDATE_EXISTING".to_string(),
            CaseAction::CreateNew => "CREATE_NEW".to_string(),
            CaseAction::ClarificationNeeded => "CLARIFICATION_NEEDED".to_string(),
            CaseAction::Other(tag) => tag,
        }
    }
}

/// One extracted case payload, transient for a single workflow run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedCasePayload {
    /// Action classification
    #[serde(rename = "action_type")]
    pub action: CaseAction,
    /// Case number or client name used to locate the case; never a
    /// compound description
    #[serde(default)]
    pub lookup_key: Option<String>,
    /// Case display title
    #[serde(default)]
    pub case_name: Option<String>,
    /// Human-readable case number
    #[serde(default)]
    pub case_number: Option<String>,
    /// Client display name
    #[serde(default)]
    pub client_name: Option<String>,
    /// Client email
    #[serde(default)]
    pub client_email: Option<String>,
    /// Junior's name from the note
    #[serde(default)]
    pub junior_name: Option<String>,
    /// Junior's email from the note
    #[serde(default)]
    pub junior_email: Option<String>,
    /// Hearing outcome text; presence triggers hearing recording
    #[serde(default)]
    pub outcome: Option<String>,
    /// Status string in the payload vocabulary
    #[serde(default)]
    pub status: Option<String>,
    /// Replacement case summary text
    #[serde(default)]
    pub case_summary: Option<String>,
    /// Next hearing date
    #[serde(default)]
    pub next_hearing_date: Option<NaiveDate>,
    /// Next hearing time as spoken, e.g. "14:30" or "2:30 PM"
    #[serde(default)]
    pub next_hearing_time: Option<String>,
    /// Outstanding required documents
    #[serde(default)]
    pub documents_needed: Vec<String>,
    /// Whether the note asked for junior delegation
    #[serde(default)]
    pub assign_to_junior: bool,
    /// Mandatory fields the extractor already flagged as missing
    #[serde(default)]
    pub missing_fields: Vec<String>,
    /// Raw transcript fragment this payload came from
    #[serde(default)]
    pub raw_notes: Option<String>,
}

impl ExtractedCasePayload {
    /// Minimal payload with the given action
    #[must_use]
    pub fn new(action: CaseAction) -> Self {
        Self {
            action,
            lookup_key: None,
            case_name: None,
            case_number: None,
            client_name: None,
            client_email: None,
            junior_name: None,
            junior_email: None,
            outcome: None,
            status: None,
            case_summary: None,
            next_hearing_date: None,
            next_hearing_time: None,
            documents_needed: Vec::new(),
            assign_to_junior: false,
            missing_fields: Vec::new(),
            raw_notes: None,
        }
    }

    /// Normalize against the actor context
    ///
    /// Trims every string field, drops empties to `None`, removes empty
    /// document/missing-field entries, and forces `assign_to_junior` off
    /// for actors who cannot delegate.
    #[must_use]
    pub fn normalized(mut self, actor: &ActorContext) -> Self {
        self.lookup_key = clean(self.lookup_key);
        self.case_name = clean(self.case_name);
        self.case_number = clean(self.case_number);
        self.client_name = clean(self.client_name);
        self.client_email = clean(self.client_email);
        self.junior_name = clean(self.junior_name);
        self.junior_email = clean(self.junior_email);
        self.outcome = clean(self.outcome);
        self.status = clean(self.status);
        self.case_summary = clean(self.case_summary);
        self.next_hearing_time = clean(self.next_hearing_time);
        self.raw_notes = clean(self.raw_notes);
        self.documents_needed = clean_list(self.documents_needed);
        self.missing_fields = clean_list(self.missing_fields);
        if !actor.can_delegate() {
            self.assign_to_junior = false;
            self.junior_name = None;
            self.junior_email = None;
        }
        self
    }

    /// Display name for results and logs when no case was resolved yet
    #[must_use]
    pub fn display_name(&self) -> String {
        self.case_name
            .clone()
            .or_else(|| self.lookup_key.clone())
            .or_else(|| self.client_name.clone())
            .unwrap_or_else(|| "(unnamed case)".to_string())
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|s| clean(Some(s)))
        .collect()
}

/// Aggregate result of one extraction call over a transcript
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// Extracted payloads, processed strictly in order
    #[serde(default)]
    pub cases: Vec<ExtractedCasePayload>,
    /// Transcript-level summary
    #[serde(default)]
    pub overall_summary: Option<String>,
    /// Whether the extractor needs the whole note clarified
    #[serde(default)]
    pub requires_clarification: bool,
    /// Message to relay when clarification is required
    #[serde(default)]
    pub clarification_message: Option<String>,
}
