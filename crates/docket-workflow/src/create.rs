//! Create branch
//!
//! Validates required fields, checks for duplicates, persists the case as
//! draft or active, and runs the intake side effects. Client communication
//! is deliberately withheld at intake: the client first hears from the firm
//! at the first hearing milestone.

use crate::engine::CaseWorkflow;
use crate::error::WorkflowError;
use crate::oplog::{OperationKind, OperationLog};
use crate::types::{ExistingCaseRef, OutcomeStatus, PayloadOutcome};
use docket_match::{duplicate_search_key, find_duplicate, ProposedCase};
use docket_model::{ActorContext, CaseStatus, ExtractedCasePayload, NewCase};

/// Mandatory fields for an active (non-draft) case
const REQUIRED_FIELDS: [&str; 3] = ["case_name", "client_name", "client_email"];

impl CaseWorkflow {
    /// Create a new case from the extracted payload
    pub(crate) async fn create_new(
        &self,
        payload: ExtractedCasePayload,
        actor: &ActorContext,
        log: &mut OperationLog,
    ) -> Result<PayloadOutcome, WorkflowError> {
        let display_name = payload.display_name();

        // 1. Compute missing mandatory fields
        let mut missing_fields: Vec<String> = Vec::new();
        let present = [
            payload.case_name.is_some(),
            payload.client_name.is_some(),
            payload.client_email.is_some(),
        ];
        for (field, present) in REQUIRED_FIELDS.iter().zip(present) {
            if !present {
                missing_fields.push((*field).to_string());
            }
        }
        if actor.can_delegate()
            && payload.assign_to_junior
            && payload.junior_email.is_none()
            && actor.junior_email.is_none()
        {
            missing_fields.push("junior_email".to_string());
        }
        for field in &payload.missing_fields {
            if !missing_fields.contains(field) {
                missing_fields.push(field.clone());
            }
        }

        // 2. Synthesize a summary from raw notes when none was extracted
        let summary = match (&payload.case_summary, &payload.raw_notes) {
            (Some(summary), _) => Some(summary.clone()),
            (None, Some(notes)) => match self.extractor.summarize_notes(notes).await {
                Ok(summary) => Some(summary),
                Err(err) => {
                    tracing::warn!(error = %err, "summary synthesis failed, keeping raw notes");
                    Some(notes.clone())
                }
            },
            (None, None) => None,
        };

        // 3. Duplicate check; search failures are swallowed so the check
        //    can never block a legitimate creation
        let proposed = ProposedCase::new(
            payload.case_name.as_deref(),
            payload.client_name.as_deref(),
        );
        if let Some(key) = duplicate_search_key(&proposed) {
            let hits = match self.search_candidates(&key).await {
                Ok(hits) => hits,
                Err(err) => {
                    tracing::warn!(error = %err, "duplicate search failed, proceeding");
                    Vec::new()
                }
            };
            if let Some(existing) = find_duplicate(&proposed, &hits) {
                tracing::info!(
                    proposed = %display_name,
                    existing = %existing.case_name,
                    "duplicate creation attempt blocked"
                );
                log.record(
                    OperationKind::DuplicateDetected,
                    format!(
                        "\"{display_name}\" matches existing case \"{}\"",
                        existing.case_name
                    ),
                );
                let mut outcome =
                    PayloadOutcome::new(OutcomeStatus::DuplicateCase, display_name);
                outcome.existing_case = Some(ExistingCaseRef {
                    url: self.store.record_url(&existing.id),
                    id: existing.id,
                    case_name: existing.case_name,
                    case_number: existing.case_number,
                });
                return Ok(outcome);
            }
        }

        // 4. Persist, draft when incomplete
        let is_draft = !missing_fields.is_empty();
        let delegate = payload.assign_to_junior
            || (actor.can_delegate() && actor.preferences.auto_assign_junior);
        let junior_name = delegate
            .then(|| payload.junior_name.clone().or_else(|| actor.junior_name.clone()))
            .flatten();
        let junior_email = delegate
            .then(|| payload.junior_email.clone().or_else(|| actor.junior_email.clone()))
            .flatten();
        let data = NewCase {
            case_name: display_name.clone(),
            client_name: payload.client_name.clone(),
            client_email: payload.client_email.clone(),
            junior_name,
            junior_email: junior_email.clone(),
            summary,
            status: if is_draft {
                CaseStatus::Draft
            } else {
                CaseStatus::Active
            },
            next_hearing_date: payload.next_hearing_date,
            documents_needed: payload.documents_needed.clone(),
            missing_fields: missing_fields.clone(),
        };
        let created = self.store.create(data, actor).await?;

        // 5. Drafts return immediately: incomplete data must not trigger
        //    client or junior communication
        if is_draft {
            log.record(
                OperationKind::DraftCreated,
                format!(
                    "created draft \"{display_name}\" (missing: {})",
                    missing_fields.join(", ")
                ),
            );
            let mut outcome = PayloadOutcome::new(OutcomeStatus::CreatedAsDraft, display_name);
            outcome.case_number = created.case_number;
            outcome.missing_fields = missing_fields;
            outcome.actions.push("created draft case".to_string());
            return Ok(outcome);
        }

        log.record(
            OperationKind::CaseCreated,
            format!(
                "created \"{display_name}\" ({})",
                created.case_number.as_deref().unwrap_or("no number")
            ),
        );
        let mut outcome = PayloadOutcome::new(OutcomeStatus::Created, display_name.clone());
        outcome.case_number = created.case_number;
        outcome.actions.push("created case".to_string());

        // 6. Junior assignment notification
        if delegate && self.config.notify_juniors {
            if let Some(email) = &junior_email {
                let subject = format!("New case assigned to you: {display_name}");
                let body = format!(
                    "{} assigned you to the new case \"{display_name}\".\n\nSummary: {}",
                    actor.display_name,
                    payload.case_summary.as_deref().unwrap_or("see case record"),
                );
                if self.send_email(email, &subject, &body, log).await {
                    outcome.actions.push("notified junior".to_string());
                }
            }
        }

        // 7. Document-collection flow (no client email at intake)
        if !payload.documents_needed.is_empty() {
            if self
                .schedule_document_reminder(&display_name, &payload.documents_needed, actor, log)
                .await
            {
                outcome
                    .actions
                    .push("scheduled document reminder".to_string());
            }
            if actor.can_delegate() && self.config.notify_juniors {
                if let Some(email) = &actor.junior_email {
                    let subject = format!("Collect documents: {display_name}");
                    let body = format!(
                        "Please collect the following for \"{display_name}\":\n\n- {}",
                        payload.documents_needed.join("\n- "),
                    );
                    if self.send_email(email, &subject, &body, log).await {
                        outcome
                            .actions
                            .push("asked junior to collect documents".to_string());
                    }
                }
            }
        }

        // 8. First hearing on the calendar, when known
        if let Some(date) = payload.next_hearing_date {
            outcome.calendar_event = self
                .schedule_hearing_event(
                    &display_name,
                    date,
                    payload.next_hearing_time.as_deref(),
                    actor,
                    log,
                )
                .await;
            if outcome.calendar_event.is_some() {
                outcome.actions.push("scheduled first hearing".to_string());
            }
        }

        // Client communication intentionally withheld until the first
        // hearing milestone.
        Ok(outcome)
    }
}
