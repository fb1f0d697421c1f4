//! Update branch
//!
//! Locates the referenced case, records the hearing, applies the sparse
//! field patch, runs status actions, schedules, and notifies — in that
//! order, each sub-step independently committed. An unresolvable lookup
//! key degrades to a placeholder draft instead of failing; ambiguity
//! surfaces as a clarification request.

use crate::email::resolve_client_email;
use crate::engine::CaseWorkflow;
use crate::error::WorkflowError;
use crate::oplog::{OperationKind, OperationLog};
use crate::types::{OutcomeStatus, PayloadOutcome};
use chrono::Utc;
use docket_match::{resolve_case, MatchOutcome};
use docket_model::{
    is_placeholder_name, ActorContext, CasePatch, CaseStatus, CaseSummary, ExtractedCasePayload,
    NewCase, NewHearing, PLACEHOLDER_CASE_PREFIX,
};

/// Fields a placeholder draft is always missing
const PLACEHOLDER_MISSING_FIELDS: [&str; 3] = ["case_verification", "client_name", "client_email"];

impl CaseWorkflow {
    /// Update an existing case per the extracted payload
    pub(crate) async fn update_existing(
        &self,
        payload: ExtractedCasePayload,
        actor: &ActorContext,
        log: &mut OperationLog,
    ) -> Result<PayloadOutcome, WorkflowError> {
        let lookup_key = payload
            .lookup_key
            .clone()
            .or_else(|| payload.case_name.clone())
            .or_else(|| payload.client_name.clone());
        let Some(lookup_key) = lookup_key else {
            // An update with no usable reference at all still must not
            // error; it lands in the same placeholder-draft path.
            return self
                .create_unknown_draft(&payload, "(no case reference)", actor, log)
                .await;
        };

        let candidates = self.search_candidates(&lookup_key).await?;
        match resolve_case(&lookup_key, candidates) {
            MatchOutcome::Match(case) => self.apply_update(case, payload, actor, log).await,
            MatchOutcome::NotFound { .. } => {
                self.create_unknown_draft(&payload, &lookup_key, actor, log)
                    .await
            }
            MatchOutcome::Ambiguous(candidates) => {
                // Placeholder drafts from earlier unresolved updates must
                // not drown out the real case they were standing in for.
                let real: Vec<_> = candidates
                    .into_iter()
                    .filter(|candidate| !is_placeholder_name(&candidate.case_name))
                    .collect();
                match real.len() {
                    0 => {
                        self.create_unknown_draft(&payload, &lookup_key, actor, log)
                            .await
                    }
                    1 => {
                        let case = self.store.get_by_id(&real[0].id).await?;
                        self.apply_update(case, payload, actor, log).await
                    }
                    _ => {
                        tracing::info!(
                            %lookup_key,
                            count = real.len(),
                            "ambiguous lookup, deferring to user"
                        );
                        log.record(
                            OperationKind::ClarificationRequested,
                            format!("{} candidates match \"{lookup_key}\"", real.len()),
                        );
                        let mut outcome =
                            PayloadOutcome::new(OutcomeStatus::ClarificationNeeded, lookup_key);
                        outcome.candidates = real;
                        Ok(outcome)
                    }
                }
            }
        }
    }

    /// Apply the payload to a located case
    async fn apply_update(
        &self,
        case: CaseSummary,
        payload: ExtractedCasePayload,
        actor: &ActorContext,
        log: &mut OperationLog,
    ) -> Result<PayloadOutcome, WorkflowError> {
        tracing::info!(case = %case.case_name, id = %case.id, "updating case");
        log.record(
            OperationKind::CaseLocated,
            format!("located \"{}\" for update", case.case_name),
        );
        let mut outcome = PayloadOutcome::new(OutcomeStatus::Updated, case.case_name.clone());
        outcome.case_number = case.case_number.clone();

        // 1. Record the hearing, if the note carried an outcome
        let mut hearing_number = None;
        if let Some(outcome_text) = &payload.outcome {
            let hearing = NewHearing {
                date: Some(Utc::now().date_naive()),
                description: payload
                    .raw_notes
                    .clone()
                    .unwrap_or_else(|| outcome_text.clone()),
                outcome: Some(outcome_text.clone()),
                next_steps: payload
                    .next_hearing_date
                    .map(|date| format!("Next hearing scheduled for {date}")),
                documents_submitted: payload.documents_needed.clone(),
                court_or_judge: None,
            };
            let ack = self.store.add_hearing(&case.id, hearing, actor).await?;
            hearing_number = Some(ack.hearing_number);
            log.record(
                OperationKind::HearingRecorded,
                format!(
                    "hearing #{} recorded for \"{}\"",
                    ack.hearing_number, case.case_name
                ),
            );
            outcome
                .actions
                .push(format!("recorded hearing #{}", ack.hearing_number));
        }
        outcome.hearing_number = hearing_number;

        // 2. Build and persist the sparse patch
        let new_status = payload
            .status
            .as_deref()
            .map(CaseStatus::from_payload_value);
        let mut patch = CasePatch {
            status: new_status,
            next_hearing_date: payload.next_hearing_date,
            documents_needed: (!payload.documents_needed.is_empty())
                .then(|| payload.documents_needed.clone()),
            client_email: payload.client_email.clone(),
            client_name: payload.client_name.clone(),
            case_summary: payload.case_summary.clone(),
            latest_outcome: payload.outcome.clone(),
            // Case numbers are immutable once assigned
            case_number: if case.case_number.is_none() {
                payload.case_number.clone()
            } else {
                None
            },
            ..CasePatch::default()
        };

        if payload.assign_to_junior {
            let junior_name = payload
                .junior_name
                .clone()
                .or_else(|| actor.junior_name.clone());
            let junior_email = payload
                .junior_email
                .clone()
                .or_else(|| actor.junior_email.clone());
            patch.junior_name.clone_from(&junior_name);
            patch.junior_email.clone_from(&junior_email);
            // Assignment notifies on updates too, not just creation
            if self.config.notify_juniors {
                if let Some(email) = &junior_email {
                    let subject = format!("Case assigned to you: {}", case.case_name);
                    let body = format!(
                        "{} assigned you to \"{}\".\n\nLatest update: {}",
                        actor.display_name,
                        case.case_name,
                        payload.outcome.as_deref().unwrap_or("(none yet)"),
                    );
                    if self.send_email(email, &subject, &body, log).await {
                        outcome.actions.push("notified junior".to_string());
                    }
                }
            }
        }

        if !patch.is_empty() {
            self.store.update(&case.id, patch, actor).await?;
            log.record(
                OperationKind::CaseUpdated,
                format!("patched \"{}\"", case.case_name),
            );
            outcome.actions.push("updated case fields".to_string());
        }

        let client_email = resolve_client_email(
            payload
                .client_email
                .as_deref()
                .or(case.client_email.as_deref()),
            actor,
        )
        .filter(|_| self.client_emails_enabled(actor));

        // 3. Status actions
        if new_status == Some(CaseStatus::Finalized) {
            self.store.close(&case.id, actor).await?;
            log.record(
                OperationKind::CaseClosed,
                format!("closed \"{}\"", case.case_name),
            );
            outcome.actions.push("closed case".to_string());
            if let Some(email) = &client_email {
                let subject = format!("Your case has concluded: {}", case.case_name);
                let body = format!(
                    "Dear {},\n\nYour case \"{}\" has concluded.\n\nFinal outcome: {}\n\nRegards,\n{}",
                    payload
                        .client_name
                        .as_deref()
                        .or(case.client_name.as_deref())
                        .unwrap_or("client"),
                    case.case_name,
                    payload.outcome.as_deref().unwrap_or("see case record"),
                    actor.display_name,
                );
                if self.send_email(email, &subject, &body, log).await {
                    outcome.email_sent = true;
                    outcome.actions.push("sent case-closed notice".to_string());
                }
            }
        }

        // 4. Scheduling happens whenever a next hearing date is present,
        //    regardless of the status branch
        if let Some(date) = payload.next_hearing_date {
            outcome.calendar_event = self
                .schedule_hearing_event(
                    &case.case_name,
                    date,
                    payload.next_hearing_time.as_deref(),
                    actor,
                    log,
                )
                .await;
            if outcome.calendar_event.is_some() {
                outcome.actions.push("scheduled hearing event".to_string());
            }
        }

        // 5. Document handling
        if !payload.documents_needed.is_empty() {
            if self
                .schedule_document_reminder(&case.case_name, &payload.documents_needed, actor, log)
                .await
            {
                outcome
                    .actions
                    .push("scheduled document reminder".to_string());
            }
            if let Some(email) = &client_email {
                let subject = format!("Documents needed: {}", case.case_name);
                let body = format!(
                    "Please arrange the following documents for \"{}\":\n\n- {}",
                    case.case_name,
                    payload.documents_needed.join("\n- "),
                );
                if self.send_email(email, &subject, &body, log).await {
                    outcome.email_sent = true;
                    outcome.actions.push("sent document request".to_string());
                }
            }
            if actor.can_delegate() && self.config.notify_juniors {
                if let Some(junior_email) = &actor.junior_email {
                    let subject = format!("Follow up on documents: {}", case.case_name);
                    let body = format!(
                        "Please follow up with the client on:\n\n- {}",
                        payload.documents_needed.join("\n- "),
                    );
                    if self.send_email(junior_email, &subject, &body, log).await {
                        outcome
                            .actions
                            .push("asked junior to follow up on documents".to_string());
                    }
                }
            }
        }

        // 6. Hearing report to the client
        if let Some(number) = hearing_number {
            if let Some(email) = &client_email {
                let subject = format!("Hearing #{number} update: {}", case.case_name);
                let mut body = format!(
                    "Dear {},\n\nHearing #{number} for \"{}\" has been held.\n\nOutcome: {}\n",
                    payload
                        .client_name
                        .as_deref()
                        .or(case.client_name.as_deref())
                        .unwrap_or("client"),
                    case.case_name,
                    payload.outcome.as_deref().unwrap_or("recorded"),
                );
                if let Some(date) = payload.next_hearing_date {
                    body.push_str(&format!("\nNext hearing: {date}\n"));
                }
                body.push_str(&format!("\nRegards,\n{}", actor.display_name));
                if self.send_email(email, &subject, &body, log).await {
                    outcome.email_sent = true;
                    outcome.actions.push("sent hearing report".to_string());
                }
            }
            // The first hearing report doubles as the welcome
            // communication; mark it so retries stay idempotent.
            if number == 1 && !case.welcome_sent {
                let patch = CasePatch {
                    welcome_sent: Some(true),
                    ..CasePatch::default()
                };
                self.store.update(&case.id, patch, actor).await?;
            }
        }

        Ok(outcome)
    }

    /// Synthesize a placeholder draft for an unresolvable case reference
    pub(crate) async fn create_unknown_draft(
        &self,
        payload: &ExtractedCasePayload,
        lookup_key: &str,
        actor: &ActorContext,
        log: &mut OperationLog,
    ) -> Result<PayloadOutcome, WorkflowError> {
        let case_name = format!("{PLACEHOLDER_CASE_PREFIX}: {lookup_key}");
        tracing::info!(lookup_key, "no case matched, creating placeholder draft");

        let missing_fields: Vec<String> = PLACEHOLDER_MISSING_FIELDS
            .iter()
            .map(ToString::to_string)
            .collect();
        let draft = NewCase {
            case_name: case_name.clone(),
            client_name: payload.client_name.clone(),
            client_email: payload.client_email.clone(),
            junior_name: None,
            junior_email: None,
            summary: payload
                .outcome
                .clone()
                .or_else(|| payload.raw_notes.clone()),
            status: CaseStatus::Draft,
            next_hearing_date: payload.next_hearing_date,
            documents_needed: payload.documents_needed.clone(),
            missing_fields: missing_fields.clone(),
        };
        let created = self.store.create(draft, actor).await?;
        log.record(
            OperationKind::DraftCreated,
            format!("created placeholder draft \"{case_name}\""),
        );

        // Best-effort breadcrumb back to the unresolved reference
        let note = format!("Created from an update note; original case reference: \"{lookup_key}\"");
        match self
            .store
            .append_history_note(&created.id, &note, actor)
            .await
        {
            Ok(()) => log.record(OperationKind::NoteAppended, note),
            Err(err) => {
                tracing::warn!(error = %err, "history note failed, continuing");
            }
        }

        let mut outcome = PayloadOutcome::new(OutcomeStatus::CreatedAsDraft, case_name);
        outcome.case_number = created.case_number;
        outcome.missing_fields = missing_fields;
        outcome
            .actions
            .push("created placeholder draft for verification".to_string());
        Ok(outcome)
    }
}
