//! Workflow engine
//!
//! The central orchestrator: one transcript in, one aggregated result out.
//! Each extracted payload is routed to the update or create branch; payloads
//! are processed strictly in order, and one payload's failure never aborts
//! its siblings. All collaborator calls are awaited in sequence so the
//! operation log reads deterministically.

use crate::collab::{
    CalendarOutcome, CalendarSink, CaseStore, DocumentReminder, EmailOutcome, EmailSink,
    EntityExtractor, HearingEvent,
};
use crate::error::CollabError;
use crate::oplog::{OperationKind, OperationLog};
use crate::schedule::event_window;
use crate::types::{OutcomeStatus, PayloadOutcome, RunResult, RunStatus, WorkflowConfig};
use chrono::NaiveDate;
use docket_match::search_terms;
use docket_model::{ActorContext, CaseAction, CaseSummary, ExtractedCasePayload, ExtractionOutcome};
use std::sync::Arc;

/// The case-update workflow engine
///
/// Holds no live network state: every external system is an injected
/// trait object, and the engine itself is freely shareable across runs.
pub struct CaseWorkflow {
    pub(crate) store: Arc<dyn CaseStore>,
    pub(crate) calendar: Arc<dyn CalendarSink>,
    pub(crate) mailer: Arc<dyn EmailSink>,
    pub(crate) extractor: Arc<dyn EntityExtractor>,
    pub(crate) config: WorkflowConfig,
}

impl CaseWorkflow {
    /// Create an engine over the given collaborators
    #[must_use]
    pub fn new(
        store: Arc<dyn CaseStore>,
        calendar: Arc<dyn CalendarSink>,
        mailer: Arc<dyn EmailSink>,
        extractor: Arc<dyn EntityExtractor>,
    ) -> Self {
        Self {
            store,
            calendar,
            mailer,
            extractor,
            config: WorkflowConfig::default(),
        }
    }

    /// With configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Process a voice-note transcript end to end
    ///
    /// Runs the entity extractor, then each extracted payload through the
    /// router. Extraction failure is the only whole-run failure mode; it
    /// is never retried here.
    pub async fn process_transcript(&self, transcript: &str, actor: &ActorContext) -> RunResult {
        tracing::info!(actor = %actor.display_name, "processing transcript");
        let extraction = match self.extractor.extract(transcript, actor).await {
            Ok(extraction) => extraction,
            Err(err) => {
                tracing::error!(error = %err, "extraction failed");
                let mut log = OperationLog::new(&actor.display_name);
                log.record(OperationKind::Error, format!("extraction failed: {err}"));
                return RunResult {
                    success: false,
                    status: RunStatus::Error,
                    summary: None,
                    cases: Vec::new(),
                    operations: log.into_entries(),
                    error: Some(err.to_string()),
                };
            }
        };
        self.process_extraction(extraction, actor).await
    }

    /// Process an already-extracted outcome
    ///
    /// Entry point for callers that ran extraction elsewhere (or for
    /// replaying a captured extraction).
    pub async fn process_extraction(
        &self,
        extraction: ExtractionOutcome,
        actor: &ActorContext,
    ) -> RunResult {
        let mut log = OperationLog::new(&actor.display_name);

        if extraction.requires_clarification && extraction.cases.is_empty() {
            let message = extraction
                .clarification_message
                .unwrap_or_else(|| "the note needs clarification".to_string());
            log.record(OperationKind::ClarificationRequested, message.clone());
            return RunResult {
                success: true,
                status: RunStatus::ClarificationNeeded,
                summary: Some(message),
                cases: Vec::new(),
                operations: log.into_entries(),
                error: None,
            };
        }

        let mut outcomes = Vec::with_capacity(extraction.cases.len());
        for payload in extraction.cases {
            let outcome = self.process_payload(payload, actor, &mut log).await;
            outcomes.push(outcome);
        }

        let status = if outcomes.iter().any(|o| o.status == OutcomeStatus::Error) {
            RunStatus::CompletedWithErrors
        } else {
            RunStatus::Completed
        };
        RunResult {
            success: true,
            status,
            summary: extraction.overall_summary,
            cases: outcomes,
            operations: log.into_entries(),
            error: None,
        }
    }

    /// Route one payload to its branch
    ///
    /// The per-payload catch-all lives here: any branch error becomes an
    /// `Error` outcome and processing moves on to the next payload.
    /// Side effects already applied by the failed branch are not rolled
    /// back; each sub-step is independently committed.
    pub async fn process_payload(
        &self,
        payload: ExtractedCasePayload,
        actor: &ActorContext,
        log: &mut OperationLog,
    ) -> PayloadOutcome {
        let payload = payload.normalized(actor);
        let display_name = payload.display_name();
        tracing::info!(action = ?payload.action, case = %display_name, "routing payload");

        let result = match payload.action.clone() {
            CaseAction::UpdateExisting => self.update_existing(payload, actor, log).await,
            CaseAction::CreateNew => self.create_new(payload, actor, log).await,
            CaseAction::ClarificationNeeded => {
                log.record(
                    OperationKind::ClarificationRequested,
                    format!("clarification requested for \"{display_name}\""),
                );
                Ok(PayloadOutcome::new(
                    OutcomeStatus::ClarificationNeeded,
                    display_name.clone(),
                ))
            }
            CaseAction::Other(tag) => {
                tracing::warn!(%tag, "unknown action type, skipping payload");
                Ok(PayloadOutcome::new(
                    OutcomeStatus::UnknownAction,
                    display_name.clone(),
                ))
            }
        };

        match result {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, case = %display_name, "payload failed");
                log.record(OperationKind::Error, format!("{display_name}: {err}"));
                PayloadOutcome::error(display_name, err.to_string())
            }
        }
    }

    /// Search the store for lookup-key candidates
    ///
    /// One search per term (the full key plus the first-word fallback);
    /// the matcher dedups by id afterwards.
    pub(crate) async fn search_candidates(
        &self,
        lookup_key: &str,
    ) -> Result<Vec<CaseSummary>, CollabError> {
        let mut hits = Vec::new();
        for term in search_terms(lookup_key) {
            hits.extend(self.store.search(&term).await?);
        }
        Ok(hits)
    }

    /// Whether client emails are enabled for this run
    pub(crate) fn client_emails_enabled(&self, actor: &ActorContext) -> bool {
        self.config.send_client_emails && actor.preferences.send_client_emails
    }

    /// Send an email, degrading failure to a skipped outcome
    pub(crate) async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        log: &mut OperationLog,
    ) -> bool {
        match self.mailer.send(to, subject, body).await {
            Ok(EmailOutcome::Sent) => {
                log.record(OperationKind::EmailSent, format!("sent \"{subject}\" to {to}"));
                true
            }
            Ok(EmailOutcome::Skipped) => {
                tracing::debug!(to, "email sink unconfigured, skipped");
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, to, "email send failed, continuing");
                false
            }
        }
    }

    /// Schedule a hearing event, degrading failure to `None`
    pub(crate) async fn schedule_hearing_event(
        &self,
        case_name: &str,
        date: NaiveDate,
        time: Option<&str>,
        actor: &ActorContext,
        log: &mut OperationLog,
    ) -> Option<String> {
        let (start, end) = event_window(date, time);
        let event = HearingEvent {
            case_name: case_name.to_string(),
            start,
            end,
            description: format!("Court hearing for {case_name}"),
        };
        match self.calendar.create_hearing_event(event, actor).await {
            Ok(CalendarOutcome::Scheduled { event_id, link }) => {
                log.record(
                    OperationKind::EventScheduled,
                    format!("hearing event for \"{case_name}\" at {start}"),
                );
                Some(link.unwrap_or(event_id))
            }
            Ok(CalendarOutcome::Skipped) => {
                tracing::debug!(case_name, "calendar sink unconfigured, skipped");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, case_name, "calendar event failed, continuing");
                None
            }
        }
    }

    /// Schedule a document-collection reminder, degrading failure to false
    pub(crate) async fn schedule_document_reminder(
        &self,
        case_name: &str,
        documents: &[String],
        actor: &ActorContext,
        log: &mut OperationLog,
    ) -> bool {
        let reminder = DocumentReminder {
            case_name: case_name.to_string(),
            documents: documents.to_vec(),
            lead_hours: if actor.preferences.reminder_lead_hours > 0 {
                actor.preferences.reminder_lead_hours
            } else {
                self.config.default_reminder_lead_hours
            },
        };
        match self.calendar.create_document_reminder(reminder, actor).await {
            Ok(Some(_)) => {
                log.record(
                    OperationKind::ReminderScheduled,
                    format!("document reminder for \"{case_name}\" ({} documents)", documents.len()),
                );
                true
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(error = %err, case_name, "document reminder failed, continuing");
                false
            }
        }
    }
}
