//! Docket Workflow - case-update orchestration engine
//!
//! The central engine that:
//! - Routes extracted case payloads to the update or create branch
//! - Resolves lookup keys through the matcher, degrading to placeholder
//!   drafts or clarification requests instead of hard failures
//! - Blocks duplicate case creation
//! - Sequences persistence, scheduling, and notification side effects
//!   deterministically, with an append-only per-run operation log
//!
//! # Example
//!
//! ```rust,ignore
//! use docket_workflow::{CaseWorkflow, WorkflowConfig};
//!
//! # async fn example(store: std::sync::Arc<dyn docket_workflow::CaseStore>,
//! #                  calendar: std::sync::Arc<dyn docket_workflow::CalendarSink>,
//! #                  mailer: std::sync::Arc<dyn docket_workflow::EmailSink>,
//! #                  extractor: std::sync::Arc<dyn docket_workflow::EntityExtractor>,
//! #                  actor: docket_model::ActorContext) {
//! let workflow = CaseWorkflow::new(store, calendar, mailer, extractor);
//! let result = workflow.process_transcript("Sharma hearing went well...", &actor).await;
//! println!("{} payloads processed", result.cases.len());
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod collab;
pub mod email;
pub mod engine;
pub mod error;
pub mod oplog;
pub mod schedule;
pub mod types;

mod create;
mod update;

// Re-exports for convenience
pub use collab::{
    CalendarOutcome, CalendarSink, CaseStore, DocumentReminder, EmailOutcome, EmailSink,
    EntityExtractor, HearingEvent,
};
pub use email::{is_placeholder_email, resolve_client_email};
pub use engine::CaseWorkflow;
pub use error::{CollabError, WorkflowError};
pub use oplog::{OperationEntry, OperationKind, OperationLog};
pub use schedule::{event_window, parse_hearing_time, HEARING_EVENT_HOURS};
pub use types::{
    ExistingCaseRef, OutcomeStatus, PayloadOutcome, RunResult, RunStatus, WorkflowConfig,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running the workflow engine
    pub use crate::{
        CalendarSink, CaseStore, CaseWorkflow, EmailSink, EntityExtractor, OutcomeStatus,
        PayloadOutcome, RunResult, RunStatus, WorkflowConfig,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
