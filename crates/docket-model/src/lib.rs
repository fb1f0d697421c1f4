//! Docket Model - domain data types
//!
//! Shared shapes for the case-update workflow:
//! - Case records, statuses, patches, and hearing records
//! - Extracted case payloads with on-receipt normalization
//! - Immutable actor context with role constraints applied at construction
//!
//! This crate is pure data: no I/O, no async, serde-serializable throughout.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod actor;
pub mod case;
pub mod ids;
pub mod payload;

// Re-exports for convenience
pub use actor::{ActorContext, ActorPreferences, ActorRole};
pub use case::{
    is_placeholder_name, CasePatch, CaseStatus, CaseSummary, CreatedCase, HearingAck,
    HearingRecord, NewCase, NewHearing, PLACEHOLDER_CASE_PREFIX,
};
pub use ids::{CaseId, RunId};
pub use payload::{CaseAction, ExtractedCasePayload, ExtractionOutcome};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the Docket model
    pub use crate::{
        ActorContext, ActorRole, CaseAction, CaseId, CasePatch, CaseStatus, CaseSummary,
        ExtractedCasePayload, ExtractionOutcome, NewCase, NewHearing,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
