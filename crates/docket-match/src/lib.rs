//! Docket Match - case resolution logic
//!
//! Pure matching for the case-update workflow:
//! - **name_similarity**: token-overlap similarity for name-like strings
//! - **resolve_case**: lookup-key resolution to a single match, a
//!   clarification request, or not-found
//! - **find_duplicate**: collision detection for proposed new cases
//!
//! Everything here is synchronous and store-agnostic: callers run the
//! store search and hand the hits in.
//!
//! # Example
//!
//! ```rust
//! use docket_match::{resolve_case, MatchOutcome};
//! use docket_model::CaseSummary;
//!
//! let hits = vec![CaseSummary::new("c-1", "Priya Sharma Bail Application")];
//! match resolve_case("Sharma", hits) {
//!     MatchOutcome::Match(case) => assert_eq!(case.id.as_str(), "c-1"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod duplicate;
pub mod matcher;
pub mod similarity;

// Re-exports
pub use duplicate::{duplicate_search_key, find_duplicate, ProposedCase};
pub use matcher::{dedup_candidates, resolve_case, search_terms, CandidateCase, MatchOutcome};
pub use similarity::{first_significant_word, name_similarity, significant_words};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for case resolution
    pub use crate::{
        find_duplicate, name_similarity, resolve_case, CandidateCase, MatchOutcome, ProposedCase,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
