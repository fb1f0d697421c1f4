//! Error types for the workflow engine
//!
//! The taxonomy is deliberately small: lookup misses, ambiguity, duplicates,
//! and missing required fields are all *results*, not errors. Only
//! collaborator failures surface here, and of those, calendar/email failures
//! are degraded to skipped outcomes at the call site rather than propagated.

/// Failure from an external collaborator
#[derive(Debug, thiserror::Error)]
pub enum CollabError {
    /// Record store call failed
    #[error("store error: {0}")]
    Store(String),

    /// Calendar sink call failed
    #[error("calendar error: {0}")]
    Calendar(String),

    /// Email sink call failed
    #[error("email error: {0}")]
    Email(String),

    /// Entity extractor call failed
    #[error("extractor error: {0}")]
    Extractor(String),
}

impl CollabError {
    /// Whether this failure aborts the current payload
    ///
    /// Store failures during core persistence are fatal to the payload;
    /// calendar and email failures degrade to skipped outcomes.
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Extractor(_))
    }
}

/// Main workflow error type
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// A collaborator call failed
    #[error(transparent)]
    Collab(#[from] CollabError),

    /// The whole-run extraction step failed
    #[error("extraction failed: {0}")]
    Extraction(String),
}
