//! Duplicate case detection
//!
//! Decides whether a proposed new case collides with an existing record.
//! The verdict is pure over already-fetched search hits; the workflow owns
//! the search call and swallows its failures, since duplicate checking must
//! never block legitimate case creation.

use crate::similarity::{name_similarity, significant_words};
use docket_model::CaseSummary;

/// Similarity at or above which two case names are considered the same case
const NAME_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Search keys shorter than this produce too much noise to be useful
const MIN_SEARCH_KEY_LEN: usize = 3;

/// Proposed identity of a case about to be created
#[derive(Debug, Clone, Copy, Default)]
pub struct ProposedCase<'a> {
    /// Proposed case display title
    pub case_name: Option<&'a str>,
    /// Proposed client name
    pub client_name: Option<&'a str>,
}

impl<'a> ProposedCase<'a> {
    /// Build from optional name fields
    #[inline]
    #[must_use]
    pub fn new(case_name: Option<&'a str>, client_name: Option<&'a str>) -> Self {
        Self {
            case_name,
            client_name,
        }
    }
}

/// Derive the store search key for a duplicate check
///
/// Prefers the client name; falls back to the first two significant words
/// of the case name. `None` when both are absent or the key is too short
/// to search meaningfully.
#[must_use]
pub fn duplicate_search_key(proposed: &ProposedCase<'_>) -> Option<String> {
    let key = match proposed.client_name.map(str::trim) {
        Some(client) if !client.is_empty() => client.to_string(),
        _ => {
            let words = significant_words(proposed.case_name?);
            if words.is_empty() {
                return None;
            }
            words
                .into_iter()
                .take(2)
                .collect::<Vec<_>>()
                .join(" ")
        }
    };
    (key.len() >= MIN_SEARCH_KEY_LEN).then_some(key)
}

/// Find the first existing case the proposed one collides with
///
/// Hits are checked in search-result order; auto-created placeholder
/// drafts never count as duplicates.
#[must_use]
pub fn find_duplicate(proposed: &ProposedCase<'_>, hits: &[CaseSummary]) -> Option<CaseSummary> {
    hits.iter()
        .filter(|hit| !hit.is_placeholder())
        .find(|hit| collides(proposed, hit))
        .cloned()
}

fn collides(proposed: &ProposedCase<'_>, existing: &CaseSummary) -> bool {
    if let Some(client) = normalized(proposed.client_name) {
        if let Some(existing_client) = normalized(existing.client_name.as_deref()) {
            if client == existing_client {
                return true;
            }
        }
        if existing.case_name.to_lowercase().contains(&client) {
            return true;
        }
    }

    if let Some(name) = normalized(proposed.case_name) {
        if name == existing.case_name.trim().to_lowercase() {
            return true;
        }
        if name_similarity(proposed.case_name.unwrap_or_default(), &existing.case_name)
            >= NAME_SIMILARITY_THRESHOLD
        {
            return true;
        }
    }

    false
}

fn normalized(value: Option<&str>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    })
}
