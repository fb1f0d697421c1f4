//! Case matching
//!
//! Resolves a lookup key (case number or client name) against the candidate
//! summaries a store search produced. Auto-resolution favors precision:
//! clearly dominant matches resolve silently, ambiguous ties surface as a
//! clarification request instead of risking a misrouted legal update.

use crate::similarity::{first_significant_word, significant_words};
use docket_model::{CaseId, CaseSummary};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Case numbers shorter than this are too generic to accept on substring
/// evidence alone.
const MIN_NUMBER_MATCH_LEN: usize = 6;

/// Score at or above which the top candidate is accepted outright
const AUTO_ACCEPT_SCORE: f64 = 0.9;

/// Score floor for gap-based acceptance
const GAP_ACCEPT_SCORE: f64 = 0.7;

/// Minimum lead over the runner-up for gap-based acceptance
const GAP_ACCEPT_MARGIN: f64 = 0.2;

/// One scored candidate, presented back to the user on ambiguity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateCase {
    /// Store identifier
    pub id: CaseId,
    /// Case display title
    pub case_name: String,
    /// Human-readable case number
    pub case_number: Option<String>,
    /// Match score in `[0, 1]`
    pub score: f64,
}

impl CandidateCase {
    fn scored(summary: &CaseSummary, score: f64) -> Self {
        Self {
            id: summary.id.clone(),
            case_name: summary.case_name.clone(),
            case_number: summary.case_number.clone(),
            score,
        }
    }
}

/// Outcome of resolving a lookup key against search candidates
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    /// Exactly one case resolved
    Match(CaseSummary),
    /// Multiple viable candidates; defer to a human
    Ambiguous(Vec<CandidateCase>),
    /// Nothing in the store answers to this key
    NotFound {
        /// The key that failed to resolve
        lookup_key: String,
    },
}

/// Search terms the store should be queried with for a lookup key
///
/// The key itself, plus its first significant word as an OR fallback when
/// that differs from the full key. The store only does plain
/// case-insensitive substring search; issuing both terms is what recovers
/// "Sharma hearing went well" style keys.
#[must_use]
pub fn search_terms(lookup_key: &str) -> Vec<String> {
    let key = lookup_key.trim().to_string();
    let mut terms = vec![key.clone()];
    if let Some(word) = first_significant_word(&key) {
        if !word.eq_ignore_ascii_case(&key) {
            terms.push(word);
        }
    }
    terms
}

/// Deduplicate candidates by id, preserving search-result order
#[must_use]
pub fn dedup_candidates(candidates: Vec<CaseSummary>) -> Vec<CaseSummary> {
    let mut by_id: IndexMap<CaseId, CaseSummary> = IndexMap::new();
    for candidate in candidates {
        by_id.entry(candidate.id.clone()).or_insert(candidate);
    }
    by_id.into_values().collect()
}

/// Resolve a lookup key against (already searched) candidate summaries
#[must_use]
pub fn resolve_case(lookup_key: &str, candidates: Vec<CaseSummary>) -> MatchOutcome {
    let candidates = dedup_candidates(candidates);
    let lookup_words = significant_words(lookup_key);

    match candidates.len() {
        0 => MatchOutcome::NotFound {
            lookup_key: lookup_key.to_string(),
        },
        1 => validate_single(lookup_key, &lookup_words, candidates),
        _ => score_multiple(lookup_key, &lookup_words, candidates),
    }
}

/// A lone search hit is still validated before acceptance: a substring
/// search happily returns "Priya Patel" for the key "Priya Sharma".
fn validate_single(
    lookup_key: &str,
    lookup_words: &[String],
    mut candidates: Vec<CaseSummary>,
) -> MatchOutcome {
    let candidate = candidates.remove(0);

    if number_matches(lookup_key, &candidate) {
        return MatchOutcome::Match(candidate);
    }

    if lookup_words.len() >= 2 {
        let targets = target_words(&candidate);
        let all_match = lookup_words
            .iter()
            .all(|word| word_matches(word, &targets));
        if !all_match {
            tracing::debug!(
                lookup_key,
                candidate = %candidate.case_name,
                "sole candidate rejected: lookup words not fully covered"
            );
            return MatchOutcome::NotFound {
                lookup_key: lookup_key.to_string(),
            };
        }
    }

    MatchOutcome::Match(candidate)
}

fn score_multiple(
    lookup_key: &str,
    lookup_words: &[String],
    candidates: Vec<CaseSummary>,
) -> MatchOutcome {
    let mut scored: Vec<(f64, CaseSummary)> = candidates
        .into_iter()
        .map(|candidate| {
            let score = score_candidate(lookup_key, lookup_words, &candidate);
            tracing::debug!(lookup_key, candidate = %candidate.case_name, score, "scored candidate");
            (score, candidate)
        })
        .collect();
    // Stable sort keeps search-result order among equal scores
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let top_score = scored[0].0;
    let runner_up = scored.get(1).map_or(0.0, |(score, _)| *score);
    if top_score >= AUTO_ACCEPT_SCORE
        || (top_score >= GAP_ACCEPT_SCORE && top_score - runner_up >= GAP_ACCEPT_MARGIN)
    {
        let (_, winner) = scored.swap_remove(0);
        return MatchOutcome::Match(winner);
    }

    MatchOutcome::Ambiguous(
        scored
            .iter()
            .map(|(score, summary)| CandidateCase::scored(summary, *score))
            .collect(),
    )
}

fn score_candidate(lookup_key: &str, lookup_words: &[String], candidate: &CaseSummary) -> f64 {
    if number_matches(lookup_key, candidate) {
        return 1.0;
    }
    if lookup_words.is_empty() {
        return 0.0;
    }

    let targets = target_words(candidate);
    let matched = lookup_words
        .iter()
        .filter(|word| word_matches(word, &targets))
        .count();

    // Full bidirectional coverage reads as the same name; anything less is
    // scaled down so "Arun Mehta" never silently picks between two
    // Arun Mehta cases.
    let covers_all_targets = targets
        .iter()
        .all(|target| lookup_words.iter().any(|word| words_overlap(word, target)));
    if matched == lookup_words.len() && covers_all_targets {
        return 0.95;
    }

    (matched as f64 / lookup_words.len() as f64) * 0.7
}

/// Exact case-number evidence: the candidate's number appears inside the
/// lookup key and is long enough to be unambiguous.
fn number_matches(lookup_key: &str, candidate: &CaseSummary) -> bool {
    candidate.case_number.as_ref().is_some_and(|number| {
        number.len() >= MIN_NUMBER_MATCH_LEN
            && lookup_key
                .to_uppercase()
                .contains(&number.to_uppercase())
    })
}

/// Combined case-name + client-name token set of a candidate
fn target_words(candidate: &CaseSummary) -> Vec<String> {
    let mut words = significant_words(&candidate.case_name);
    if let Some(client) = &candidate.client_name {
        words.extend(significant_words(client));
    }
    words
}

fn word_matches(word: &str, targets: &[String]) -> bool {
    targets.iter().any(|target| words_overlap(word, target))
}

/// Substring in either direction, so "raj" matches "rajesh" and vice versa
fn words_overlap(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_model::CaseSummary;

    fn case(id: &str, name: &str) -> CaseSummary {
        CaseSummary::new(id, name)
    }

    #[test]
    fn no_candidates_is_not_found() {
        let outcome = resolve_case("Sharma", Vec::new());
        assert!(matches!(outcome, MatchOutcome::NotFound { lookup_key } if lookup_key == "Sharma"));
    }

    #[test]
    fn single_word_key_accepts_sole_candidate() {
        let outcome = resolve_case(
            "Sharma",
            vec![case("c-1", "Priya Sharma Bail Application")],
        );
        assert!(matches!(outcome, MatchOutcome::Match(found) if found.id.as_str() == "c-1"));
    }

    #[test]
    fn sole_candidate_rejected_on_partial_word_coverage() {
        // "Priya Sharma" must not resolve to a lone "Priya Patel" hit
        let outcome = resolve_case(
            "Priya Sharma",
            vec![case("c-1", "Priya Patel Lease Dispute")],
        );
        assert!(matches!(outcome, MatchOutcome::NotFound { .. }));
    }

    #[test]
    fn case_number_match_accepts_unconditionally() {
        let candidate = case("c-1", "Patel Lease Dispute").with_case_number("CASE-2024-ABQ71");
        let outcome = resolve_case("update CASE-2024-ABQ71 hearing", vec![candidate]);
        assert!(matches!(outcome, MatchOutcome::Match(found) if found.id.as_str() == "c-1"));
    }

    #[test]
    fn short_case_numbers_do_not_auto_accept() {
        let candidate = case("c-1", "Patel Lease Dispute").with_case_number("C-12");
        let outcome = resolve_case("Sharma Mehta C-12", vec![candidate]);
        assert!(matches!(outcome, MatchOutcome::NotFound { .. }));
    }

    #[test]
    fn dominant_candidate_auto_selected() {
        let outcome = resolve_case(
            "Priya Sharma",
            vec![
                case("c-1", "Priya Sharma"),
                case("c-2", "Arun Mehta Contract Breach"),
            ],
        );
        assert!(matches!(outcome, MatchOutcome::Match(found) if found.id.as_str() == "c-1"));
    }

    #[test]
    fn tied_candidates_raise_clarification() {
        let outcome = resolve_case(
            "Arun Mehta",
            vec![
                case("c-1", "Arun Mehta Contract Breach"),
                case("c-2", "Arun Mehta Property Case"),
            ],
        );
        match outcome {
            MatchOutcome::Ambiguous(candidates) => {
                assert_eq!(candidates.len(), 2);
                assert!(candidates.iter().any(|c| c.id.as_str() == "c-1"));
                assert!(candidates.iter().any(|c| c.id.as_str() == "c-2"));
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn client_name_words_count_as_targets() {
        let candidate = case("c-1", "Lease Renewal").with_client_name("Priya Sharma");
        let outcome = resolve_case("Priya Sharma", vec![candidate]);
        assert!(matches!(outcome, MatchOutcome::Match(_)));
    }

    #[test]
    fn duplicate_search_hits_are_deduped() {
        let hit = case("c-1", "Priya Sharma");
        let outcome = resolve_case("Priya Sharma", vec![hit.clone(), hit]);
        // Two hits with one id collapse to a single-candidate resolution
        assert!(matches!(outcome, MatchOutcome::Match(_)));
    }

    #[test]
    fn search_terms_add_first_word_fallback() {
        assert_eq!(
            search_terms("Sharma bail hearing"),
            vec!["Sharma bail hearing".to_string(), "sharma".to_string()]
        );
        assert_eq!(search_terms("Sharma"), vec!["Sharma".to_string()]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resolve_never_panics(key in ".{0,60}") {
                let candidates = vec![
                    case("c-1", "Arun Mehta Contract Breach"),
                    case("c-2", "Priya Sharma Bail Application"),
                ];
                let _ = resolve_case(&key, candidates);
            }
        }
    }
}
