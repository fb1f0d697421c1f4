//! Name similarity scoring
//!
//! Token-overlap similarity for case and client names. Edit distance is the
//! wrong tool here: names referring to the same case differ mainly by word
//! substitution or addition ("Sharma Bail Matter" vs "Sharma Case"), not by
//! typos. The score is deliberately asymmetric: when every word of the first
//! name appears in the second, the first is treated as a shorthand reference
//! and boosted.

use std::collections::BTreeSet;

/// Filler tokens stripped before structural comparison
const FILLER_WORDS: [&str; 5] = ["case", "matter", "vs", "v.", "the"];

/// Score similarity between two name-like strings, in `[0, 1]`
///
/// `name_similarity(x, x)` is `1.0`; symmetry is NOT guaranteed because the
/// per-set overlap ratios and the subset boost favor the first argument.
#[must_use]
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let a_folded = a.trim().to_lowercase();
    let b_folded = b.trim().to_lowercase();
    if a_folded == b_folded {
        return 1.0;
    }

    let a_stripped = strip_fillers(&a_folded);
    let b_stripped = strip_fillers(&b_folded);
    if !a_stripped.is_empty() && a_stripped == b_stripped {
        return 0.95;
    }
    if !a_stripped.is_empty()
        && !b_stripped.is_empty()
        && (a_stripped.contains(&b_stripped) || b_stripped.contains(&a_stripped))
    {
        return 0.85;
    }

    let a_words: BTreeSet<String> = significant_words(&a_folded).into_iter().collect();
    let b_words: BTreeSet<String> = significant_words(&b_folded).into_iter().collect();
    if a_words.is_empty() || b_words.is_empty() {
        return 0.0;
    }

    let common = a_words.intersection(&b_words).count();
    let ratio_a = common as f64 / a_words.len() as f64;
    let ratio_b = common as f64 / b_words.len() as f64;
    let mut score = (ratio_a + ratio_b) / 2.0;

    // A two-plus-word name fully contained in the other reads as a
    // shorthand reference to the same case.
    if common == a_words.len() && a_words.len() >= 2 {
        score = (score + 0.2).min(0.9);
    }

    score
}

/// Remove filler tokens and collapse whitespace
#[must_use]
fn strip_fillers(folded: &str) -> String {
    folded
        .split_whitespace()
        .filter(|word| !FILLER_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokenize into significant words: alphanumeric-trimmed, length > 1
#[must_use]
pub fn significant_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| word.len() > 1)
        .collect()
}

/// First significant word of a lookup key, if any
#[must_use]
pub fn first_significant_word(text: &str) -> Option<String> {
    significant_words(text).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_names_score_one() {
        assert_eq!(name_similarity("Priya Sharma", "Priya Sharma"), 1.0);
        assert_eq!(name_similarity("  priya sharma ", "Priya Sharma"), 1.0);
    }

    #[test]
    fn filler_stripped_names_score_095() {
        assert_eq!(
            name_similarity("Sharma Property Case", "Sharma Property Matter"),
            0.95
        );
        assert_eq!(name_similarity("The Sharma Case", "Sharma"), 0.95);
    }

    #[test]
    fn containment_scores_085() {
        assert_eq!(
            name_similarity("Sharma Property", "Ram Sharma Property Dispute"),
            0.85
        );
    }

    #[test]
    fn disjoint_names_score_zero() {
        assert_eq!(name_similarity("Sharma", "Patel"), 0.0);
    }

    #[test]
    fn partial_overlap_averages_ratios() {
        // {arun, mehta} vs {arun, mehta, contract, breach}: common 2,
        // ratios 1.0 and 0.5, avg 0.75, full-subset boost capped at 0.9
        let score = name_similarity("Arun Mehta", "Arun Mehta Contract Breach");
        assert!((score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn asymmetry_is_intentional() {
        let forward = name_similarity("Arun Mehta", "Arun Mehta Contract Breach");
        let backward = name_similarity("Arun Mehta Contract Breach", "Arun Mehta");
        assert!(forward > backward);
    }

    #[test]
    fn single_word_subset_not_boosted() {
        // {sharma} vs {priya, sharma}: avg of 1.0 and 0.5, no boost below 2 words
        let score = name_similarity("Sharma", "Priya Sharma");
        assert!((score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn significant_words_drop_short_tokens() {
        assert_eq!(
            significant_words("R v. Sharma & Co"),
            vec!["sharma".to_string(), "co".to_string()]
        );
        assert_eq!(first_significant_word("a Sharma"), Some("sharma".to_string()));
        assert_eq!(first_significant_word("a b"), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn score_stays_in_unit_interval(a in ".{0,40}", b in ".{0,40}") {
                let score = name_similarity(&a, &b);
                prop_assert!((0.0..=1.0).contains(&score));
            }

            #[test]
            fn reflexive_names_score_one(a in "[a-zA-Z ]{1,40}") {
                prop_assert_eq!(name_similarity(&a, &a), 1.0);
            }
        }
    }
}
