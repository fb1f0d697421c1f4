//! Client email resolution policy
//!
//! Extracted payloads routinely carry placeholder addresses ("test@example.com",
//! "a@b.com") that would silently fail delivery. This policy prefers genuine
//! client addresses and falls back to the actor's own email otherwise, so
//! demo and test data still produce observable sends.

use docket_model::ActorContext;
use once_cell::sync::Lazy;
use regex::Regex;

/// Domains that mark an address as placeholder data
const PLACEHOLDER_DOMAINS: [&str; 6] = [
    "example.com",
    "example.org",
    "test.com",
    "mailinator.com",
    "fake.com",
    "placeholder.com",
];

/// Local parts that mark an address as placeholder data
const PLACEHOLDER_LOCAL_PARTS: [&str; 9] = [
    "test", "demo", "admin", "noreply", "no-reply", "info", "example", "user", "client",
];

/// 1-3 letter local parts ("a@b.com") are throwaway, not real mailboxes
static SHORT_LOCAL_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{1,3}@").unwrap());

/// Classify an address as placeholder/dummy data
#[must_use]
pub fn is_placeholder_email(email: &str) -> bool {
    let email = email.trim().to_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return true;
    };
    if domain.is_empty() || local.is_empty() {
        return true;
    }
    if PLACEHOLDER_DOMAINS.contains(&domain) {
        return true;
    }
    if PLACEHOLDER_LOCAL_PARTS.contains(&local) {
        return true;
    }
    SHORT_LOCAL_PART.is_match(&email)
}

/// Resolve the effective client email for outbound notifications
///
/// Absent or placeholder candidates fall back to the actor's own email;
/// `None` only when the actor has no email either.
#[must_use]
pub fn resolve_client_email(candidate: Option<&str>, actor: &ActorContext) -> Option<String> {
    match candidate.map(str::trim) {
        Some(email) if !email.is_empty() && !is_placeholder_email(email) => {
            Some(email.to_string())
        }
        _ => actor.email.clone(),
    }
}
