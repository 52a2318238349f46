//! Content-fit scoring: how much of a profile's checklist a page covers

use crate::corpus::ContentCorpus;

/// Coverage percentage and the checklist keywords missing from `text`.
///
/// Returns `(0.0, [])` for empty text, an unknown key, or a profile without
/// keywords. Matching is plain case-insensitive containment; multi-word
/// keywords must appear contiguously.
pub fn calculate_personalization_score(
    text: &str,
    profile_key: &str,
    corpus: &ContentCorpus,
) -> (f64, Vec<String>) {
    if text.is_empty() {
        return (0.0, Vec::new());
    }
    let Some(profile) = corpus.get(profile_key) else {
        return (0.0, Vec::new());
    };
    if profile.keywords.is_empty() {
        return (0.0, Vec::new());
    }

    let lowered = text.to_lowercase();
    let mut matched = 0usize;
    let mut missing = Vec::new();

    for keyword in &profile.keywords {
        if lowered.contains(&keyword.to_lowercase()) {
            matched += 1;
        } else {
            missing.push(keyword.clone());
        }
    }

    let score = matched as f64 / profile.keywords.len() as f64 * 100.0;
    (score, missing)
}
