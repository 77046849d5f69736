//! Text comparison primitives shared by ingestion and classification.

use std::collections::BTreeSet;

/// Normalizes text for comparison by lowercasing and replacing
/// separators with spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Token-overlap similarity between two descriptions.
///
/// Splits both sides on whitespace, lowercases, and returns
/// `|intersection| / |union|` over the word sets. Returns 0.0 when
/// either side is empty. Symmetric and deterministic.
pub fn token_overlap(left: &str, right: &str) -> f64 {
    let left_tokens = word_set(left);
    let right_tokens = word_set(right);
    if left_tokens.is_empty() || right_tokens.is_empty() {
        return 0.0;
    }
    let intersection = left_tokens.intersection(&right_tokens).count();
    let union = left_tokens.union(&right_tokens).count();
    intersection as f64 / union as f64
}

fn word_set(raw: &str) -> BTreeSet<String> {
    raw.split_whitespace()
        .map(|token| token.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_descriptions_score_one() {
        assert_eq!(token_overlap("Cash Operating", "cash operating"), 1.0);
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(token_overlap("", "cash"), 0.0);
        assert_eq!(token_overlap("cash", ""), 0.0);
        assert_eq!(token_overlap("   ", "cash"), 0.0);
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = "accounts payable trade";
        let b = "trade payables";
        assert_eq!(token_overlap(a, b), token_overlap(b, a));
    }

    #[test]
    fn partial_overlap() {
        // {cash, on, hand} vs {cash, in, hand}: 2 common of 4 total.
        assert_eq!(token_overlap("cash on hand", "Cash in Hand"), 0.5);
    }

    #[test]
    fn normalize_collapses_separators() {
        assert_eq!(normalize_text("  Source_Code "), "source code");
        assert_eq!(normalize_text("acct-code"), "acct code");
    }
}
