//! Cosine similarity over normalized token multisets, resolving the
//! `DUPLICATE_STATEMENT` open question (`spec.md` §4.3.2, §9; see
//! `SPEC_FULL.md` §5).

use std::collections::HashMap;

use crate::hash::token_multiset;

fn term_frequencies(tokens: &[String]) -> HashMap<&str, f64> {
    let mut freqs: HashMap<&str, f64> = HashMap::new();
    for token in tokens {
        *freqs.entry(token.as_str()).or_insert(0.0) += 1.0;
    }
    freqs
}

/// Cosine similarity between the term-frequency vectors of two claim texts'
/// token multisets. `1.0` for identical text, `0.0` for disjoint vocabulary.
#[must_use]
pub fn cosine_similarity(a: &str, b: &str) -> f64 {
    let tokens_a = token_multiset(a);
    let tokens_b = token_multiset(b);

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return if tokens_a.is_empty() && tokens_b.is_empty() {
            1.0
        } else {
            0.0
        };
    }

    let freqs_a = term_frequencies(&tokens_a);
    let freqs_b = term_frequencies(&tokens_b);

    let dot: f64 = freqs_a
        .iter()
        .map(|(term, fa)| fa * freqs_b.get(term).copied().unwrap_or(0.0))
        .sum();

    let norm_a = freqs_a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = freqs_b.values().map(|v| v * v).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_is_similarity_one() {
        let s = cosine_similarity(
            "Embedded relational store is authoritative.",
            "Embedded relational store is authoritative.",
        );
        assert!((s - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_text_is_similarity_zero() {
        let s = cosine_similarity("alpha beta gamma", "delta epsilon zeta");
        assert_eq!(s, 0.0);
    }

    #[test]
    fn whitespace_and_order_do_not_affect_similarity() {
        let s = cosine_similarity(
            "Goal: ship the thing",
            "ship   the thing\nGoal:",
        );
        assert!((s - 1.0).abs() < 1e-9);
    }

    #[test]
    fn near_duplicate_is_above_threshold() {
        let s = cosine_similarity(
            "The embedded relational store is the authoritative source of truth.",
            "The embedded relational store is the authoritative source of truth!",
        );
        assert!(s > 0.98);
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Cosine similarity is always in `[0.0, 1.0]`, never negative or
        /// greater than 1 (`spec.md` §8 similarity-score invariant — term
        /// frequencies are non-negative, so the cosine of the angle between
        /// them never leaves that range).
        #[test]
        fn prop_similarity_is_bounded(a in ".{0,40}", b in ".{0,40}") {
            let s = cosine_similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&s));
        }

        /// Cosine similarity is symmetric: order of the two claim texts
        /// never changes the score.
        #[test]
        fn prop_similarity_is_symmetric(a in ".{0,40}", b in ".{0,40}") {
            prop_assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
        }

        /// A claim text is always maximally similar to itself.
        #[test]
        fn prop_identical_text_is_maximally_similar(text in "[a-zA-Z ]{1,40}") {
            let s = cosine_similarity(&text, &text);
            prop_assert!((s - 1.0).abs() < 1e-9);
        }
    }
}
