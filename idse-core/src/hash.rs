//! Content hashing and fingerprinting shared by C2 and C3.

use sha2::{Digest, Sha256};

/// SHA-256 of raw artifact content, hex-encoded.
#[must_use]
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Order-independent semantic digest: normalize whitespace, split into a
/// lowercase token multiset, sort the tokens, hash the joined result.
///
/// Two artifacts whose content differs only in whitespace or token order
/// fingerprint identically, damping copy-propagation false positives in
/// convergence scans (`spec.md` §3).
#[must_use]
pub fn fingerprint(content: &str) -> String {
    let mut tokens = tokenize(content);
    tokens.sort_unstable();
    let mut hasher = Sha256::new();
    hasher.update(tokens.join(" ").as_bytes());
    hex::encode(hasher.finalize())
}

/// The sorted token multiset backing `fingerprint`, exposed separately so
/// [`crate::claims::similarity`] can compute cosine similarity without
/// re-tokenizing claim text.
#[must_use]
pub fn token_multiset(content: &str) -> Vec<String> {
    let mut tokens = tokenize(content);
    tokens.sort_unstable();
    tokens
}

fn tokenize(content: &str) -> Vec<String> {
    content
        .split_whitespace()
        .map(|tok| {
            tok.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|tok| !tok.is_empty())
        .collect()
}

/// `idse_id = "{project_name}::{session_id}::{stage}"` (`spec.md` §3).
#[must_use]
pub fn idse_id(project_name: &str, session_id: &str, stage: &str) -> String {
    format!("{project_name}::{session_id}::{stage}")
}

/// `evidence_hash = SHA256(sorted(idse_ids) ∥ sorted(feedback_artifact_ids))`
/// (`spec.md` §4.3.2).
#[must_use]
pub fn evidence_hash(idse_ids: &[String], feedback_artifact_ids: &[String]) -> String {
    let mut sorted_ids = idse_ids.to_vec();
    sorted_ids.sort_unstable();
    let mut sorted_feedback = feedback_artifact_ids.to_vec();
    sorted_feedback.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(sorted_ids.join(",").as_bytes());
    hasher.update(b"|");
    hasher.update(sorted_feedback.join(",").as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_sha256_hex() {
        let h = content_hash("hello");
        assert_eq!(
            h,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn fingerprint_ignores_whitespace_and_order() {
        let a = fingerprint("Goal: ship the thing");
        let b = fingerprint("ship   the thing\nGoal:");
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_differs_on_content_change() {
        let a = fingerprint("Goal: ship the thing");
        let b = fingerprint("Goal: ship the other thing");
        assert_ne!(a, b);
    }

    #[test]
    fn idse_id_is_stable_natural_key() {
        assert_eq!(idse_id("orch", "s1", "spec"), "orch::s1::spec");
    }

    #[test]
    fn evidence_hash_is_order_independent() {
        let a = evidence_hash(
            &["orch::s1::spec".to_string(), "orch::s1::plan".to_string()],
            &[],
        );
        let b = evidence_hash(
            &["orch::s1::plan".to_string(), "orch::s1::spec".to_string()],
            &[],
        );
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// `content_hash` is always a 64-character lowercase hex string,
        /// whatever content it's fed (`spec.md` §8 hash-format invariant).
        #[test]
        fn prop_content_hash_is_64_char_hex(content in ".*") {
            let h = content_hash(&content);
            prop_assert_eq!(h.len(), 64);
            prop_assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }

        /// `content_hash` is a pure function of its input.
        #[test]
        fn prop_content_hash_is_deterministic(content in ".*") {
            prop_assert_eq!(content_hash(&content), content_hash(&content));
        }

        /// Trailing whitespace never changes the fingerprint: it's dropped by
        /// tokenization before hashing.
        #[test]
        fn prop_fingerprint_ignores_trailing_whitespace(words in prop::collection::vec("[a-z]{1,8}", 1..6)) {
            let base = words.join(" ");
            let padded = format!("{base}   \n\t");
            prop_assert_eq!(fingerprint(&base), fingerprint(&padded));
        }

        /// Reordering the same tokens never changes the fingerprint — it
        /// sorts the token multiset before hashing (`spec.md` §3 convergence
        /// scan dedup).
        #[test]
        fn prop_fingerprint_is_order_independent(mut words in prop::collection::vec("[a-z]{1,8}", 1..6)) {
            let forward = fingerprint(&words.join(" "));
            words.reverse();
            let backward = fingerprint(&words.join(" "));
            prop_assert_eq!(forward, backward);
        }

        /// `evidence_hash` never depends on the order either list is given in.
        #[test]
        fn prop_evidence_hash_is_order_independent(mut ids in prop::collection::vec("[a-z]{1,6}", 1..6)) {
            let forward = evidence_hash(&ids, &[]);
            ids.reverse();
            let backward = evidence_hash(&ids, &[]);
            prop_assert_eq!(forward, backward);
        }
    }
}
