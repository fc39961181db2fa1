//! Win/lose decision
//!
//! The fingerprint seeds the flip but fresh randomness dominates it, so
//! the decision is a fair coin regardless of gesture quality.

use crate::crypto::{Entropy, Hasher};
use crate::processing::fingerprint::Fingerprint;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Binary result of one accepted gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Win,
    Lose,
}

const SALT_LEN: usize = 32;

/// Flips the coin for an accepted gesture.
pub struct OutcomeDecider {
    entropy: Arc<dyn Entropy>,
    hasher: Arc<dyn Hasher>,
}

impl OutcomeDecider {
    pub fn new(entropy: Arc<dyn Entropy>, hasher: Arc<dyn Hasher>) -> Self {
        Self { entropy, hasher }
    }

    /// Hash the fingerprint concatenated with fresh random bytes; win on
    /// an even first digest byte.
    pub fn decide(&self, fingerprint: &Fingerprint) -> Outcome {
        let mut salt = [0u8; SALT_LEN];
        self.entropy.fill_bytes(&mut salt);

        let mut combined = Vec::with_capacity(fingerprint.as_bytes().len() + SALT_LEN);
        combined.extend_from_slice(fingerprint.as_bytes());
        combined.extend_from_slice(&salt);

        let digest = self.hasher.digest(&combined);
        if digest[0] & 1 == 0 {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::fakes::{FixedEntropy, FixedHasher};
    use crate::crypto::Sha256Hasher;

    fn fingerprint() -> Fingerprint {
        Fingerprint::from_bytes([0x11; 32])
    }

    #[test]
    fn test_even_first_digest_byte_wins() {
        let decider = OutcomeDecider::new(Arc::new(FixedEntropy(0)), Arc::new(FixedHasher([0x02; 32])));
        assert_eq!(decider.decide(&fingerprint()), Outcome::Win);
    }

    #[test]
    fn test_odd_first_digest_byte_loses() {
        let decider = OutcomeDecider::new(Arc::new(FixedEntropy(0)), Arc::new(FixedHasher([0x03; 32])));
        assert_eq!(decider.decide(&fingerprint()), Outcome::Lose);
    }

    #[test]
    fn test_decision_is_deterministic_for_fixed_entropy() {
        let decider = OutcomeDecider::new(Arc::new(FixedEntropy(0x7f)), Arc::new(Sha256Hasher));
        let first = decider.decide(&fingerprint());
        let second = decider.decide(&fingerprint());
        assert_eq!(first, second);
    }

    #[test]
    fn test_salt_dominates_the_fingerprint() {
        // Same fingerprint, different salt bytes: both outcomes occur.
        let mut seen = std::collections::HashSet::new();
        for salt in 0u8..32 {
            let decider = OutcomeDecider::new(Arc::new(FixedEntropy(salt)), Arc::new(Sha256Hasher));
            seen.insert(decider.decide(&fingerprint()));
        }
        assert_eq!(seen.len(), 2, "both win and lose should appear across salts");
    }
}
