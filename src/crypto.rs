//! Entropy and digest capabilities
//!
//! The classifier and the outcome decider never reach for ambient crypto
//! directly; they receive these as explicit dependencies, so tests can
//! substitute deterministic fakes.

use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Source of cryptographically strong random bytes.
pub trait Entropy: Send + Sync {
    /// Fill `buf` with fresh random bytes.
    fn fill_bytes(&self, buf: &mut [u8]);
}

/// Fixed-size, deterministic, preimage-resistant digest primitive.
pub trait Hasher: Send + Sync {
    /// Digest `data` into 32 bytes.
    fn digest(&self, data: &[u8]) -> [u8; 32];
}

/// Default entropy source backed by the OS RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl Entropy for OsEntropy {
    fn fill_bytes(&self, buf: &mut [u8]) {
        rand::thread_rng().fill_bytes(buf);
    }
}

/// Default digest backed by SHA-256.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn digest(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

/// Random v4 session identifier drawn from the given entropy source.
pub fn session_id(entropy: &dyn Entropy) -> Uuid {
    let mut bytes = [0u8; 16];
    entropy.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::{Entropy, Hasher};
    use parking_lot::Mutex;

    /// Replays one byte value, for reproducible draws.
    pub struct FixedEntropy(pub u8);

    impl Entropy for FixedEntropy {
        fn fill_bytes(&self, buf: &mut [u8]) {
            buf.fill(self.0);
        }
    }

    /// Counts upward per fill so consecutive draws differ.
    pub struct CountingEntropy(Mutex<u8>);

    impl CountingEntropy {
        pub fn new() -> Self {
            Self(Mutex::new(0))
        }
    }

    impl Entropy for CountingEntropy {
        fn fill_bytes(&self, buf: &mut [u8]) {
            let mut next = self.0.lock();
            *next = next.wrapping_add(1);
            buf.fill(*next);
        }
    }

    /// Returns a canned digest regardless of input.
    pub struct FixedHasher(pub [u8; 32]);

    impl Hasher for FixedHasher {
        fn digest(&self, _data: &[u8]) -> [u8; 32] {
            self.0
        }
    }
}
