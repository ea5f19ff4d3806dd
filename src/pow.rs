//! Proof-of-work difficulty policy.
//!
//! Every identity publishes how much work senders must do for messages
//! addressed to it. The target a nonce has to beat is
//!
//! ```text
//! 2^64 / (nonce_trials_per_byte * (len + extra_bytes + ttl * (len + extra_bytes) / 2^16))
//! ```

use sha2::{Digest, Sha512};

/// Network minimum for `nonce_trials_per_byte`.
pub const DEFAULT_NONCE_TRIALS_PER_BYTE: u64 = 1000;

/// Network minimum for `extra_bytes`.
pub const DEFAULT_EXTRA_BYTES: u64 = 1000;

/// The two difficulty knobs attached to an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Policy {
    pub nonce_trials_per_byte: u64,
    pub extra_bytes: u64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            nonce_trials_per_byte: DEFAULT_NONCE_TRIALS_PER_BYTE,
            extra_bytes: DEFAULT_EXTRA_BYTES,
        }
    }
}

impl Policy {
    pub fn new(nonce_trials_per_byte: u64, extra_bytes: u64) -> Self {
        Self {
            nonce_trials_per_byte,
            extra_bytes,
        }
    }

    /// Target for an object of `payload_length` bytes living `ttl` seconds.
    pub fn target(&self, payload_length: u64, ttl: u64) -> u64 {
        calculate_target(
            payload_length,
            ttl,
            self.nonce_trials_per_byte,
            self.extra_bytes,
        )
    }
}

/// Computes the proof-of-work target. Larger means easier.
///
/// A zero denominator (zero trials per byte) yields `u64::MAX`.
pub fn calculate_target(payload_length: u64, ttl: u64, nonce_trials: u64, extra_bytes: u64) -> u64 {
    let len = u128::from(payload_length) + u128::from(extra_bytes);
    let denom = u128::from(nonce_trials) * (len + u128::from(ttl) * len / (1 << 16));

    match (1u128 << 64).checked_div(denom) {
        Some(target) => u64::try_from(target).unwrap_or(u64::MAX),
        None => u64::MAX,
    }
}

/// The trial value of `nonce`: first 8 bytes (big-endian) of
/// SHA-512(SHA-512(nonce || initial_hash)).
pub fn trial_value(nonce: u64, initial_hash: &[u8]) -> u64 {
    let mut inner = Sha512::new();
    inner.update(nonce.to_be_bytes());
    inner.update(initial_hash);

    let digest = Sha512::digest(inner.finalize());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

/// True if `nonce` satisfies `target` for an object whose payload hashes
/// (SHA-512) to `initial_hash`.
pub fn check(target: u64, nonce: u64, initial_hash: &[u8]) -> bool {
    trial_value(nonce, initial_hash) <= target
}
