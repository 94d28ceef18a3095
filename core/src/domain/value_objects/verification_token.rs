//! Single-use verification token sent to the account's email address.

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

/// Default number of random bytes in a token (128 bits, 32 hex characters)
pub const DEFAULT_TOKEN_BYTES: usize = 16;

/// Smallest accepted token size (32 bits)
pub const MIN_TOKEN_BYTES: usize = 4;

/// Opaque verification token
///
/// Generated once per account from the operating system CSPRNG and
/// hex-encoded, so every token of a given size has the same length.
/// Comparison is exact (case-sensitive, no trimming) and runs in constant
/// time over the token bytes.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationToken(String);

impl VerificationToken {
    /// Generate a new token from `bytes` random bytes
    ///
    /// Sizes below [`MIN_TOKEN_BYTES`] are raised to it.
    pub fn generate(bytes: usize) -> Self {
        let mut buf = vec![0u8; bytes.max(MIN_TOKEN_BYTES)];
        OsRng.fill_bytes(&mut buf);
        Self(hex::encode(buf))
    }

    /// Wrap a token that was already stored
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Check a candidate supplied by a client
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), candidate.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for VerificationToken {
    fn default() -> Self {
        Self::generate(DEFAULT_TOKEN_BYTES)
    }
}

impl std::fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VerificationToken(***)")
    }
}
