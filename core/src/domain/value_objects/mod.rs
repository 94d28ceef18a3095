//! Value objects representing immutable domain concepts.

pub mod verification_status;
pub mod verification_token;

// Re-export commonly used types
pub use verification_status::VerificationStatus;
pub use verification_token::{VerificationToken, DEFAULT_TOKEN_BYTES, MIN_TOKEN_BYTES};
