//! # Account Verify Core
//!
//! Core business logic and domain layer for the account verification backend.
//! This crate contains the account entity, the verification service, the
//! account repository interface, and the error types the other crates build on.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
