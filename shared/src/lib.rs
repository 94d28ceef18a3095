//! Shared utilities and common types for the account verification server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response envelopes and error codes
//! - Username and email validation helpers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, CorsConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    MailConfig, MailProvider, ServerConfig, SmtpTls, StoreBackend,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, HealthStatus, MessageResponse};
pub use utils::validation;
