//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the account
//! verification service. It provides concrete implementations of the
//! core crate's ports.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL account store using SQLx
//! - **Mail**: Outbound email transports (SMTP via lettre, Brevo HTTP API, mock)

// Re-export core types for convenience
pub use av_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Mail module - Outbound email providers
pub mod mail;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail delivery error
    #[error("Mail service error: {0}")]
    Mail(String),
}
