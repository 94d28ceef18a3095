//! Type definitions shared by the API layer
//!
//! - `response` - message envelopes and health checks

pub mod response;

pub use response::{HealthResponse, HealthStatus, MessageResponse};
