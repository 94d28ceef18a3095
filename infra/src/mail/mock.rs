//! Mock Mail Service Implementation
//!
//! Logs messages instead of sending them and keeps them in an in-process
//! outbox, so a developer can read the token and tests can assert on it.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use av_shared::utils::validation::mask_email;

use super::mail_service::{address_domain, MailService};
use crate::InfrastructureError;

/// A message captured by [`MockMailSender`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboxMessage {
    pub message_id: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mock mail service for development and testing
///
/// Clones share the same outbox and failure switch.
#[derive(Clone)]
pub struct MockMailSender {
    /// Messages "sent" so far
    outbox: Arc<Mutex<Vec<OutboxMessage>>>,
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether to print messages to the console
    console_output: bool,
}

impl MockMailSender {
    /// Create a new mock mail service
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            outbox: Arc::new(Mutex::new(Vec::new())),
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Copy of every captured message, oldest first
    pub fn outbox(&self) -> Vec<OutboxMessage> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }

    /// Most recent message sent to `to`
    pub fn last_message_to(&self, to: &str) -> Option<OutboxMessage> {
        self.outbox().into_iter().rev().find(|m| m.to == to)
    }
}

impl Default for MockMailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailService for MockMailSender {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError> {
        let masked = mask_email(to);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(provider = "mock", to = %masked, "Mock mail service simulating failure");
            return Err(InfrastructureError::Mail(
                "Simulated mail sending failure".to_string(),
            ));
        }

        let message_id = format!("<{}@{}>", Uuid::new_v4(), address_domain(to));
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK MAIL SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", to);
            println!("Subject: {}", subject);
            println!("Message ID: {}", message_id);
            println!("Content: {}", body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mail_service",
            provider = "mock",
            to = %masked,
            message_id = %message_id,
            "Mock email sent"
        );

        let mut outbox = self
            .outbox
            .lock()
            .map_err(|_| InfrastructureError::Mail("Mock outbox lock poisoned".to_string()))?;
        outbox.push(OutboxMessage {
            message_id: message_id.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
