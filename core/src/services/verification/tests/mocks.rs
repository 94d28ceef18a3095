//! Mock implementations for testing the verification service

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::services::verification::traits::MailSender;

/// A message handed to the mock mailer
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

// Mock mailer that records every message
pub struct RecordingMailSender {
    pub outbox: Arc<Mutex<Vec<SentMail>>>,
    should_fail: AtomicBool,
}

impl RecordingMailSender {
    pub fn new(should_fail: bool) -> Self {
        Self {
            outbox: Arc::new(Mutex::new(Vec::new())),
            should_fail: AtomicBool::new(should_fail),
        }
    }

    pub fn set_failing(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.outbox.lock().unwrap().len()
    }

    pub fn last_sent(&self) -> Option<SentMail> {
        self.outbox.lock().unwrap().last().cloned()
    }

    /// Token carried in the last message body
    pub fn last_token(&self) -> Option<String> {
        self.last_sent().and_then(|mail| {
            mail.body
                .strip_prefix("Your verification token is: ")
                .map(str::to_string)
        })
    }
}

#[async_trait]
impl MailSender for RecordingMailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("SMTP connection refused".to_string());
        }
        let mut outbox = self.outbox.lock().unwrap();
        outbox.push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(format!("mock-mail-{}", outbox.len()))
    }
}
