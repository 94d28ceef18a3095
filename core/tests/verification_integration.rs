//! Integration tests for the registration and verification flow

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use async_trait::async_trait;

    use av_core::errors::DomainError;
    use av_core::repositories::{AccountRepository, InMemoryAccountRepository};
    use av_core::services::verification::{
        AccountVerificationService,
        MailSender,
        VerificationServiceConfig,
    };
    use av_core::VerificationStatus;

    // Mailer that keeps the last body per recipient
    struct InboxMailSender {
        inbox: Mutex<Vec<(String, String)>>,
    }

    impl InboxMailSender {
        fn new() -> Self {
            Self { inbox: Mutex::new(Vec::new()) }
        }

        fn token_for(&self, to: &str) -> Option<String> {
            self.inbox
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(recipient, _)| recipient == to)
                .and_then(|(_, body)| body.rsplit(' ').next().map(str::to_string))
        }
    }

    #[async_trait]
    impl MailSender for InboxMailSender {
        async fn send(&self, to: &str, _subject: &str, body: &str) -> Result<String, String> {
            let mut inbox = self.inbox.lock().unwrap();
            inbox.push((to.to_string(), body.to_string()));
            Ok(format!("<{}@inbox.test>", inbox.len()))
        }
    }

    fn service() -> (
        AccountVerificationService<InMemoryAccountRepository, InboxMailSender>,
        Arc<InMemoryAccountRepository>,
        Arc<InboxMailSender>,
    ) {
        let repo = Arc::new(InMemoryAccountRepository::new());
        let mailer = Arc::new(InboxMailSender::new());
        let service = AccountVerificationService::new(
            repo.clone(),
            mailer.clone(),
            VerificationServiceConfig::default(),
        );
        (service, repo, mailer)
    }

    #[tokio::test]
    async fn test_full_registration_flow() {
        let (service, repo, mailer) = service();

        let registered = service.register("alice", "alice@x.com").await.unwrap();
        assert_eq!(registered.message(), "User registered successfully");

        assert_eq!(
            service.check_verification("alice").await.unwrap(),
            VerificationStatus::NotVerified
        );

        let err = service.verify_email("alice", "not-the-token").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid verification token");

        let token = mailer.token_for("alice@x.com").unwrap();
        let verified = service.verify_email("alice", &token).await.unwrap();
        assert_eq!(verified.message(), "Email verified successfully");

        assert_eq!(
            service.check_verification("alice").await.unwrap().message(),
            "User is verified"
        );
        assert_eq!(repo.count(Some(true)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_accounts_are_independent() {
        let (service, _repo, mailer) = service();

        service.register("alice", "alice@x.com").await.unwrap();
        service.register("bob", "bob@x.com").await.unwrap();

        let bob_token = mailer.token_for("bob@x.com").unwrap();
        service.verify_email("bob", &bob_token).await.unwrap();

        assert!(service.check_verification("bob").await.unwrap().is_verified());
        assert!(!service.check_verification("alice").await.unwrap().is_verified());

        let err = service.verify_email("carol", &bob_token).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
