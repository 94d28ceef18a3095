//! Unit tests for the account verification service

use std::sync::Arc;

use crate::domain::value_objects::{VerificationStatus, DEFAULT_TOKEN_BYTES};
use crate::errors::{DomainError, IdentityField};
use crate::repositories::{AccountRepository, InMemoryAccountRepository};
use crate::services::verification::{AccountVerificationService, VerificationServiceConfig};

use super::mocks::RecordingMailSender;

type TestService = AccountVerificationService<InMemoryAccountRepository, RecordingMailSender>;

fn setup(
    mail_fails: bool,
    config: VerificationServiceConfig,
) -> (TestService, Arc<InMemoryAccountRepository>, Arc<RecordingMailSender>) {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let mailer = Arc::new(RecordingMailSender::new(mail_fails));
    let service = AccountVerificationService::new(repo.clone(), mailer.clone(), config);
    (service, repo, mailer)
}

#[tokio::test]
async fn test_register_creates_unverified_account_and_sends_token() {
    let (service, repo, mailer) = setup(false, VerificationServiceConfig::default());

    let result = service.register("alice", "alice@x.com").await.unwrap();
    assert_eq!(result.account.username, "alice");
    assert!(!result.account.is_verified);
    assert_eq!(result.message_id, "mock-mail-1");
    assert_eq!(result.message(), "User registered successfully");

    let sent = mailer.last_sent().unwrap();
    assert_eq!(sent.to, "alice@x.com");
    assert_eq!(sent.subject, "Email Verification");
    assert_eq!(
        sent.body,
        format!(
            "Your verification token is: {}",
            result.account.verification_token.as_str()
        )
    );

    let stored = repo.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(stored.verification_token, result.account.verification_token);
    assert_eq!(
        stored.verification_token.as_str().len(),
        DEFAULT_TOKEN_BYTES * 2
    );
}

#[tokio::test]
async fn test_register_rejects_blank_input() {
    let (service, repo, mailer) = setup(false, VerificationServiceConfig::default());

    let result = service.register("  ", "alice@x.com").await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));

    let result = service.register("alice", "").await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));

    assert_eq!(repo.count(None).await.unwrap(), 0);
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let (service, repo, mailer) = setup(false, VerificationServiceConfig::default());
    service.register("alice", "alice@x.com").await.unwrap();

    let err = service.register("alice", "other@x.com").await.unwrap_err();
    assert_eq!(
        err,
        DomainError::DuplicateIdentity {
            field: IdentityField::Username
        }
    );
    assert_eq!(err.to_string(), "Username already exists");
    assert_eq!(repo.count(None).await.unwrap(), 1);
    assert_eq!(mailer.sent_count(), 1);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (service, _repo, mailer) = setup(false, VerificationServiceConfig::default());
    service.register("alice", "alice@x.com").await.unwrap();

    let err = service.register("bob", "alice@x.com").await.unwrap_err();
    assert_eq!(err.to_string(), "Email already exists");
    assert_eq!(mailer.sent_count(), 1);
}

#[tokio::test]
async fn test_tokens_differ_between_accounts() {
    let (service, _repo, _mailer) = setup(false, VerificationServiceConfig::default());

    let a = service.register("alice", "alice@x.com").await.unwrap();
    let b = service.register("bob", "bob@x.com").await.unwrap();
    assert_ne!(a.account.verification_token, b.account.verification_token);
}

#[tokio::test]
async fn test_concurrent_registrations_for_same_username() {
    let (service, repo, mailer) = setup(false, VerificationServiceConfig::default());
    let service = Arc::new(service);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .register("alice", &format!("alice{}@x.com", i))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) => assert_eq!(
                e,
                DomainError::DuplicateIdentity {
                    field: IdentityField::Username
                }
            ),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(repo.count(None).await.unwrap(), 1);
    assert_eq!(mailer.sent_count(), 1);
}

#[tokio::test]
async fn test_delivery_failure_rolls_back_account() {
    let (service, repo, mailer) = setup(true, VerificationServiceConfig::default());

    let err = service.register("carol", "carol@x.com").await.unwrap_err();
    assert!(matches!(err, DomainError::DeliveryFailure { .. }));
    assert_eq!(err.to_string(), "Failed to send verification email");
    assert!(repo.find_by_username("carol").await.unwrap().is_none());

    // Identity is free again once the mailer recovers
    mailer.set_failing(false);
    let result = service.register("carol", "carol@x.com").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_delivery_failure_without_rollback_keeps_account() {
    let config = VerificationServiceConfig {
        rollback_on_delivery_failure: false,
        ..Default::default()
    };
    let (service, repo, _mailer) = setup(true, config);

    let err = service.register("carol", "carol@x.com").await.unwrap_err();
    assert!(matches!(err, DomainError::DeliveryFailure { .. }));

    let stored = repo.find_by_username("carol").await.unwrap().unwrap();
    assert!(!stored.is_verified);

    let err = service.register("carol", "carol@x.com").await.unwrap_err();
    assert!(matches!(err, DomainError::DuplicateIdentity { .. }));
}

#[tokio::test]
async fn test_verify_email_success() {
    let (service, repo, mailer) = setup(false, VerificationServiceConfig::default());
    service.register("alice", "alice@x.com").await.unwrap();
    let token = mailer.last_token().unwrap();

    let result = service.verify_email("alice", &token).await.unwrap();
    assert!(result.account.is_verified);
    assert!(!result.already_verified);
    assert_eq!(result.message(), "Email verified successfully");

    let stored = repo.find_by_username("alice").await.unwrap().unwrap();
    assert!(stored.is_verified);
    assert!(stored.verified_at.is_some());
}

#[tokio::test]
async fn test_verify_email_unknown_user() {
    let (service, _repo, _mailer) = setup(false, VerificationServiceConfig::default());

    let err = service.verify_email("ghost", "anything").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(err.to_string(), "User not found");
}

#[tokio::test]
async fn test_verify_email_wrong_token_leaves_account_unverified() {
    let (service, repo, mailer) = setup(false, VerificationServiceConfig::default());
    service.register("alice", "alice@x.com").await.unwrap();
    let token = mailer.last_token().unwrap();

    let upper = token.to_uppercase();
    let padded = format!(" {}", token);
    let candidates: [&str; 4] = ["wrong", "", upper.as_str(), padded.as_str()];
    for candidate in candidates {
        let err = service.verify_email("alice", candidate).await.unwrap_err();
        assert_eq!(err, DomainError::InvalidToken);
    }

    let stored = repo.find_by_username("alice").await.unwrap().unwrap();
    assert!(!stored.is_verified);
}

#[tokio::test]
async fn test_token_of_other_account_rejected() {
    let (service, _repo, mailer) = setup(false, VerificationServiceConfig::default());
    service.register("alice", "alice@x.com").await.unwrap();
    let alice_token = mailer.last_token().unwrap();
    service.register("bob", "bob@x.com").await.unwrap();

    let err = service.verify_email("bob", &alice_token).await.unwrap_err();
    assert_eq!(err, DomainError::InvalidToken);
}

#[tokio::test]
async fn test_verify_email_twice_is_idempotent() {
    let (service, repo, mailer) = setup(false, VerificationServiceConfig::default());
    service.register("alice", "alice@x.com").await.unwrap();
    let token = mailer.last_token().unwrap();

    let first = service.verify_email("alice", &token).await.unwrap();
    let second = service.verify_email("alice", &token).await.unwrap();

    assert!(second.already_verified);
    assert!(second.account.is_verified);
    assert_eq!(second.account.verified_at, first.account.verified_at);
    assert_eq!(repo.count(Some(true)).await.unwrap(), 1);
}

#[tokio::test]
async fn test_wrong_token_after_verification_still_rejected() {
    let (service, _repo, mailer) = setup(false, VerificationServiceConfig::default());
    service.register("alice", "alice@x.com").await.unwrap();
    let token = mailer.last_token().unwrap();
    service.verify_email("alice", &token).await.unwrap();

    let err = service.verify_email("alice", "wrong").await.unwrap_err();
    assert_eq!(err, DomainError::InvalidToken);
    assert_eq!(
        service.check_verification("alice").await.unwrap(),
        VerificationStatus::Verified
    );
}

#[tokio::test]
async fn test_check_verification() {
    let (service, _repo, mailer) = setup(false, VerificationServiceConfig::default());
    service.register("alice", "alice@x.com").await.unwrap();

    let status = service.check_verification("alice").await.unwrap();
    assert_eq!(status, VerificationStatus::NotVerified);
    assert_eq!(status.message(), "User is not verified");

    let token = mailer.last_token().unwrap();
    service.verify_email("alice", &token).await.unwrap();

    let status = service.check_verification("alice").await.unwrap();
    assert_eq!(status.message(), "User is verified");

    let err = service.check_verification("ghost").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_custom_token_size_and_subject() {
    let config = VerificationServiceConfig {
        token_bytes: 8,
        email_subject: "Confirm your address".to_string(),
        ..Default::default()
    };
    let (service, _repo, mailer) = setup(false, config);

    let result = service.register("alice", "alice@x.com").await.unwrap();
    assert_eq!(result.account.verification_token.as_str().len(), 16);
    assert_eq!(mailer.last_sent().unwrap().subject, "Confirm your address");
    assert_eq!(service.config().token_bytes, 8);
}

#[tokio::test]
async fn test_in_memory_store_reports_healthy() {
    let (service, _repo, _mailer) = setup(false, VerificationServiceConfig::default());
    assert!(service.store_health().await.is_ok());
}
