//! Tests for choosing a mail service from configuration

use av_core::services::verification::MailSender;
use av_shared::config::{MailConfig, MailProvider};

use crate::mail::{create_mail_sender, ConfiguredMailSender, MailService};

#[test]
fn test_default_config_creates_mock() {
    let sender = create_mail_sender(&MailConfig::default()).unwrap();
    assert!(matches!(sender, ConfiguredMailSender::Mock(_)));
    assert_eq!(sender.provider_name(), "Mock");
}

#[tokio::test]
async fn test_smtp_and_brevo_selected_by_provider() {
    let smtp = MailConfig {
        provider: MailProvider::Smtp,
        smtp_host: Some("smtp.example.com".to_string()),
        ..Default::default()
    };
    assert_eq!(create_mail_sender(&smtp).unwrap().provider_name(), "SMTP");

    let brevo = MailConfig {
        provider: MailProvider::Brevo,
        brevo_api_key: Some("key".to_string()),
        ..Default::default()
    };
    assert_eq!(create_mail_sender(&brevo).unwrap().provider_name(), "Brevo");
}

#[test]
fn test_missing_provider_settings_rejected() {
    let smtp = MailConfig {
        provider: MailProvider::Smtp,
        ..Default::default()
    };
    assert!(create_mail_sender(&smtp).is_err());
}

#[tokio::test]
async fn test_failures_surface_as_strings_to_the_core() {
    let mock = crate::mail::MockMailSender::with_options(false, true);
    let sender = ConfiguredMailSender::Mock(mock);

    let err = sender.send("alice@x.com", "s", "b").await.unwrap_err();
    assert!(err.contains("Simulated mail sending failure"));
}
