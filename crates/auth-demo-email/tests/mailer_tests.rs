use std::sync::Arc;

use auth_demo_core::email::{EmailBody, MemoryEmailSender};
use auth_demo_core::env::EnvMode;
use auth_demo_core::error::{AuthError, EmailError};
use auth_demo_core::models::{InvitationEmailData, Organization, User};
use auth_demo_email::{Mailer, MailerSettings};

fn settings(mode: EnvMode, test_recipient: Option<&str>) -> MailerSettings {
    MailerSettings {
        from: "delivered@resend.dev".into(),
        test_recipient: test_recipient.map(str::to_string),
        mode,
        base_url: Some("https://demo.better-auth.com".into()),
    }
}

fn mailer(settings: MailerSettings) -> (Mailer, Arc<MemoryEmailSender>) {
    let sender = Arc::new(MemoryEmailSender::new());
    (Mailer::new(sender.clone(), settings), sender)
}

fn ada() -> User {
    User::new("u1", "Ada", "ada@example.com")
}

fn invitation() -> InvitationEmailData {
    InvitationEmailData {
        id: "abc123".into(),
        email: "bob@example.com".into(),
        role: "member".into(),
        inviter: ada(),
        organization: Organization {
            id: "org1".into(),
            name: "Acme".into(),
            slug: "acme".into(),
        },
    }
}

fn html(body: &EmailBody) -> &str {
    match body {
        EmailBody::Html(html) => html,
        EmailBody::Text(_) => panic!("expected an html body"),
    }
}

#[test]
fn test_invitation_link_in_development() {
    let (mailer, _) = mailer(settings(EnvMode::Development, None));
    assert_eq!(
        mailer.invitation_link("abc123"),
        "http://localhost:3000/accept-invitation/abc123"
    );
}

#[test]
fn test_invitation_link_in_production() {
    let (mailer, _) = mailer(settings(EnvMode::Production, None));
    assert_eq!(
        mailer.invitation_link("abc123"),
        "https://demo.better-auth.com/accept-invitation/abc123"
    );
}

#[test]
fn test_invitation_link_without_base_url_is_relative() {
    let mut s = settings(EnvMode::Unspecified, None);
    s.base_url = None;
    let (mailer, _) = mailer(s);
    assert_eq!(mailer.invitation_link("abc123"), "/accept-invitation/abc123");
}

#[tokio::test]
async fn test_verification_email_goes_to_user() {
    let (mailer, sender) = mailer(settings(EnvMode::Development, None));
    let receipt = mailer
        .send_verification_email(&ada(), "https://x/verify?token=t")
        .await
        .unwrap();
    assert_eq!(receipt.id.as_deref(), Some("mem_1"));

    let sent = sender.last_message().unwrap();
    assert_eq!(sent.to, "ada@example.com");
    assert_eq!(sent.from, "delivered@resend.dev");
    assert_eq!(sent.subject, "Verify your email address");
    assert_eq!(
        html(&sent.body),
        r#"<a href="https://x/verify?token=t">Verify your email address</a>"#
    );
}

#[tokio::test]
async fn test_test_email_overrides_verification_and_reset() {
    let (mailer, sender) = mailer(settings(EnvMode::Development, Some("qa@example.com")));
    mailer
        .send_verification_email(&ada(), "https://x/verify")
        .await
        .unwrap();
    mailer
        .send_reset_password(&ada(), "https://x/reset")
        .await
        .unwrap();

    let sent = sender.sent_messages();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|m| m.to == "qa@example.com"));
    assert_eq!(sent[1].subject, "Reset your password");
    assert!(html(&sent[1].body).contains("Hi ada@example.com,"));
}

#[tokio::test]
async fn test_test_email_does_not_redirect_otp_or_invitation() {
    let (mailer, sender) = mailer(settings(EnvMode::Development, Some("qa@example.com")));
    mailer.send_two_factor_otp(&ada(), "123456").await.unwrap();
    mailer.send_invitation(&invitation()).await.unwrap();

    let sent = sender.sent_messages();
    assert_eq!(sent[0].to, "ada@example.com");
    assert_eq!(sent[0].subject, "Your OTP");
    assert_eq!(html(&sent[0].body), "Your OTP is 123456");
    assert_eq!(sent[1].to, "bob@example.com");
}

#[tokio::test]
async fn test_invitation_email_contents() {
    let (mailer, sender) = mailer(settings(EnvMode::Development, None));
    mailer.send_invitation(&invitation()).await.unwrap();

    let sent = sender.last_message().unwrap();
    assert_eq!(sent.subject, "You've been invited to join an organization");
    let body = html(&sent.body);
    assert!(body.contains("http://localhost:3000/accept-invitation/abc123"));
    assert!(body.contains("<strong>Ada</strong>"));
    assert!(body.contains("ada@example.com"));
    assert!(body.contains("Acme"));
}

#[tokio::test]
async fn test_provider_rejection_propagates() {
    let sender = Arc::new(MemoryEmailSender::rejecting(422));
    let mailer = Mailer::new(sender, settings(EnvMode::Production, None));
    let err = mailer
        .send_two_factor_otp(&ada(), "000000")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AuthError::Email(EmailError::Rejected { status: 422, .. })
    ));
}
