//! The four transactional emails the auth flows send.
//!
//! A [`Mailer`] picks the sender address and recipient, renders the body,
//! and hands the message to its [`EmailSender`]. Provider failures are
//! returned unchanged to the caller.

use std::sync::Arc;

use auth_demo_core::email::{EmailBody, EmailMessage, EmailSender, SendReceipt};
use auth_demo_core::env::{AuthEnv, EnvMode};
use auth_demo_core::error::Result;
use auth_demo_core::models::{InvitationEmailData, User};

use crate::templates::{self, InvitationEmail, ResetPasswordEmail};

/// Where the app is served during local development.
pub const LOCAL_APP_URL: &str = "http://localhost:3000";

pub const VERIFY_EMAIL_SUBJECT: &str = "Verify your email address";
pub const RESET_PASSWORD_SUBJECT: &str = "Reset your password";
pub const OTP_SUBJECT: &str = "Your OTP";
pub const INVITATION_SUBJECT: &str = "You've been invited to join an organization";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerSettings {
    /// Sender address.
    pub from: String,
    /// When set, verification and reset emails go here instead of the user.
    pub test_recipient: Option<String>,
    pub mode: EnvMode,
    /// Public base URL used for invitation links outside development.
    pub base_url: Option<String>,
}

impl MailerSettings {
    pub fn from_env(env: &AuthEnv) -> Self {
        Self {
            from: env.email_from.clone(),
            test_recipient: env.test_email.clone(),
            mode: env.mode,
            base_url: env.base_url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Mailer {
    sender: Arc<dyn EmailSender>,
    settings: MailerSettings,
}

impl Mailer {
    pub fn new(sender: Arc<dyn EmailSender>, settings: MailerSettings) -> Self {
        Self { sender, settings }
    }

    pub fn settings(&self) -> &MailerSettings {
        &self.settings
    }

    /// Link to the accept-invitation page for `invitation_id`.
    pub fn invitation_link(&self, invitation_id: &str) -> String {
        let base = if self.settings.mode.is_development() {
            LOCAL_APP_URL
        } else {
            self.settings.base_url.as_deref().unwrap_or_default()
        };
        format!("{base}/accept-invitation/{invitation_id}")
    }

    pub async fn send_verification_email(&self, user: &User, url: &str) -> Result<SendReceipt> {
        let to = self.test_or(&user.email);
        let receipt = self
            .deliver(to, VERIFY_EMAIL_SUBJECT, EmailBody::Html(templates::verification_email(url)))
            .await?;
        tracing::info!(id = ?receipt.id, user = %user.email, "verification email sent");
        Ok(receipt)
    }

    pub async fn send_reset_password(&self, user: &User, url: &str) -> Result<SendReceipt> {
        let to = self.test_or(&user.email);
        let html = templates::reset_password_email(&ResetPasswordEmail {
            username: &user.email,
            reset_link: url,
        });
        self.deliver(to, RESET_PASSWORD_SUBJECT, EmailBody::Html(html)).await
    }

    pub async fn send_two_factor_otp(&self, user: &User, otp: &str) -> Result<SendReceipt> {
        self.deliver(&user.email, OTP_SUBJECT, EmailBody::Html(templates::two_factor_otp(otp)))
            .await
    }

    pub async fn send_invitation(&self, data: &InvitationEmailData) -> Result<SendReceipt> {
        let invite_link = self.invitation_link(&data.id);
        let html = templates::invitation_email(&InvitationEmail {
            username: &data.email,
            invited_by_username: &data.inviter.name,
            invited_by_email: &data.inviter.email,
            team_name: &data.organization.name,
            invite_link: &invite_link,
        });
        self.deliver(&data.email, INVITATION_SUBJECT, EmailBody::Html(html)).await
    }

    fn test_or<'a>(&'a self, email: &'a str) -> &'a str {
        self.settings.test_recipient.as_deref().unwrap_or(email)
    }

    async fn deliver(&self, to: &str, subject: &str, body: EmailBody) -> Result<SendReceipt> {
        tracing::debug!(%to, %subject, "sending email");
        let message = EmailMessage {
            from: self.settings.from.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            body,
        };
        Ok(self.sender.send(message).await?)
    }
}
