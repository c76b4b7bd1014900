//! # auth-demo-email
//!
//! Transactional email for the auth configuration.
//!
//! - [`ResendClient`] delivers messages through the Resend HTTP API.
//! - [`templates`] renders the reset-password and invitation bodies.
//! - [`Mailer`] formats the four emails the auth flows send and hands them
//!   to any [`EmailSender`](auth_demo_core::EmailSender).

pub mod mailer;
pub mod resend;
pub mod templates;

pub use mailer::{Mailer, MailerSettings, LOCAL_APP_URL};
pub use resend::{ResendClient, RESEND_API_URL};
