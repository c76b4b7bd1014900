//! Resend API client.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use auth_demo_core::email::{EmailBody, EmailMessage, EmailSender, SendReceipt};
use auth_demo_core::error::EmailError;

pub const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Sends email through `POST /emails` on the Resend API.
#[derive(Clone)]
pub struct ResendClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl ResendClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: RESEND_API_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (e.g., a local mock).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl fmt::Debug for ResendClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResendClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Request body for `POST /emails`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct SendEmailRequest<'a> {
    pub from: &'a str,
    pub to: Vec<&'a str>,
    pub subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
}

impl<'a> From<&'a EmailMessage> for SendEmailRequest<'a> {
    fn from(message: &'a EmailMessage) -> Self {
        let (html, text) = match &message.body {
            EmailBody::Html(html) => (Some(html.as_str()), None),
            EmailBody::Text(text) => (None, Some(text.as_str())),
        };
        Self {
            from: &message.from,
            to: vec![message.to.as_str()],
            subject: &message.subject,
            html,
            text,
        }
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, message: EmailMessage) -> Result<SendReceipt, EmailError> {
        let request = SendEmailRequest::from(&message);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), to = %message.to, "Resend rejected email");
            return Err(EmailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<SendReceipt>()
            .await
            .map_err(|e| EmailError::Transport(format!("invalid Resend response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(body: EmailBody) -> EmailMessage {
        EmailMessage {
            from: "delivered@resend.dev".into(),
            to: "ada@example.com".into(),
            subject: "Your OTP".into(),
            body,
        }
    }

    #[test]
    fn test_html_request_body() {
        let msg = message(EmailBody::Html("<p>hi</p>".into()));
        let json = serde_json::to_value(SendEmailRequest::from(&msg)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "from": "delivered@resend.dev",
                "to": ["ada@example.com"],
                "subject": "Your OTP",
                "html": "<p>hi</p>",
            })
        );
    }

    #[test]
    fn test_text_request_body_omits_html() {
        let msg = message(EmailBody::Text("hi".into()));
        let json = serde_json::to_value(SendEmailRequest::from(&msg)).unwrap();
        assert_eq!(json["text"], "hi");
        assert!(json.get("html").is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = ResendClient::new("re_secret_key");
        let printed = format!("{client:?}");
        assert!(!printed.contains("re_secret_key"));
        assert!(printed.contains(RESEND_API_URL));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = ResendClient::new("re_key").with_endpoint("http://127.0.0.1:9/emails");
        let err = client
            .send(message(EmailBody::Text("hi".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, EmailError::Transport(_)));
    }
}
