// Email sending capability.
//
// The auth callbacks format messages; an `EmailSender` delivers them. The
// production sender lives in `auth-demo-email`; `MemoryEmailSender` records
// messages so callbacks can be exercised without a provider.

use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EmailError;

/// Message body: rendered markup or plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailBody {
    Html(String),
    Text(String),
}

impl EmailBody {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Html(s) | Self::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: EmailBody,
}

/// What the provider returned for an accepted message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    #[serde(default)]
    pub id: Option<String>,
}

#[async_trait]
pub trait EmailSender: Send + Sync + fmt::Debug {
    async fn send(&self, message: EmailMessage) -> Result<SendReceipt, EmailError>;
}

/// In-memory sender for tests and local development.
#[derive(Debug, Default)]
pub struct MemoryEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
    reject_with: Option<u16>,
}

impl MemoryEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender that rejects every message with the given status.
    pub fn rejecting(status: u16) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_with: Some(status),
        }
    }

    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last_message(&self) -> Option<EmailMessage> {
        self.sent_messages().pop()
    }
}

#[async_trait]
impl EmailSender for MemoryEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<SendReceipt, EmailError> {
        if let Some(status) = self.reject_with {
            return Err(EmailError::Rejected {
                status,
                body: format!("rejected message to {}", message.to),
            });
        }
        let mut sent = self
            .sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sent.push(message);
        Ok(SendReceipt {
            id: Some(format!("mem_{}", sent.len())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str) -> EmailMessage {
        EmailMessage {
            from: "from@example.com".into(),
            to: to.into(),
            subject: "Hi".into(),
            body: EmailBody::Text("hello".into()),
        }
    }

    #[tokio::test]
    async fn test_memory_sender_records_messages() {
        let sender = MemoryEmailSender::new();
        let receipt = sender.send(message("a@example.com")).await.unwrap();
        sender.send(message("b@example.com")).await.unwrap();

        assert_eq!(receipt.id.as_deref(), Some("mem_1"));
        assert_eq!(sender.sent_messages().len(), 2);
        assert_eq!(sender.last_message().unwrap().to, "b@example.com");
    }

    #[tokio::test]
    async fn test_rejecting_sender_records_nothing() {
        let sender = MemoryEmailSender::rejecting(403);
        let err = sender.send(message("a@example.com")).await.unwrap_err();
        assert!(matches!(err, EmailError::Rejected { status: 403, .. }));
        assert!(sender.sent_messages().is_empty());
    }
}
