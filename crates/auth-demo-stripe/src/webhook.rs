//! Stripe webhook signature verification and event parsing.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::StripeError;
use crate::types::WebhookEvent;

type HmacSha256 = Hmac<Sha256>;

/// Maximum age of a signed payload, in seconds.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Supported webhook event types.
pub const SUPPORTED_EVENTS: &[&str] = &[
    "checkout.session.completed",
    "customer.subscription.created",
    "customer.subscription.updated",
    "customer.subscription.deleted",
];

/// Check if a webhook event type is supported.
pub fn is_supported_event(event_type: &str) -> bool {
    SUPPORTED_EVENTS.contains(&event_type)
}

/// Verify a Stripe webhook signature against the current time.
///
/// Stripe-Signature header format: `t=<timestamp>,v1=<signature>[,v1=...]`
pub fn verify_webhook_signature(
    payload: &[u8],
    signature_header: &str,
    webhook_secret: &str,
) -> Result<(), StripeError> {
    verify_webhook_signature_at(
        payload,
        signature_header,
        webhook_secret,
        chrono::Utc::now().timestamp(),
        DEFAULT_TOLERANCE_SECS,
    )
}

/// Verify a signature as of `now` (unix seconds).
pub fn verify_webhook_signature_at(
    payload: &[u8],
    signature_header: &str,
    webhook_secret: &str,
    now: i64,
    tolerance_secs: i64,
) -> Result<(), StripeError> {
    if webhook_secret.is_empty() {
        return Err(StripeError::WebhookSignatureInvalid);
    }

    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in signature_header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(StripeError::WebhookSignatureInvalid)?;
    if signatures.is_empty() {
        return Err(StripeError::WebhookSignatureInvalid);
    }

    let payload = std::str::from_utf8(payload).map_err(|_| StripeError::WebhookSignatureInvalid)?;
    let expected = sign(webhook_secret, timestamp, payload)?;

    let matched = signatures
        .iter()
        .any(|sig| bool::from(expected.as_bytes().ct_eq(sig.as_bytes())));
    if !matched {
        return Err(StripeError::WebhookSignatureInvalid);
    }

    let signed_at: i64 = timestamp
        .parse()
        .map_err(|_| StripeError::WebhookSignatureInvalid)?;
    let expired = now
        .checked_sub(signed_at)
        .map_or(true, |age| age.unsigned_abs() > tolerance_secs.unsigned_abs());
    if expired {
        return Err(StripeError::WebhookTimestampExpired);
    }
    Ok(())
}

/// Verify the signature, then parse the payload into an event.
pub fn construct_event(
    payload: &[u8],
    signature_header: &str,
    webhook_secret: &str,
) -> Result<WebhookEvent, StripeError> {
    verify_webhook_signature(payload, signature_header, webhook_secret)?;
    serde_json::from_slice(payload).map_err(|_| StripeError::WebhookPayloadInvalid)
}

/// Hex HMAC-SHA256 of `{timestamp}.{payload}`.
pub fn sign(webhook_secret: &str, timestamp: &str, payload: &str) -> Result<String, StripeError> {
    let mut mac = HmacSha256::new_from_slice(webhook_secret.as_bytes())
        .map_err(|_| StripeError::WebhookSignatureInvalid)?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
