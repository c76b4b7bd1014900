//! Stripe error codes.

use auth_demo_core::error::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeError {
    WebhookSignatureInvalid,
    WebhookTimestampExpired,
    WebhookPayloadInvalid,
    PlanNotFound,
    PlanHasNoPrice,
    MissingStripeKey,
}

impl StripeError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::WebhookSignatureInvalid => "WEBHOOK_SIGNATURE_INVALID",
            Self::WebhookTimestampExpired => "WEBHOOK_TIMESTAMP_EXPIRED",
            Self::WebhookPayloadInvalid => "WEBHOOK_PAYLOAD_INVALID",
            Self::PlanNotFound => "SUBSCRIPTION_PLAN_NOT_FOUND",
            Self::PlanHasNoPrice => "SUBSCRIPTION_PLAN_HAS_NO_PRICE",
            Self::MissingStripeKey => "MISSING_STRIPE_KEY",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::WebhookSignatureInvalid => "Webhook signature verification failed",
            Self::WebhookTimestampExpired => "Webhook timestamp is outside the tolerance window",
            Self::WebhookPayloadInvalid => "Webhook payload is not a valid event",
            Self::PlanNotFound => "Subscription plan not found",
            Self::PlanHasNoPrice => "Subscription plan has no price for checkout",
            Self::MissingStripeKey => "Stripe API key is not configured",
        }
    }
}

impl std::fmt::Display for StripeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for StripeError {}

impl From<StripeError> for AuthError {
    fn from(err: StripeError) -> Self {
        AuthError::Plugin(err.to_string())
    }
}
