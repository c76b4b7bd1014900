//! Stripe types: plans, checkout and webhook payloads.

use serde::{Deserialize, Serialize};

/// Subscription plan definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub name: String,
    /// Monthly (default) price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
    /// Discounted price billed annually.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_discount_price_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_trial: Option<FreeTrial>,
}

impl Plan {
    /// A plan with no Stripe prices (e.g., sales-led tiers).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price_id: None,
            annual_discount_price_id: None,
            free_trial: None,
        }
    }

    pub fn with_prices(mut self, default: impl Into<String>, annual: impl Into<String>) -> Self {
        self.price_id = Some(default.into());
        self.annual_discount_price_id = Some(annual.into());
        self
    }

    pub fn with_free_trial(mut self, days: u32) -> Self {
        self.free_trial = Some(FreeTrial { days });
        self
    }

    /// Whether `price_id` is either of this plan's prices.
    pub fn has_price(&self, price_id: &str) -> bool {
        self.price_id.as_deref() == Some(price_id)
            || self.annual_discount_price_id.as_deref() == Some(price_id)
    }

    pub fn trial_days(&self) -> Option<u32> {
        self.free_trial.as_ref().map(|t| t.days)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTrial {
    pub days: u32,
}

/// Subscription statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    Incomplete,
    IncompleteExpired,
    PastDue,
    Trialing,
    Unpaid,
    Paused,
}

impl SubscriptionStatus {
    /// Unknown statuses read as `Incomplete`.
    pub fn parse(status: &str) -> Self {
        match status {
            "active" => Self::Active,
            "canceled" => Self::Canceled,
            "incomplete" => Self::Incomplete,
            "incomplete_expired" => Self::IncompleteExpired,
            "past_due" => Self::PastDue,
            "trialing" => Self::Trialing,
            "unpaid" => Self::Unpaid,
            "paused" => Self::Paused,
            _ => Self::Incomplete,
        }
    }
}

/// Body of `POST /subscription/upgrade`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeRequest {
    pub plan: String,
    #[serde(default)]
    pub annual: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    pub success_url: String,
    pub cancel_url: String,
}

/// What a checkout session is created with once the plan is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutParams {
    pub price_id: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_period_days: Option<u32>,
    pub success_url: String,
    pub cancel_url: String,
}

/// Stripe webhook event (simplified).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
    pub created: i64,
}

impl WebhookEvent {
    /// Status carried by a `customer.subscription.*` event.
    pub fn subscription_status(&self) -> Option<SubscriptionStatus> {
        if !self.event_type.starts_with("customer.subscription.") {
            return None;
        }
        self.data
            .object
            .get("status")
            .and_then(|s| s.as_str())
            .map(SubscriptionStatus::parse)
    }
}

/// Webhook event data object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEventData {
    pub object: serde_json::Value,
}
