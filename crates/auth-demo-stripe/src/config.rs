//! Stripe configuration.

use std::fmt;

use serde::Serialize;

use crate::error::StripeError;
use crate::types::{CheckoutParams, Plan, UpgradeRequest};

/// Stripe plugin configuration.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeOptions {
    /// Stripe secret key.
    #[serde(skip)]
    pub secret_key: String,
    /// Stripe webhook signing secret. Not validated; may be empty.
    #[serde(skip)]
    pub webhook_secret: String,
    /// Create a Stripe customer when a user signs up.
    pub create_customer_on_sign_up: bool,
    pub subscription: SubscriptionOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriptionOptions {
    pub enabled: bool,
    pub plans: Vec<Plan>,
}

impl StripeOptions {
    pub fn new(secret_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            webhook_secret: webhook_secret.into(),
            create_customer_on_sign_up: false,
            subscription: SubscriptionOptions::default(),
        }
    }

    /// Enable subscriptions with the given plans.
    pub fn with_plans(mut self, plans: Vec<Plan>) -> Self {
        self.subscription = SubscriptionOptions {
            enabled: true,
            plans,
        };
        self
    }

    pub fn plans(&self) -> &[Plan] {
        &self.subscription.plans
    }

    /// Find a plan by name, ignoring case.
    pub fn find_plan(&self, name: &str) -> Option<&Plan> {
        self.plans()
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Find the plan a Stripe price (default or annual) belongs to.
    pub fn find_plan_by_price_id(&self, price_id: &str) -> Option<&Plan> {
        self.plans().iter().find(|p| p.has_price(price_id))
    }

    /// Resolve an upgrade request to checkout parameters.
    ///
    /// `annual` picks the discounted annual price; a plan missing the
    /// requested price cannot be checked out.
    pub fn checkout_params(&self, request: &UpgradeRequest) -> Result<CheckoutParams, StripeError> {
        let plan = self
            .find_plan(&request.plan)
            .ok_or(StripeError::PlanNotFound)?;

        let price_id = if request.annual {
            plan.annual_discount_price_id.as_ref()
        } else {
            plan.price_id.as_ref()
        }
        .ok_or(StripeError::PlanHasNoPrice)?;

        Ok(CheckoutParams {
            price_id: price_id.clone(),
            quantity: request.seats.unwrap_or(1),
            trial_period_days: plan.trial_days(),
            success_url: request.success_url.clone(),
            cancel_url: request.cancel_url.clone(),
        })
    }
}

impl fmt::Debug for StripeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeOptions")
            .field("secret_key", &"<redacted>")
            .field("webhook_secret", &"<redacted>")
            .field("create_customer_on_sign_up", &self.create_customer_on_sign_up)
            .field("subscription", &self.subscription)
            .finish()
    }
}
