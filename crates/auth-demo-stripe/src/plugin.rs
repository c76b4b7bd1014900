use std::any::Any;

use async_trait::async_trait;

use auth_demo_core::error::{AuthError, Result};
use auth_demo_core::plugin::{AuthPlugin, PluginEndpoint, PluginInitContext};

use crate::config::StripeOptions;
use crate::error::StripeError;
use crate::types::{Plan, WebhookEvent};
use crate::webhook;

/// Subscription billing through Stripe.
#[derive(Debug, Clone)]
pub struct StripePlugin {
    options: StripeOptions,
}

impl StripePlugin {
    pub fn new(options: StripeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &StripeOptions {
        &self.options
    }

    pub fn plans(&self) -> &[Plan] {
        self.options.plans()
    }

    /// Verify and parse an incoming `/stripe/webhook` request body.
    pub fn handle_webhook(&self, payload: &[u8], signature_header: &str) -> Result<Option<WebhookEvent>> {
        let event = webhook::construct_event(payload, signature_header, &self.options.webhook_secret)?;
        if !webhook::is_supported_event(&event.event_type) {
            tracing::debug!(event = %event.event_type, "ignoring unsupported stripe event");
            return Ok(None);
        }
        tracing::info!(
            event = %event.event_type,
            id = %event.id,
            status = ?event.subscription_status(),
            "stripe webhook verified"
        );
        Ok(Some(event))
    }
}

#[async_trait]
impl AuthPlugin for StripePlugin {
    fn id(&self) -> &str {
        "stripe"
    }

    async fn init(&self, _ctx: &PluginInitContext<'_>) -> Result<()> {
        if self.options.secret_key.is_empty() {
            return Err(StripeError::MissingStripeKey.into());
        }
        let subscription = &self.options.subscription;
        if subscription.enabled && subscription.plans.is_empty() {
            return Err(AuthError::Config(
                "stripe subscriptions are enabled but no plans are configured".into(),
            ));
        }
        if self.options.webhook_secret.is_empty() {
            tracing::warn!("STRIPE_WEBHOOK_SECRET is empty; every webhook request will be rejected");
        }
        Ok(())
    }

    fn endpoints(&self) -> Vec<PluginEndpoint> {
        let mut endpoints = vec![PluginEndpoint::post("/stripe/webhook", false)];
        if self.options.subscription.enabled {
            endpoints.extend([
                PluginEndpoint::post("/subscription/upgrade", true),
                PluginEndpoint::post("/subscription/cancel", true),
                PluginEndpoint::post("/subscription/restore", true),
                PluginEndpoint::get("/subscription/list", true),
            ]);
        }
        endpoints
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
