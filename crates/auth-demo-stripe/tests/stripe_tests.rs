//! Stripe plugin integration tests.
//!
//! Covers: webhook handling through the plugin, plan lookup, subscription
//! status on events, plugin init and endpoints.

use auth_demo_core::error::AuthError;
use auth_demo_core::{AuthOptions, AuthPlugin};
use auth_demo_stripe::webhook::*;
use auth_demo_stripe::*;

fn plans() -> Vec<Plan> {
    vec![
        Plan::new("Starter")
            .with_prices("price_starter", "price_starter_annual")
            .with_free_trial(7),
        Plan::new("Professional").with_prices("price_pro", "price_pro_annual"),
        Plan::new("Enterprise"),
    ]
}

fn plugin(webhook_secret: &str) -> StripePlugin {
    StripePlugin::new(StripeOptions::new("sk_test_", webhook_secret).with_plans(plans()))
}

fn signed(secret: &str, payload: &str) -> String {
    let ts = chrono::Utc::now().timestamp().to_string();
    let sig = sign(secret, &ts, payload).unwrap();
    format!("t={ts},v1={sig}")
}

// ── Webhook ─────────────────────────────────────────────────────

#[test]
fn supported_event_is_returned() {
    let payload = serde_json::json!({
        "id": "evt_1",
        "type": "customer.subscription.updated",
        "data": { "object": { "id": "sub_1", "status": "active" } },
        "created": 1714000000
    })
    .to_string();
    let plugin = plugin("whsec_demo");
    let event = plugin
        .handle_webhook(payload.as_bytes(), &signed("whsec_demo", &payload))
        .unwrap()
        .expect("event should be supported");
    assert_eq!(event.data.object["id"], "sub_1");
}

#[test]
fn unsupported_event_is_ignored() {
    let payload = r#"{"id":"evt_2","type":"charge.succeeded","data":{"object":{}},"created":1}"#;
    let plugin = plugin("whsec_demo");
    let event = plugin
        .handle_webhook(payload.as_bytes(), &signed("whsec_demo", payload))
        .unwrap();
    assert!(event.is_none());
}

#[test]
fn wrong_secret_is_rejected() {
    let payload = r#"{"id":"evt_3","type":"invoice.paid","data":{"object":{}},"created":1}"#;
    let plugin = plugin("whsec_demo");
    let err = plugin
        .handle_webhook(payload.as_bytes(), &signed("whsec_other", payload))
        .unwrap_err();
    assert!(matches!(err, AuthError::Plugin(msg) if msg.starts_with("WEBHOOK_SIGNATURE_INVALID")));
}

#[test]
fn empty_webhook_secret_rejects_every_event() {
    let payload = r#"{"id":"evt_forged","type":"checkout.session.completed","data":{"object":{}},"created":1}"#;
    let err = plugin("")
        .handle_webhook(payload.as_bytes(), &signed("", payload))
        .unwrap_err();
    assert!(matches!(err, AuthError::Plugin(msg) if msg.starts_with("WEBHOOK_SIGNATURE_INVALID")));
}

#[test]
fn extreme_timestamp_is_expired_not_a_panic() {
    let payload = "{}";
    let sig = sign("whsec_demo", &i64::MIN.to_string(), payload).unwrap();
    let header = format!("t={},v1={sig}", i64::MIN);
    assert_eq!(
        verify_webhook_signature_at(payload.as_bytes(), &header, "whsec_demo", 100, 300),
        Err(StripeError::WebhookTimestampExpired)
    );
}

#[test]
fn signed_garbage_is_invalid_payload() {
    let payload = "not json";
    let err = construct_event(payload.as_bytes(), &signed("whsec_demo", payload), "whsec_demo")
        .unwrap_err();
    assert_eq!(err, StripeError::WebhookPayloadInvalid);
}

#[test]
fn reject_missing_timestamp() {
    assert!(verify_webhook_signature(b"payload", "v1=abc", "secret").is_err());
}

#[test]
fn reject_empty_header() {
    assert!(verify_webhook_signature(b"payload", "", "secret").is_err());
}

// ── Plans ───────────────────────────────────────────────────────

#[test]
fn plan_lookup_by_name_and_price() {
    let plugin = plugin("whsec_demo");
    let opts = plugin.options();
    assert_eq!(opts.find_plan("PROFESSIONAL").unwrap().name, "Professional");
    assert_eq!(
        opts.find_plan_by_price_id("price_starter_annual").unwrap().name,
        "Starter"
    );
    assert_eq!(opts.find_plan("Starter").unwrap().trial_days(), Some(7));
    assert_eq!(opts.find_plan("Enterprise").unwrap().trial_days(), None);
}

#[test]
fn plan_serializes_camel_case() {
    let v = serde_json::to_value(&plans()[0]).unwrap();
    assert_eq!(v["priceId"], "price_starter");
    assert_eq!(v["annualDiscountPriceId"], "price_starter_annual");
    assert_eq!(v["freeTrial"]["days"], 7);

    let enterprise = serde_json::to_value(&plans()[2]).unwrap();
    assert_eq!(enterprise, serde_json::json!({ "name": "Enterprise" }));
}

// ── Subscription status ─────────────────────────────────────────

#[test]
fn parse_statuses() {
    assert_eq!(SubscriptionStatus::parse("past_due"), SubscriptionStatus::PastDue);
    assert_eq!(SubscriptionStatus::parse("trialing"), SubscriptionStatus::Trialing);
    assert_eq!(SubscriptionStatus::parse("unknown_status"), SubscriptionStatus::Incomplete);
}

#[test]
fn subscription_event_carries_status() {
    let payload = serde_json::json!({
        "id": "evt_4",
        "type": "customer.subscription.created",
        "data": { "object": { "id": "sub_2", "status": "trialing" } },
        "created": 1714000000
    })
    .to_string();
    let event = plugin("whsec_demo")
        .handle_webhook(payload.as_bytes(), &signed("whsec_demo", &payload))
        .unwrap()
        .unwrap();
    assert_eq!(event.subscription_status(), Some(SubscriptionStatus::Trialing));
}

#[test]
fn checkout_event_has_no_subscription_status() {
    let payload = r#"{"id":"evt_5","type":"checkout.session.completed","data":{"object":{"status":"complete"}},"created":1}"#;
    let event = plugin("whsec_demo")
        .handle_webhook(payload.as_bytes(), &signed("whsec_demo", payload))
        .unwrap()
        .unwrap();
    assert_eq!(event.subscription_status(), None);
}

// ── Plugin ──────────────────────────────────────────────────────

#[tokio::test]
async fn init_accepts_empty_webhook_secret() {
    let opts = AuthOptions::new("secret").add_plugin(plugin(""));
    assert!(opts.init().await.is_ok());
}

#[tokio::test]
async fn init_rejects_enabled_without_plans() {
    let opts = AuthOptions::new("secret")
        .add_plugin(StripePlugin::new(StripeOptions::new("sk_test_", "").with_plans(vec![])));
    assert!(matches!(opts.init().await, Err(AuthError::Config(_))));
}

#[test]
fn endpoints_include_webhook_and_subscription_routes() {
    let paths: Vec<String> = plugin("whsec_demo")
        .endpoints()
        .into_iter()
        .map(|e| e.path)
        .collect();
    assert!(paths.contains(&"/stripe/webhook".to_string()));
    assert!(paths.contains(&"/subscription/upgrade".to_string()));
    assert!(paths.contains(&"/subscription/list".to_string()));
}

#[test]
fn registered_plugin_is_found_by_type() {
    let opts = AuthOptions::new("secret").add_plugin(plugin("whsec_demo"));
    let stripe = opts.plugin::<StripePlugin>().unwrap();
    assert_eq!(stripe.plans().len(), 3);
}
