//! # auth-demo-stripe
//!
//! Subscription billing plugin.
//!
//! ## Endpoints
//! - POST /subscription/upgrade — Start a checkout for a plan
//! - POST /subscription/cancel — Cancel at period end
//! - POST /subscription/restore — Undo a pending cancellation
//! - GET /subscription/list — The caller's subscriptions
//! - POST /stripe/webhook — Handle Stripe webhook events

pub mod config;
pub mod error;
pub mod plugin;
pub mod types;
pub mod webhook;

pub use config::*;
pub use error::*;
pub use plugin::StripePlugin;
pub use types::*;
