// Subscription plans offered through Stripe.

use auth_demo_core::AuthEnv;
use auth_demo_stripe::{Plan, StripeOptions};

pub const STARTER_PRICE_ID: &str = "price_1QxWWtLUjnrYIrmleljPKszG";
pub const STARTER_ANNUAL_PRICE_ID: &str = "price_1QxWYqLUjnrYIrmlonqPThVF";
pub const PROFESSIONAL_PRICE_ID: &str = "price_1QxWZ5LUjnrYIrml5Dnwnl0X";
pub const PROFESSIONAL_ANNUAL_PRICE_ID: &str = "price_1QxWZTLUjnrYIrmlyJYpwyhz";

pub const STARTER_TRIAL_DAYS: u32 = 7;

/// Starter, Professional and Enterprise. Enterprise is sold directly and
/// has no Stripe price.
pub fn subscription_plans() -> Vec<Plan> {
    vec![
        Plan::new("Starter")
            .with_prices(STARTER_PRICE_ID, STARTER_ANNUAL_PRICE_ID)
            .with_free_trial(STARTER_TRIAL_DAYS),
        Plan::new("Professional").with_prices(PROFESSIONAL_PRICE_ID, PROFESSIONAL_ANNUAL_PRICE_ID),
        Plan::new("Enterprise"),
    ]
}

/// Stripe plugin options with subscriptions enabled.
pub fn stripe_options(env: &AuthEnv) -> StripeOptions {
    StripeOptions::new(env.stripe_key.clone(), env.stripe_webhook_secret.clone())
        .with_plans(subscription_plans())
}
