//! # auth-demo
//!
//! The Better Auth demo's auth configuration: one [`AuthOptions`] value
//! composed at startup from the environment, the shared MongoDB handle, the
//! Resend mailer and the plugin set.
//!
//! [`AuthOptions`]: auth_demo_core::AuthOptions

pub mod auth;
pub mod plans;
pub mod session;

pub use auth::{build_auth_options, init_auth, Auth};
pub use plans::{stripe_options, subscription_plans};
pub use session::DemoSessionCustomizer;
