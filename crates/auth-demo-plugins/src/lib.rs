//! # auth-demo-plugins
//!
//! One module per auth feature. Every plugin implements
//! [`AuthPlugin`](auth_demo_core::AuthPlugin), carries its typed options and
//! describes the routes the framework serves for it.

pub mod admin;
pub mod bearer;
pub mod custom_session;
pub mod multi_session;
pub mod next_cookies;
pub mod oauth_proxy;
pub mod oidc_provider;
pub mod one_tap;
pub mod open_api;
pub mod organization;
pub mod passkey;
pub mod two_factor;

pub use admin::{AdminOptions, AdminPlugin};
pub use bearer::BearerPlugin;
pub use custom_session::{CustomSessionPlugin, SessionCustomizer};
pub use multi_session::{MultiSessionOptions, MultiSessionPlugin};
pub use next_cookies::NextCookiesPlugin;
pub use oauth_proxy::{OAuthProxyOptions, OAuthProxyPlugin};
pub use oidc_provider::{OidcMetadata, OidcProviderOptions, OidcProviderPlugin};
pub use one_tap::{OneTapOptions, OneTapPlugin};
pub use open_api::{OpenApiOptions, OpenApiPlugin};
pub use organization::{InvitationCallback, OrganizationOptions, OrganizationPlugin};
pub use passkey::{PasskeyOptions, PasskeyPlugin};
pub use two_factor::{OtpCallback, OtpCallbackData, TwoFactorOptions, TwoFactorPlugin};
