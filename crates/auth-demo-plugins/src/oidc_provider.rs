// OIDC Provider plugin — lets third-party clients sign users in through
// this service with OpenID Connect.

use std::any::Any;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use auth_demo_core::plugin::{AuthPlugin, PluginEndpoint, PluginInitContext};
use auth_demo_core::Result;

/// OIDC Discovery metadata (OpenID Provider Metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OidcMetadata {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
    pub jwks_uri: String,
    pub registration_endpoint: String,
    pub end_session_endpoint: String,
    pub scopes_supported: Vec<String>,
    pub response_types_supported: Vec<String>,
    pub grant_types_supported: Vec<String>,
    pub subject_types_supported: Vec<String>,
    pub id_token_signing_alg_values_supported: Vec<String>,
    pub token_endpoint_auth_methods_supported: Vec<String>,
    pub code_challenge_methods_supported: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct OidcProviderOptions {
    /// Page users are sent to when the authorize request has no session.
    pub login_page: String,
    /// Consent page; `None` uses the framework's built-in consent.
    pub consent_page: Option<String>,
    /// Authorization code lifetime in seconds (default: 600).
    pub code_expires_in: u64,
    /// Access token lifetime in seconds (default: 3600).
    pub access_token_expires_in: u64,
    /// Refresh token lifetime in seconds (default: 7 days).
    pub refresh_token_expires_in: u64,
    pub default_scope: String,
    pub scopes: Vec<String>,
    pub require_pkce: bool,
    pub allow_dynamic_client_registration: bool,
}

impl Default for OidcProviderOptions {
    fn default() -> Self {
        Self {
            login_page: "/sign-in".into(),
            consent_page: None,
            code_expires_in: 600,
            access_token_expires_in: 3600,
            refresh_token_expires_in: 604_800,
            default_scope: "openid".into(),
            scopes: ["openid", "profile", "email", "offline_access"]
                .map(String::from)
                .to_vec(),
            require_pkce: false,
            allow_dynamic_client_registration: false,
        }
    }
}

impl OidcProviderOptions {
    pub fn with_login_page(login_page: impl Into<String>) -> Self {
        Self {
            login_page: login_page.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct OidcProviderPlugin {
    options: OidcProviderOptions,
}

impl OidcProviderPlugin {
    pub fn new(options: OidcProviderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &OidcProviderOptions {
        &self.options
    }

    /// Discovery document for an issuer at `base_url` (base path included).
    pub fn metadata(&self, base_url: &str) -> OidcMetadata {
        let base = base_url.trim_end_matches('/');
        OidcMetadata {
            issuer: base.to_string(),
            authorization_endpoint: format!("{base}/oauth2/authorize"),
            token_endpoint: format!("{base}/oauth2/token"),
            userinfo_endpoint: format!("{base}/oauth2/userinfo"),
            jwks_uri: format!("{base}/jwks"),
            registration_endpoint: format!("{base}/oauth2/register"),
            end_session_endpoint: format!("{base}/oauth2/endsession"),
            scopes_supported: self.options.scopes.clone(),
            response_types_supported: vec!["code".into()],
            grant_types_supported: vec!["authorization_code".into(), "refresh_token".into()],
            subject_types_supported: vec!["public".into()],
            id_token_signing_alg_values_supported: vec!["RS256".into(), "none".into()],
            token_endpoint_auth_methods_supported: vec![
                "client_secret_basic".into(),
                "client_secret_post".into(),
                "none".into(),
            ],
            code_challenge_methods_supported: vec!["S256".into()],
        }
    }
}

#[async_trait]
impl AuthPlugin for OidcProviderPlugin {
    fn id(&self) -> &str {
        "oidc-provider"
    }

    fn name(&self) -> &str {
        "OIDC Provider"
    }

    async fn init(&self, ctx: &PluginInitContext<'_>) -> Result<()> {
        if let Some(base_url) = &ctx.options.base_url {
            let issuer = format!("{}{}", base_url.trim_end_matches('/'), ctx.options.base_path);
            tracing::debug!(%issuer, login_page = %self.options.login_page, "oidc provider ready");
        }
        Ok(())
    }

    fn endpoints(&self) -> Vec<PluginEndpoint> {
        vec![
            PluginEndpoint::get("/.well-known/openid-configuration", false),
            PluginEndpoint::get("/oauth2/authorize", false),
            PluginEndpoint::post("/oauth2/token", false),
            PluginEndpoint::get("/oauth2/userinfo", false),
            PluginEndpoint::get("/jwks", false),
            // Anonymous clients may register only when dynamic registration is on.
            PluginEndpoint::post("/oauth2/register", !self.options.allow_dynamic_client_registration),
            PluginEndpoint::post("/oauth2/consent", true),
            PluginEndpoint::post("/oauth2/revoke", false),
            PluginEndpoint::get("/oauth2/endsession", false),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
