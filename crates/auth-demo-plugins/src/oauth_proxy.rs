// OAuth proxy plugin.
//
// Preview deployments cannot be registered as OAuth redirect URIs, so the
// provider redirects to the production callback, which bounces the user back
// to the deployment that started the flow.

use std::any::Any;

use async_trait::async_trait;

use auth_demo_core::plugin::{AuthPlugin, PluginEndpoint, PluginInitContext};
use auth_demo_core::utils::origin::get_origin;
use auth_demo_core::Result;

#[derive(Debug, Clone)]
pub struct OAuthProxyOptions {
    /// Current URL of the server (used to construct the proxy callback URL).
    pub current_url: Option<String>,
    /// Requests already on this URL are not proxied. Defaults to the base URL.
    pub production_url: Option<String>,
    /// Maximum age in seconds for the proxied payload (default: 60).
    pub max_age: u64,
}

impl Default for OAuthProxyOptions {
    fn default() -> Self {
        Self {
            current_url: None,
            production_url: None,
            max_age: 60,
        }
    }
}

#[derive(Debug, Default)]
pub struct OAuthProxyPlugin {
    options: OAuthProxyOptions,
}

impl OAuthProxyPlugin {
    pub fn new(options: OAuthProxyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &OAuthProxyOptions {
        &self.options
    }
}

/// `{base_url}{base_path}/oauth-proxy-callback`
pub fn build_proxy_callback_url(base_url: &str, base_path: &str) -> String {
    format!(
        "{}{}/oauth-proxy-callback",
        base_url.trim_end_matches('/'),
        base_path.trim_end_matches('/')
    )
}

/// Whether a request on `request_url` is already on the production origin.
pub fn should_skip_proxy(request_url: &str, production_url: Option<&str>) -> bool {
    match (production_url.and_then(get_origin), get_origin(request_url)) {
        (Some(production), Some(request)) => production == request,
        _ => false,
    }
}

#[async_trait]
impl AuthPlugin for OAuthProxyPlugin {
    fn id(&self) -> &str {
        "oauth-proxy"
    }

    fn name(&self) -> &str {
        "OAuth Proxy"
    }

    async fn init(&self, ctx: &PluginInitContext<'_>) -> Result<()> {
        let production = self
            .options
            .production_url
            .as_deref()
            .or(ctx.options.base_url.as_deref());
        if production.is_none() {
            tracing::debug!("oauth proxy has no production url; every request will be proxied");
        }
        Ok(())
    }

    fn endpoints(&self) -> Vec<PluginEndpoint> {
        vec![PluginEndpoint::get("/oauth-proxy-callback", false)]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
