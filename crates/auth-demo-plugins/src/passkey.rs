// Passkey (WebAuthn) plugin.

use std::any::Any;

use async_trait::async_trait;

use auth_demo_core::plugin::{AuthPlugin, PluginEndpoint, PluginInitContext};
use auth_demo_core::Result;

#[derive(Debug, Clone)]
pub struct PasskeyOptions {
    /// Relying Party ID (e.g. "localhost", "example.com").
    pub rp_id: Option<String>,
    /// Human-readable RP name; defaults to the app name.
    pub rp_name: Option<String>,
    /// Expected origin for WebAuthn ceremonies.
    pub origin: Option<String>,
    /// Cookie name for the WebAuthn challenge.
    pub challenge_cookie: String,
}

impl Default for PasskeyOptions {
    fn default() -> Self {
        Self {
            rp_id: None,
            rp_name: None,
            origin: None,
            challenge_cookie: "better-auth-passkey".to_string(),
        }
    }
}

/// The configured RP id, else the host of `base_url`, else "localhost".
pub fn get_rp_id(opts: &PasskeyOptions, base_url: Option<&str>) -> String {
    if let Some(rp_id) = &opts.rp_id {
        return rp_id.clone();
    }
    base_url
        .and_then(|u| url::Url::parse(u).ok())
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "localhost".to_string())
}

#[derive(Debug, Default)]
pub struct PasskeyPlugin {
    options: PasskeyOptions,
}

impl PasskeyPlugin {
    pub fn new(options: PasskeyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PasskeyOptions {
        &self.options
    }
}

#[async_trait]
impl AuthPlugin for PasskeyPlugin {
    fn id(&self) -> &str {
        "passkey"
    }

    fn name(&self) -> &str {
        "Passkey"
    }

    async fn init(&self, ctx: &PluginInitContext<'_>) -> Result<()> {
        let rp_id = get_rp_id(&self.options, ctx.options.base_url.as_deref());
        tracing::debug!(%rp_id, "passkey relying party");
        Ok(())
    }

    fn endpoints(&self) -> Vec<PluginEndpoint> {
        vec![
            PluginEndpoint::get("/passkey/generate-register-options", true),
            PluginEndpoint::post("/passkey/verify-registration", true),
            PluginEndpoint::post("/passkey/generate-authenticate-options", false),
            PluginEndpoint::post("/passkey/verify-authentication", false),
            PluginEndpoint::get("/passkey/list-user-passkeys", true),
            PluginEndpoint::post("/passkey/delete-passkey", true),
            PluginEndpoint::post("/passkey/update-passkey", true),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
