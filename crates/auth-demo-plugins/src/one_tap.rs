// Google One Tap sign-in.

use std::any::Any;

use async_trait::async_trait;

use auth_demo_core::plugin::{AuthPlugin, PluginEndpoint, PluginInitContext};
use auth_demo_core::Result;

#[derive(Debug, Clone, Default)]
pub struct OneTapOptions {
    /// Google client id; falls back to the `google` social provider's.
    pub client_id: Option<String>,
    /// Reject One Tap for emails without an existing user.
    pub disable_signup: bool,
}

#[derive(Debug, Default)]
pub struct OneTapPlugin {
    options: OneTapOptions,
}

impl OneTapPlugin {
    pub fn new(options: OneTapOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &OneTapOptions {
        &self.options
    }
}

#[async_trait]
impl AuthPlugin for OneTapPlugin {
    fn id(&self) -> &str {
        "one-tap"
    }

    fn name(&self) -> &str {
        "One Tap"
    }

    async fn init(&self, ctx: &PluginInitContext<'_>) -> Result<()> {
        let client_id = self.options.client_id.as_deref().or_else(|| {
            ctx.options
                .social_providers
                .get("google")
                .map(|g| g.client_id.as_str())
        });
        if client_id.map_or(true, str::is_empty) {
            tracing::warn!("one tap enabled without a google client id");
        }
        Ok(())
    }

    fn endpoints(&self) -> Vec<PluginEndpoint> {
        vec![PluginEndpoint::post("/one-tap/callback", false)]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
