// Multi-session plugin — several signed-in accounts per device.

use std::any::Any;

use async_trait::async_trait;

use auth_demo_core::plugin::{AuthPlugin, PluginEndpoint};

/// Cookie suffix marking a per-account session cookie.
pub const MULTI_SESSION_COOKIE_SUFFIX: &str = "_multi-";

#[derive(Debug, Clone)]
pub struct MultiSessionOptions {
    /// Maximum sessions kept per device (default: 5).
    pub maximum_sessions: usize,
}

impl Default for MultiSessionOptions {
    fn default() -> Self {
        Self { maximum_sessions: 5 }
    }
}

#[derive(Debug, Default)]
pub struct MultiSessionPlugin {
    options: MultiSessionOptions,
}

impl MultiSessionPlugin {
    pub fn new(options: MultiSessionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MultiSessionOptions {
        &self.options
    }

    pub fn is_max_sessions_reached(&self, current: usize) -> bool {
        current >= self.options.maximum_sessions
    }
}

/// `{base}_multi-{token}` — one cookie per signed-in account.
pub fn multi_session_cookie_name(base_cookie_name: &str, session_token: &str) -> String {
    format!("{base_cookie_name}{MULTI_SESSION_COOKIE_SUFFIX}{}", session_token.to_lowercase())
}

#[async_trait]
impl AuthPlugin for MultiSessionPlugin {
    fn id(&self) -> &str {
        "multi-session"
    }

    fn name(&self) -> &str {
        "Multi Session"
    }

    fn endpoints(&self) -> Vec<PluginEndpoint> {
        vec![
            PluginEndpoint::get("/multi-session/list-device-sessions", true),
            PluginEndpoint::post("/multi-session/set-active", true),
            PluginEndpoint::post("/multi-session/revoke", true),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
