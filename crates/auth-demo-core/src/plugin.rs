// Plugin trait — the unit of feature registration.
//
// Each auth feature (organization, two-factor, passkey, stripe...) is a
// self-contained value implementing `AuthPlugin`, registered in order on
// `AuthOptions`. A plugin describes the routes it contributes and may
// validate itself against the finished options in `init`.

use std::any::Any;
use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::options::AuthOptions;

#[async_trait]
pub trait AuthPlugin: Send + Sync + fmt::Debug {
    /// Unique identifier for this plugin (e.g., "two-factor", "admin", "organization").
    fn id(&self) -> &str;

    /// Human-readable plugin name.
    fn name(&self) -> &str {
        self.id()
    }

    /// Called once the options are fully composed.
    async fn init(&self, _ctx: &PluginInitContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Routes this plugin contributes, relative to the auth base path.
    fn endpoints(&self) -> Vec<PluginEndpoint> {
        Vec::new()
    }

    /// Typed access to the concrete plugin, see [`AuthOptions::plugin`].
    fn as_any(&self) -> &dyn Any;
}

/// Context available during plugin initialization.
#[derive(Debug)]
pub struct PluginInitContext<'a> {
    /// The auth options (read-only).
    pub options: &'a AuthOptions,
}

/// Route metadata for an endpoint served by the framework on a plugin's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEndpoint {
    pub path: String,
    pub method: HttpMethod,
    /// Whether the endpoint requires an authenticated session.
    pub require_auth: bool,
}

impl PluginEndpoint {
    pub fn new(path: impl Into<String>, method: HttpMethod, require_auth: bool) -> Self {
        Self {
            path: path.into(),
            method,
            require_auth,
        }
    }

    pub fn get(path: impl Into<String>, require_auth: bool) -> Self {
        Self::new(path, HttpMethod::Get, require_auth)
    }

    pub fn post(path: impl Into<String>, require_auth: bool) -> Self {
        Self::new(path, HttpMethod::Post, require_auth)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}
