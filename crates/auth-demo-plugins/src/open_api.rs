// OpenAPI plugin — schema generation and a reference page for the auth API.

use std::any::Any;

use async_trait::async_trait;

use auth_demo_core::plugin::{AuthPlugin, PluginEndpoint};

#[derive(Debug, Clone)]
pub struct OpenApiOptions {
    /// Path of the reference page (default: "/reference").
    pub path: String,
    pub disable_default_reference: bool,
}

impl Default for OpenApiOptions {
    fn default() -> Self {
        Self {
            path: "/reference".into(),
            disable_default_reference: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct OpenApiPlugin {
    options: OpenApiOptions,
}

impl OpenApiPlugin {
    pub fn new(options: OpenApiOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &OpenApiOptions {
        &self.options
    }
}

#[async_trait]
impl AuthPlugin for OpenApiPlugin {
    fn id(&self) -> &str {
        "open-api"
    }

    fn name(&self) -> &str {
        "OpenAPI"
    }

    fn endpoints(&self) -> Vec<PluginEndpoint> {
        let mut endpoints = vec![PluginEndpoint::get("/open-api/generate-schema", false)];
        if !self.options.disable_default_reference {
            endpoints.push(PluginEndpoint::get(self.options.path.clone(), false));
        }
        endpoints
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
