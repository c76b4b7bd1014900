// Bearer plugin — accept the session token from `Authorization: Bearer`.

use std::any::Any;

use async_trait::async_trait;

use auth_demo_core::plugin::AuthPlugin;

#[derive(Debug, Clone, Default)]
pub struct BearerOptions {
    /// Only accept tokens carrying the cookie signature.
    pub require_signature: bool,
}

#[derive(Debug, Default)]
pub struct BearerPlugin {
    options: BearerOptions,
}

impl BearerPlugin {
    pub fn new(options: BearerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BearerOptions {
        &self.options
    }
}

#[async_trait]
impl AuthPlugin for BearerPlugin {
    fn id(&self) -> &str {
        "bearer"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
