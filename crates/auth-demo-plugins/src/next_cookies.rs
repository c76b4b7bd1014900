// Next.js cookies plugin.
//
// Marks the deployment as rendered by Next.js server actions: the framework
// forwards `Set-Cookie` headers from auth responses to the action's cookie
// store. Contributes no routes.

use std::any::Any;

use async_trait::async_trait;

use auth_demo_core::plugin::AuthPlugin;

#[derive(Debug, Default)]
pub struct NextCookiesPlugin;

impl NextCookiesPlugin {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuthPlugin for NextCookiesPlugin {
    fn id(&self) -> &str {
        "next-cookies"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contributes_no_routes() {
        let plugin = NextCookiesPlugin::new();
        assert_eq!(plugin.id(), "next-cookies");
        assert!(plugin.endpoints().is_empty());
    }
}
