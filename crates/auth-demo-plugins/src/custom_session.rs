// Custom Session plugin — enriches session responses with custom data.
//
// The framework hands every session read to `CustomSessionPlugin::apply`;
// the configured `SessionCustomizer` decides what the client sees.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use auth_demo_core::error::{AuthError, Result};
use auth_demo_core::models::SessionWithUser;
use auth_demo_core::plugin::{AuthPlugin, PluginEndpoint};

/// Transforms the `{ session, user }` pair before it is returned.
#[async_trait]
pub trait SessionCustomizer: Send + Sync + std::fmt::Debug {
    async fn customize(&self, session: SessionWithUser) -> Result<serde_json::Value>;
}

#[derive(Debug, Clone, Default)]
pub struct CustomSessionOptions {
    /// Whether to also mutate the list-device-sessions endpoint.
    pub should_mutate_list_device_sessions: bool,
}

#[derive(Debug, Default)]
pub struct CustomSessionPlugin {
    options: CustomSessionOptions,
    customizer: Option<Arc<dyn SessionCustomizer>>,
}

impl CustomSessionPlugin {
    pub fn new(customizer: Arc<dyn SessionCustomizer>) -> Self {
        Self {
            options: CustomSessionOptions::default(),
            customizer: Some(customizer),
        }
    }

    pub fn with_options(mut self, options: CustomSessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CustomSessionOptions {
        &self.options
    }

    /// Run the customizer, or serialize the pair unchanged when none is set.
    pub async fn apply(&self, session: SessionWithUser) -> Result<serde_json::Value> {
        match &self.customizer {
            Some(c) => c.customize(session).await,
            None => serde_json::to_value(session).map_err(|e| AuthError::Plugin(e.to_string())),
        }
    }
}

#[async_trait]
impl AuthPlugin for CustomSessionPlugin {
    fn id(&self) -> &str {
        "custom-session"
    }

    fn name(&self) -> &str {
        "Custom Session"
    }

    fn endpoints(&self) -> Vec<PluginEndpoint> {
        vec![PluginEndpoint::get("/get-session", true)]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth_demo_core::models::{Session, User};
    use chrono::Utc;

    #[derive(Debug)]
    struct Tag;

    #[async_trait]
    impl SessionCustomizer for Tag {
        async fn customize(&self, session: SessionWithUser) -> Result<serde_json::Value> {
            Ok(serde_json::json!({ "tagged": session.user.id }))
        }
    }

    fn pair() -> SessionWithUser {
        let now = Utc::now();
        SessionWithUser {
            session: Session {
                id: "s1".into(),
                token: "tok".into(),
                user_id: "u1".into(),
                expires_at: now,
                ip_address: None,
                user_agent: None,
                created_at: now,
                updated_at: now,
                extra: Default::default(),
            },
            user: User::new("u1", "Ada", "ada@example.com"),
        }
    }

    #[tokio::test]
    async fn test_apply_without_customizer_is_identity() {
        let value = CustomSessionPlugin::default().apply(pair()).await.unwrap();
        assert_eq!(value["user"]["id"], "u1");
        assert_eq!(value["session"]["token"], "tok");
    }

    #[tokio::test]
    async fn test_apply_runs_customizer() {
        let plugin = CustomSessionPlugin::new(Arc::new(Tag));
        let value = plugin.apply(pair()).await.unwrap();
        assert_eq!(value, serde_json::json!({ "tagged": "u1" }));
    }
}
