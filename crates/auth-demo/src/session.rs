use async_trait::async_trait;

use auth_demo_core::error::{AuthError, Result};
use auth_demo_core::models::SessionWithUser;
use auth_demo_plugins::SessionCustomizer;

/// Adds `dd: "test"` to the user of every session read.
#[derive(Debug, Default)]
pub struct DemoSessionCustomizer;

#[async_trait]
impl SessionCustomizer for DemoSessionCustomizer {
    async fn customize(&self, mut session: SessionWithUser) -> Result<serde_json::Value> {
        session
            .user
            .extra
            .insert("dd".into(), serde_json::Value::String("test".into()));
        serde_json::to_value(session).map_err(|e| AuthError::Plugin(e.to_string()))
    }
}
