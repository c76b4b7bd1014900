// Admin plugin — user management, role assignment, banning, impersonation.
//
// A caller is an admin when their user id is listed in `admin_user_ids` or
// one of their (comma-separated) roles is in `admin_roles`. Empty ids in the
// list never match anything.

use std::any::Any;

use async_trait::async_trait;

use auth_demo_core::error::{ApiError, ErrorCode};
use auth_demo_core::plugin::{AuthPlugin, PluginEndpoint};

#[derive(Debug, Clone)]
pub struct AdminOptions {
    /// Default role for new users.
    pub default_role: String,
    /// Roles with admin privileges.
    pub admin_roles: Vec<String>,
    /// User IDs that always have admin permissions (bypass role checks).
    pub admin_user_ids: Vec<String>,
    /// Duration of impersonation sessions in seconds (default: 1 hour).
    pub impersonation_session_duration: u64,
    /// Message shown to banned users.
    pub banned_user_message: String,
}

impl Default for AdminOptions {
    fn default() -> Self {
        Self {
            default_role: "user".into(),
            admin_roles: vec!["admin".into()],
            admin_user_ids: Vec::new(),
            impersonation_session_duration: 60 * 60,
            banned_user_message:
                "You have been banned from this application. Please contact support if you believe this is an error."
                    .into(),
        }
    }
}

impl AdminOptions {
    pub fn with_admin_user_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admin_user_ids: ids.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn is_admin(&self, user_id: &str, role: Option<&str>) -> bool {
        if !user_id.is_empty() && self.admin_user_ids.iter().any(|id| id == user_id) {
            return true;
        }

        role.map(|roles| {
            roles
                .split(',')
                .map(str::trim)
                .any(|r| self.admin_roles.iter().any(|ar| ar == r))
        })
        .unwrap_or(false)
    }

    /// Reject non-admin callers with `403 NOT_ALLOWED`.
    pub fn require_admin(&self, user_id: &str, role: Option<&str>) -> Result<(), ApiError> {
        if self.is_admin(user_id, role) {
            Ok(())
        } else {
            Err(ApiError::forbidden(ErrorCode::NotAllowed))
        }
    }
}

#[derive(Debug, Default)]
pub struct AdminPlugin {
    options: AdminOptions,
}

impl AdminPlugin {
    pub fn new(options: AdminOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AdminOptions {
        &self.options
    }
}

#[async_trait]
impl AuthPlugin for AdminPlugin {
    fn id(&self) -> &str {
        "admin"
    }

    fn name(&self) -> &str {
        "Admin"
    }

    fn endpoints(&self) -> Vec<PluginEndpoint> {
        [
            "/admin/set-role",
            "/admin/create-user",
            "/admin/update-user",
            "/admin/ban-user",
            "/admin/unban-user",
            "/admin/list-user-sessions",
            "/admin/revoke-user-session",
            "/admin/revoke-user-sessions",
            "/admin/impersonate-user",
            "/admin/stop-impersonating",
            "/admin/remove-user",
            "/admin/set-user-password",
            "/admin/has-permission",
        ]
        .into_iter()
        .map(|path| PluginEndpoint::post(path, true))
        .chain([
            PluginEndpoint::get("/admin/list-users", true),
            PluginEndpoint::get("/admin/get-user", true),
        ])
        .collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
