// Organization plugin — organizations, members and email invitations.
//
// The invitation record lives in the framework; this crate only decides how
// long it is valid and hands its data to `send_invitation_email`.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use auth_demo_core::models::InvitationEmailData;
use auth_demo_core::options::BoxFuture;
use auth_demo_core::plugin::{AuthPlugin, PluginEndpoint, PluginInitContext};
use auth_demo_core::Result;

/// Default invitation lifetime: 48 hours.
pub const DEFAULT_INVITATION_EXPIRY_SECS: u64 = 48 * 60 * 60;

pub type InvitationCallback =
    Arc<dyn Fn(InvitationEmailData) -> BoxFuture<Result<()>> + Send + Sync>;

#[derive(Clone)]
pub struct OrganizationOptions {
    pub allow_user_to_create_organization: bool,
    /// Maximum organizations a user may create.
    pub organization_limit: Option<usize>,
    /// Role given to the organization's creator (default: "owner").
    pub creator_role: String,
    /// Role given to invited members (default: "member").
    pub default_member_role: String,
    /// Invitation lifetime in seconds.
    pub invitation_expires_in: u64,
    /// Maximum pending invitations per organization.
    pub invitation_limit: usize,
    pub cancel_pending_invitations_on_re_invite: bool,
    pub send_invitation_email: Option<InvitationCallback>,
}

impl Default for OrganizationOptions {
    fn default() -> Self {
        Self {
            allow_user_to_create_organization: true,
            organization_limit: None,
            creator_role: "owner".into(),
            default_member_role: "member".into(),
            invitation_expires_in: DEFAULT_INVITATION_EXPIRY_SECS,
            invitation_limit: 100,
            cancel_pending_invitations_on_re_invite: false,
            send_invitation_email: None,
        }
    }
}

impl fmt::Debug for OrganizationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrganizationOptions")
            .field("allow_user_to_create_organization", &self.allow_user_to_create_organization)
            .field("organization_limit", &self.organization_limit)
            .field("creator_role", &self.creator_role)
            .field("default_member_role", &self.default_member_role)
            .field("invitation_expires_in", &self.invitation_expires_in)
            .field("invitation_limit", &self.invitation_limit)
            .field("send_invitation_email", &self.send_invitation_email.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl OrganizationOptions {
    pub fn with_invitation_sender<F>(f: F) -> Self
    where
        F: Fn(InvitationEmailData) -> BoxFuture<Result<()>> + Send + Sync + 'static,
    {
        Self {
            send_invitation_email: Some(Arc::new(f)),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct OrganizationPlugin {
    options: OrganizationOptions,
}

impl OrganizationPlugin {
    pub fn new(options: OrganizationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &OrganizationOptions {
        &self.options
    }

    /// When an invitation created at `created_at` stops being valid.
    pub fn invitation_expires_at(&self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        let secs = i64::try_from(self.options.invitation_expires_in).unwrap_or(i64::MAX);
        created_at + Duration::seconds(secs)
    }

    /// Deliver an invitation through the configured sender.
    ///
    /// Without a sender the invitation is created silently.
    pub async fn send_invitation_email(&self, data: InvitationEmailData) -> Result<()> {
        match &self.options.send_invitation_email {
            Some(send) => send(data).await,
            None => {
                tracing::debug!(invitation = %data.id, "no invitation sender configured");
                Ok(())
            }
        }
    }
}

#[async_trait]
impl AuthPlugin for OrganizationPlugin {
    fn id(&self) -> &str {
        "organization"
    }

    fn name(&self) -> &str {
        "Organization"
    }

    async fn init(&self, _ctx: &PluginInitContext<'_>) -> Result<()> {
        if self.options.send_invitation_email.is_none() {
            tracing::warn!("organization invitations will not be emailed");
        }
        Ok(())
    }

    fn endpoints(&self) -> Vec<PluginEndpoint> {
        [
            "/organization/create",
            "/organization/update",
            "/organization/delete",
            "/organization/set-active",
            "/organization/invite-member",
            "/organization/accept-invitation",
            "/organization/reject-invitation",
            "/organization/cancel-invitation",
            "/organization/remove-member",
            "/organization/update-member-role",
            "/organization/leave",
        ]
        .into_iter()
        .map(|path| PluginEndpoint::post(path, true))
        .chain([
            PluginEndpoint::get("/organization/list", true),
            PluginEndpoint::get("/organization/get-full-organization", true),
            PluginEndpoint::get("/organization/get-invitation", true),
            PluginEndpoint::get("/organization/list-invitations", true),
        ])
        .collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
