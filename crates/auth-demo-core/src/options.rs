// AuthOptions — the composed configuration handed to the auth framework.
//
// Built once at startup with the builder methods below and never mutated
// afterwards. Callbacks are `Arc`'d closures so they can capture shared
// handles (database, mailer) without tying the options to a lifetime.

use std::any::Any;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::error::{AuthError, Result};
use crate::linking::AccountLinkingOptions;
use crate::models::User;
use crate::plugin::{AuthPlugin, PluginEndpoint, PluginInitContext};
use crate::utils::id::{generate_id, IdGenerator};
use crate::utils::origin::is_trusted_origin;

// ─── Callback Types ─────────────────────────────────────────────

/// Data passed to the verification and reset-password callbacks.
#[derive(Debug, Clone)]
pub struct EmailCallbackData {
    pub user: User,
    /// The action URL (verification link, reset link).
    pub url: String,
    /// The raw token embedded in `url`.
    pub token: String,
}

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Async email callback. Errors propagate to the framework's caller.
pub type EmailCallback = Arc<dyn Fn(EmailCallbackData) -> BoxFuture<Result<()>> + Send + Sync>;

// ─── Top-level Options ──────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOptions {
    /// App name for branding in emails etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Secret for signing cookies and tokens.
    #[serde(skip)]
    pub secret: String,

    /// Base URL of the auth server (e.g., "https://example.com").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Path prefix for all auth routes (default: "/api/auth").
    pub base_path: String,

    pub database: DatabaseOptions,

    pub advanced: AdvancedOptions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verification: Option<EmailVerificationOptions>,

    pub account: AccountOptions,

    pub email_and_password: EmailAndPasswordOptions,

    /// Key is the provider ID (e.g., "google", "github").
    pub social_providers: BTreeMap<String, SocialProviderOptions>,

    /// Registered plugins, in registration order.
    #[serde(serialize_with = "serialize_plugin_ids")]
    pub plugins: Vec<Box<dyn AuthPlugin>>,

    /// Origins allowed to make cross-origin authenticated requests.
    pub trusted_origins: Vec<String>,
}

fn default_base_path() -> String {
    "/api/auth".to_string()
}

fn serialize_plugin_ids<S: Serializer>(
    plugins: &[Box<dyn AuthPlugin>],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(plugins.iter().map(|p| p.id()))
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            app_name: None,
            secret: String::new(),
            base_url: None,
            base_path: default_base_path(),
            database: DatabaseOptions::default(),
            advanced: AdvancedOptions::default(),
            email_verification: None,
            account: AccountOptions::default(),
            email_and_password: EmailAndPasswordOptions::default(),
            social_providers: BTreeMap::new(),
            plugins: Vec::new(),
            trusted_origins: Vec::new(),
        }
    }
}

impl fmt::Debug for AuthOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthOptions")
            .field("app_name", &self.app_name)
            .field("base_url", &self.base_url)
            .field("base_path", &self.base_path)
            .field("database", &self.database)
            .field("advanced", &self.advanced)
            .field("email_verification", &self.email_verification)
            .field("account", &self.account)
            .field("email_and_password", &self.email_and_password)
            .field("social_providers", &self.social_providers)
            .field("plugins", &self.plugin_ids())
            .field("trusted_origins", &self.trusted_origins)
            .finish()
    }
}

impl AuthOptions {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    pub fn base_url(mut self, url: Option<String>) -> Self {
        self.base_url = url;
        self
    }

    pub fn database(mut self, provider: DatabaseProvider) -> Self {
        self.database.provider = provider;
        self
    }

    pub fn generate_id(mut self, strategy: GenerateId) -> Self {
        self.advanced.database.generate_id = strategy;
        self
    }

    pub fn email_verification(mut self, options: EmailVerificationOptions) -> Self {
        self.email_verification = Some(options);
        self
    }

    pub fn account_linking(mut self, linking: AccountLinkingOptions) -> Self {
        self.account.account_linking = linking;
        self
    }

    pub fn email_and_password(mut self, options: EmailAndPasswordOptions) -> Self {
        self.email_and_password = options;
        self
    }

    pub fn social_provider(mut self, id: impl Into<String>, options: SocialProviderOptions) -> Self {
        self.social_providers.insert(id.into(), options);
        self
    }

    pub fn add_plugin(mut self, plugin: impl AuthPlugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn trusted_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trusted_origins.extend(origins.into_iter().map(Into::into));
        self
    }

    // ─── Accessors ──────────────────────────────────────────────

    /// Plugin ids in registration order.
    pub fn plugin_ids(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.id()).collect()
    }

    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.iter().any(|p| p.id() == id)
    }

    pub fn get_plugin(&self, id: &str) -> Option<&dyn AuthPlugin> {
        self.plugins.iter().find(|p| p.id() == id).map(|p| p.as_ref())
    }

    /// The first registered plugin of concrete type `T`.
    pub fn plugin<T: Any>(&self) -> Option<&T> {
        self.plugins
            .iter()
            .find_map(|p| p.as_any().downcast_ref::<T>())
    }

    /// All plugin endpoints, prefixed with the base path.
    pub fn endpoints(&self) -> Vec<PluginEndpoint> {
        let base = self.base_path.trim_end_matches('/');
        self.plugins
            .iter()
            .flat_map(|p| p.endpoints())
            .map(|mut ep| {
                ep.path = format!("{base}{}", ep.path);
                ep
            })
            .collect()
    }

    /// Fresh id for a record about to be inserted.
    pub fn new_record_id(&self) -> String {
        self.advanced.database.generate_id.generate()
    }

    pub fn is_trusted_origin(&self, url: &str) -> bool {
        is_trusted_origin(url, &self.trusted_origins)
    }

    /// Validate the plugin list and run every plugin's `init`, in order.
    pub async fn init(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            if !seen.insert(plugin.id()) {
                return Err(AuthError::Config(format!(
                    "plugin '{}' is registered more than once",
                    plugin.id()
                )));
            }
        }

        let ctx = PluginInitContext { options: self };
        for plugin in &self.plugins {
            plugin.init(&ctx).await?;
            tracing::debug!(plugin = plugin.id(), "plugin initialized");
        }

        tracing::info!(
            app = self.app_name.as_deref().unwrap_or_default(),
            plugins = self.plugins.len(),
            "auth options initialized"
        );
        Ok(())
    }
}

// ─── Database Options ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseProvider {
    #[default]
    Mongodb,
    Postgresql,
    Sqlite,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseOptions {
    pub provider: DatabaseProvider,
}

// ─── Advanced Options ───────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct AdvancedOptions {
    pub database: AdvancedDatabaseOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedDatabaseOptions {
    pub generate_id: GenerateId,
}

/// ID generation strategy.
#[derive(Clone, Default)]
pub enum GenerateId {
    /// nanoid (default).
    #[default]
    Random,
    /// Store-specific generator.
    Custom(IdGenerator),
}

impl GenerateId {
    pub fn custom(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    pub fn generate(&self) -> String {
        match self {
            Self::Random => generate_id(),
            Self::Custom(f) => f(),
        }
    }
}

impl fmt::Debug for GenerateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => write!(f, "Random"),
            Self::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

impl Serialize for GenerateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            Self::Random => "random",
            Self::Custom(_) => "custom",
        })
    }
}

// ─── Email Verification Options ─────────────────────────────────

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailVerificationOptions {
    /// Send a verification email on sign-up (default: false).
    pub send_on_sign_up: bool,

    /// Verification token expiry in seconds (default: 3600).
    pub expires_in: u64,

    #[serde(skip)]
    pub send_verification_email: Option<EmailCallback>,
}

impl fmt::Debug for EmailVerificationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailVerificationOptions")
            .field("send_on_sign_up", &self.send_on_sign_up)
            .field("expires_in", &self.expires_in)
            .field("send_verification_email", &self.send_verification_email.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl Default for EmailVerificationOptions {
    fn default() -> Self {
        Self {
            send_on_sign_up: false,
            expires_in: 3600,
            send_verification_email: None,
        }
    }
}

// ─── Account Options ────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOptions {
    pub account_linking: AccountLinkingOptions,
}

// ─── Email & Password Options ───────────────────────────────────

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAndPasswordOptions {
    /// Enable email/password authentication (default: false).
    pub enabled: bool,

    /// Minimum password length (default: 8).
    pub min_password_length: usize,

    /// Maximum password length (default: 128).
    pub max_password_length: usize,

    /// Reset password token expiry in seconds (default: 3600).
    pub reset_password_token_expires_in: u64,

    #[serde(skip)]
    pub send_reset_password: Option<EmailCallback>,
}

impl fmt::Debug for EmailAndPasswordOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailAndPasswordOptions")
            .field("enabled", &self.enabled)
            .field("min_password_length", &self.min_password_length)
            .field("max_password_length", &self.max_password_length)
            .field("reset_password_token_expires_in", &self.reset_password_token_expires_in)
            .field("send_reset_password", &self.send_reset_password.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl Default for EmailAndPasswordOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            min_password_length: 8,
            max_password_length: 128,
            reset_password_token_expires_in: 3600,
            send_reset_password: None,
        }
    }
}

// ─── Social Providers ───────────────────────────────────────────

#[derive(Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialProviderOptions {
    pub client_id: String,
    #[serde(skip)]
    pub client_secret: String,
}

impl SocialProviderOptions {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for SocialProviderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SocialProviderOptions")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NamedPlugin(&'static str);

    impl AuthPlugin for NamedPlugin {
        fn id(&self) -> &str {
            self.0
        }

        fn endpoints(&self) -> Vec<PluginEndpoint> {
            vec![PluginEndpoint::post(format!("/{}/do", self.0), true)]
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_defaults() {
        let opts = AuthOptions::default();
        assert_eq!(opts.base_path, "/api/auth");
        assert!(!opts.email_and_password.enabled);
        assert_eq!(opts.email_and_password.min_password_length, 8);
        assert!(opts.account.account_linking.enabled);
        assert_eq!(opts.database.provider, DatabaseProvider::Mongodb);
    }

    #[test]
    fn test_plugins_keep_registration_order() {
        let opts = AuthOptions::new("secret")
            .add_plugin(NamedPlugin("b"))
            .add_plugin(NamedPlugin("a"));
        assert_eq!(opts.plugin_ids(), vec!["b", "a"]);
        assert!(opts.has_plugin("a"));
        assert_eq!(opts.plugin::<NamedPlugin>().map(|p| p.0), Some("b"));
    }

    #[test]
    fn test_endpoints_are_prefixed() {
        let opts = AuthOptions::new("secret").add_plugin(NamedPlugin("x"));
        let eps = opts.endpoints();
        assert_eq!(eps[0].path, "/api/auth/x/do");
    }

    #[tokio::test]
    async fn test_init_rejects_duplicate_plugins() {
        let opts = AuthOptions::new("secret")
            .add_plugin(NamedPlugin("dup"))
            .add_plugin(NamedPlugin("dup"));
        let err = opts.init().await.unwrap_err();
        assert!(matches!(err, AuthError::Config(_)));
    }

    #[test]
    fn test_custom_id_generator() {
        let opts = AuthOptions::new("secret").generate_id(GenerateId::custom(|| "fixed".into()));
        assert_eq!(opts.new_record_id(), "fixed");
        assert_eq!(AuthOptions::default().new_record_id().len(), 21);
    }

    #[test]
    fn test_serialization_hides_secrets() {
        let opts = AuthOptions::new("top-secret")
            .social_provider("github", SocialProviderOptions::new("gh-id", "gh-secret"))
            .add_plugin(NamedPlugin("p"));
        let json = serde_json::to_value(&opts).unwrap();
        let text = json.to_string();
        assert!(!text.contains("top-secret"));
        assert!(!text.contains("gh-secret"));
        assert_eq!(json["socialProviders"]["github"]["clientId"], "gh-id");
        assert_eq!(json["plugins"], serde_json::json!(["p"]));
        assert_eq!(json["advanced"]["database"]["generateId"], "random");
    }
}
