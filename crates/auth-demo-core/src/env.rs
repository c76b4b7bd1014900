// Environment detection, variable loading, and logger configuration.
//
// Every variable the demo reads is captured once into `AuthEnv`. Missing
// values fall back to defaults and are never validated here; a bad value
// surfaces when the external call that needs it is made.

use std::fmt;

pub const DEFAULT_EMAIL_FROM: &str = "delivered@resend.dev";
pub const DEFAULT_STRIPE_KEY: &str = "sk_test_";
pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017/better-auth-demo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvMode {
    Production,
    Development,
    Test,
    /// `NODE_ENV` unset or unrecognized: neither development nor production.
    #[default]
    Unspecified,
}

impl EnvMode {
    /// Parse a `NODE_ENV`-style value.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("production" | "prod") => Self::Production,
            Some("development" | "dev") => Self::Development,
            Some("test" | "testing") => Self::Test,
            _ => Self::Unspecified,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }

    pub fn is_development(&self) -> bool {
        *self == Self::Development
    }
}

/// Client id/secret pair for a social provider.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(&self.client_secret))
            .finish()
    }
}

/// Typed snapshot of the process environment.
#[derive(Clone, Default)]
pub struct AuthEnv {
    /// From `NODE_ENV`.
    pub mode: EnvMode,
    /// `BETTER_AUTH_SECRET`.
    pub secret: String,
    /// `BETTER_AUTH_URL`, the deployment base URL.
    pub base_url: Option<String>,
    /// `BETTER_AUTH_EMAIL`, else [`DEFAULT_EMAIL_FROM`].
    pub email_from: String,
    /// `TEST_EMAIL` recipient override.
    pub test_email: Option<String>,
    /// `RESEND_API_KEY`.
    pub resend_api_key: String,
    /// `GITHUB_CLIENT_ID` / `GITHUB_CLIENT_SECRET`.
    pub github: OAuthCredentials,
    /// `NEXT_PUBLIC_GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET`.
    pub google: OAuthCredentials,
    /// `STRIPE_KEY`, else [`DEFAULT_STRIPE_KEY`].
    pub stripe_key: String,
    /// `STRIPE_WEBHOOK_SECRET`, empty when unset.
    pub stripe_webhook_secret: String,
    /// `DATABASE_URL`, else [`DEFAULT_DATABASE_URL`].
    pub database_url: String,
}

impl AuthEnv {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let or_empty = |key: &str| get(key).unwrap_or_default();

        Self {
            mode: EnvMode::parse(get("NODE_ENV").as_deref()),
            secret: or_empty("BETTER_AUTH_SECRET"),
            base_url: get("BETTER_AUTH_URL"),
            email_from: get("BETTER_AUTH_EMAIL").unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string()),
            test_email: get("TEST_EMAIL"),
            resend_api_key: or_empty("RESEND_API_KEY"),
            github: OAuthCredentials {
                client_id: or_empty("GITHUB_CLIENT_ID"),
                client_secret: or_empty("GITHUB_CLIENT_SECRET"),
            },
            google: OAuthCredentials {
                client_id: or_empty("NEXT_PUBLIC_GOOGLE_CLIENT_ID"),
                client_secret: or_empty("GOOGLE_CLIENT_SECRET"),
            },
            stripe_key: get("STRIPE_KEY").unwrap_or_else(|| DEFAULT_STRIPE_KEY.to_string()),
            stripe_webhook_secret: or_empty("STRIPE_WEBHOOK_SECRET"),
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
        }
    }
}

impl fmt::Debug for AuthEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthEnv")
            .field("mode", &self.mode)
            .field("secret", &redacted(&self.secret))
            .field("base_url", &self.base_url)
            .field("email_from", &self.email_from)
            .field("test_email", &self.test_email)
            .field("resend_api_key", &redacted(&self.resend_api_key))
            .field("github", &self.github)
            .field("google", &self.google)
            .field("stripe_key", &redacted(&self.stripe_key))
            .field("stripe_webhook_secret", &redacted(&self.stripe_webhook_secret))
            .field("database_url", &self.database_url)
            .finish()
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}

/// Initialize the `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise production logs at info and every
/// other mode at debug. Calling this twice is harmless.
pub fn init_logger(mode: EnvMode) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if mode.is_production() {
            EnvFilter::new("auth_demo=info")
        } else {
            EnvFilter::new("auth_demo=debug")
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> AuthEnv {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AuthEnv::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(EnvMode::parse(Some("development")), EnvMode::Development);
        assert_eq!(EnvMode::parse(Some("Production")), EnvMode::Production);
        assert_eq!(EnvMode::parse(Some("test")), EnvMode::Test);
        assert_eq!(EnvMode::parse(Some("staging")), EnvMode::Unspecified);
        assert_eq!(EnvMode::parse(None), EnvMode::Unspecified);
    }

    #[test]
    fn test_unspecified_is_neither_dev_nor_prod() {
        let mode = EnvMode::Unspecified;
        assert!(!mode.is_development());
        assert!(!mode.is_production());
    }

    #[test]
    fn test_defaults_when_unset() {
        let env = env_from(&[]);
        assert_eq!(env.email_from, DEFAULT_EMAIL_FROM);
        assert_eq!(env.stripe_key, DEFAULT_STRIPE_KEY);
        assert_eq!(env.database_url, DEFAULT_DATABASE_URL);
        assert!(env.test_email.is_none());
        assert!(env.base_url.is_none());
        assert!(env.stripe_webhook_secret.is_empty());
        assert_eq!(env.github, OAuthCredentials::default());
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let env = env_from(&[("TEST_EMAIL", ""), ("BETTER_AUTH_EMAIL", "")]);
        assert!(env.test_email.is_none());
        assert_eq!(env.email_from, DEFAULT_EMAIL_FROM);
    }

    #[test]
    fn test_reads_provider_credentials() {
        let env = env_from(&[
            ("GITHUB_CLIENT_ID", "gh-id"),
            ("GITHUB_CLIENT_SECRET", "gh-secret"),
            ("NEXT_PUBLIC_GOOGLE_CLIENT_ID", "g-id"),
            ("GOOGLE_CLIENT_SECRET", "g-secret"),
        ]);
        assert_eq!(env.github.client_id, "gh-id");
        assert_eq!(env.github.client_secret, "gh-secret");
        assert_eq!(env.google.client_id, "g-id");
        assert_eq!(env.google.client_secret, "g-secret");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let env = env_from(&[("STRIPE_KEY", "sk_live_abc"), ("GITHUB_CLIENT_SECRET", "shh")]);
        let printed = format!("{env:?}");
        assert!(!printed.contains("sk_live_abc"));
        assert!(!printed.contains("shh"));
        assert!(printed.contains("<redacted>"));
    }
}
