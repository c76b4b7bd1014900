// Account linking policy.
//
// A user may attach several provider accounts, but only providers on the
// explicit allow-list can be linked. Everything else is rejected before the
// framework touches the account table.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLinkingOptions {
    /// Enable account linking (default: true).
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Providers allowed to be linked to an existing user.
    #[serde(default)]
    pub trusted_providers: Vec<String>,

    /// Allow linking accounts whose email differs from the user's.
    #[serde(default)]
    pub allow_different_emails: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AccountLinkingOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            trusted_providers: Vec::new(),
            allow_different_emails: false,
        }
    }
}

impl AccountLinkingOptions {
    pub fn with_trusted_providers<I, S>(providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            trusted_providers: providers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn is_trusted_provider(&self, provider_id: &str) -> bool {
        self.trusted_providers.iter().any(|p| p == provider_id)
    }

    /// Decide whether an account from `provider_id` may be linked.
    pub fn check_link(&self, provider_id: &str) -> Result<(), ApiError> {
        if !self.enabled {
            return Err(ApiError::unauthorized(ErrorCode::AccountLinkingDisabled));
        }
        if !self.is_trusted_provider(provider_id) {
            tracing::debug!(provider = provider_id, "rejecting link from untrusted provider");
            return Err(ApiError::unauthorized(ErrorCode::ProviderNotTrusted));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trusted_provider_can_link() {
        let opts = AccountLinkingOptions::with_trusted_providers(["google", "github"]);
        assert!(opts.check_link("google").is_ok());
        assert!(opts.check_link("github").is_ok());
    }

    #[test]
    fn test_untrusted_provider_rejected() {
        let opts = AccountLinkingOptions::with_trusted_providers(["google"]);
        let err = opts.check_link("twitter").unwrap_err();
        assert_eq!(err.code, ErrorCode::ProviderNotTrusted);
        assert_eq!(err.status.status_code(), 401);
    }

    #[test]
    fn test_provider_match_is_exact() {
        let opts = AccountLinkingOptions::with_trusted_providers(["github"]);
        assert!(!opts.is_trusted_provider("GitHub"));
        assert!(!opts.is_trusted_provider("github "));
    }

    #[test]
    fn test_disabled_linking_rejects_everything() {
        let opts = AccountLinkingOptions {
            enabled: false,
            ..AccountLinkingOptions::with_trusted_providers(["google"])
        };
        let err = opts.check_link("google").unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountLinkingDisabled);
    }
}
