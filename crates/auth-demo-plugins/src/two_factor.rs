// Two-Factor Authentication plugin options.
//
// OTP codes are generated here and delivered through the configured
// `send_otp` callback. Storing and verifying them is the framework's job.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use auth_demo_core::error::AuthError;
use auth_demo_core::models::User;
use auth_demo_core::options::BoxFuture;
use auth_demo_core::plugin::{AuthPlugin, PluginEndpoint, PluginInitContext};
use auth_demo_core::Result;

// ── Constants ───────────────────────────────────────────────────────────────

/// Default OTP validity period in minutes.
pub const OTP_DEFAULT_PERIOD_MINUTES: u64 = 3;

/// Default OTP digits.
pub const OTP_DEFAULT_DIGITS: usize = 6;

/// Default max OTP verification attempts.
pub const OTP_DEFAULT_MAX_ATTEMPTS: u32 = 5;

const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

// ── Options ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct OtpCallbackData {
    pub user: User,
    pub otp: String,
}

pub type OtpCallback = Arc<dyn Fn(OtpCallbackData) -> BoxFuture<Result<()>> + Send + Sync>;

/// Email/SMS OTP configuration for 2FA.
#[derive(Clone)]
pub struct TwoFactorOtpOptions {
    /// Validity period in minutes.
    pub period_minutes: u64,
    /// Number of digits for the OTP.
    pub digits: usize,
    /// Max allowed verification attempts before requiring a new code.
    pub allowed_attempts: u32,
    pub send_otp: Option<OtpCallback>,
}

impl Default for TwoFactorOtpOptions {
    fn default() -> Self {
        Self {
            period_minutes: OTP_DEFAULT_PERIOD_MINUTES,
            digits: OTP_DEFAULT_DIGITS,
            allowed_attempts: OTP_DEFAULT_MAX_ATTEMPTS,
            send_otp: None,
        }
    }
}

impl fmt::Debug for TwoFactorOtpOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwoFactorOtpOptions")
            .field("period_minutes", &self.period_minutes)
            .field("digits", &self.digits)
            .field("allowed_attempts", &self.allowed_attempts)
            .field("send_otp", &self.send_otp.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TwoFactorOptions {
    /// Issuer name for TOTP URIs (defaults to app name).
    pub issuer: Option<String>,
    pub otp_options: TwoFactorOtpOptions,
    /// Enable 2FA immediately, without verifying a first code.
    pub skip_verification_on_enable: bool,
}

impl TwoFactorOptions {
    pub fn with_otp_sender<F>(f: F) -> Self
    where
        F: Fn(OtpCallbackData) -> BoxFuture<Result<()>> + Send + Sync + 'static,
    {
        Self {
            otp_options: TwoFactorOtpOptions {
                send_otp: Some(Arc::new(f)),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

// ── OTP ─────────────────────────────────────────────────────────────────────

/// Generate a random numeric OTP.
pub fn generate_otp(digits: usize) -> String {
    nanoid::nanoid!(digits, &DIGITS)
}

// ── Plugin ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct TwoFactorPlugin {
    options: TwoFactorOptions,
}

impl TwoFactorPlugin {
    pub fn new(options: TwoFactorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TwoFactorOptions {
        &self.options
    }

    /// Generate an OTP for `user`, hand it to the sender, and return it.
    pub async fn send_otp(&self, user: &User) -> Result<String> {
        let otp = generate_otp(self.options.otp_options.digits);
        let send = self
            .options
            .otp_options
            .send_otp
            .as_ref()
            .ok_or_else(|| AuthError::Plugin("two-factor OTP sender is not configured".into()))?;
        send(OtpCallbackData {
            user: user.clone(),
            otp: otp.clone(),
        })
        .await?;
        Ok(otp)
    }
}

#[async_trait]
impl AuthPlugin for TwoFactorPlugin {
    fn id(&self) -> &str {
        "two-factor"
    }

    fn name(&self) -> &str {
        "Two-Factor Authentication"
    }

    async fn init(&self, _ctx: &PluginInitContext<'_>) -> Result<()> {
        if self.options.otp_options.send_otp.is_none() {
            tracing::debug!("two-factor OTP disabled: no sender configured");
        }
        Ok(())
    }

    fn endpoints(&self) -> Vec<PluginEndpoint> {
        let mut endpoints: Vec<_> = [
            "/two-factor/enable",
            "/two-factor/disable",
            "/two-factor/get-totp-uri",
            "/two-factor/verify-totp",
            "/two-factor/generate-backup-codes",
            "/two-factor/verify-backup-code",
        ]
        .into_iter()
        .map(|path| PluginEndpoint::post(path, true))
        .collect();
        if self.options.otp_options.send_otp.is_some() {
            endpoints.push(PluginEndpoint::post("/two-factor/send-otp", false));
            endpoints.push(PluginEndpoint::post("/two-factor/verify-otp", false));
        }
        endpoints
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
