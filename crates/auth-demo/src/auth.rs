// The composed auth configuration.
//
// `build_auth_options` is pure: it only reads the env snapshot and captures
// the mailer in the email callbacks. `init_auth` adds the process-wide
// database handle and the Resend transport, then validates the plugins.

use std::sync::Arc;

use auth_demo_core::options::{
    BoxFuture, DatabaseProvider, EmailAndPasswordOptions, EmailCallback, EmailCallbackData,
    EmailVerificationOptions, SocialProviderOptions,
};
use auth_demo_core::{AccountLinkingOptions, AuthEnv, AuthOptions, InvitationEmailData, Result};
use auth_demo_email::{Mailer, MailerSettings, ResendClient};
use auth_demo_mongodb::{object_id_strategy, DatabaseConfig, DatabaseHandle};
use auth_demo_plugins::oidc_provider::OidcProviderOptions;
use auth_demo_plugins::two_factor::OtpCallbackData;
use auth_demo_plugins::{
    AdminOptions, AdminPlugin, BearerPlugin, CustomSessionPlugin, MultiSessionPlugin,
    NextCookiesPlugin, OAuthProxyPlugin, OidcProviderPlugin, OneTapPlugin, OpenApiPlugin,
    OrganizationOptions, OrganizationPlugin, PasskeyPlugin, TwoFactorOptions, TwoFactorPlugin,
};
use auth_demo_stripe::StripePlugin;

use crate::plans::stripe_options;
use crate::session::DemoSessionCustomizer;

pub const APP_NAME: &str = "Better Auth Demo";

/// Providers whose accounts may be linked to an existing user.
pub const TRUSTED_PROVIDERS: [&str; 3] = ["google", "github", "demo-app"];

pub const TRUSTED_ORIGINS: [&str; 2] = [
    "https://better-auth-demo-git-main-chrisdrivlys-projects.vercel.app/",
    "https://better-auth-demo-968d85zw2-chrisdrivlys-projects.vercel.app/",
];

// Placeholder entry. An empty id grants nothing.
pub const ADMIN_USER_IDS: [&str; 1] = [""];

pub const LOGIN_PAGE: &str = "/sign-in";

/// Everything the auth framework is started with.
#[derive(Debug)]
pub struct Auth {
    pub options: AuthOptions,
    pub database: Arc<DatabaseHandle>,
    pub mailer: Arc<Mailer>,
}

/// Connect (or reuse) the shared database, build the options and run every
/// plugin's `init`.
pub async fn init_auth(env: &AuthEnv) -> Result<Auth> {
    let database = DatabaseHandle::shared(&DatabaseConfig::from_env(env)).await?;
    let sender = Arc::new(ResendClient::new(env.resend_api_key.clone()));
    let mailer = Arc::new(Mailer::new(sender, MailerSettings::from_env(env)));

    let options = build_auth_options(env, mailer.clone());
    options.init().await?;
    tracing::info!(
        database = database.database().name(),
        plugins = ?options.plugin_ids(),
        "auth configured"
    );

    Ok(Auth {
        options,
        database,
        mailer,
    })
}

pub fn build_auth_options(env: &AuthEnv, mailer: Arc<Mailer>) -> AuthOptions {
    AuthOptions::new(env.secret.clone())
        .app_name(APP_NAME)
        .base_url(env.base_url.clone())
        .database(DatabaseProvider::Mongodb)
        .generate_id(object_id_strategy())
        .email_verification(EmailVerificationOptions {
            send_verification_email: Some(verification_sender(mailer.clone())),
            ..Default::default()
        })
        .account_linking(AccountLinkingOptions::with_trusted_providers(TRUSTED_PROVIDERS))
        .email_and_password(EmailAndPasswordOptions {
            enabled: true,
            send_reset_password: Some(reset_password_sender(mailer.clone())),
            ..Default::default()
        })
        .social_provider(
            "github",
            SocialProviderOptions::new(env.github.client_id.clone(), env.github.client_secret.clone()),
        )
        .social_provider(
            "google",
            SocialProviderOptions::new(env.google.client_id.clone(), env.google.client_secret.clone()),
        )
        .add_plugin(OrganizationPlugin::new(invitation_options(mailer.clone())))
        .add_plugin(TwoFactorPlugin::new(two_factor_options(mailer)))
        .add_plugin(PasskeyPlugin::default())
        .add_plugin(OpenApiPlugin::default())
        .add_plugin(BearerPlugin::default())
        .add_plugin(AdminPlugin::new(AdminOptions::with_admin_user_ids(ADMIN_USER_IDS)))
        .add_plugin(MultiSessionPlugin::default())
        .add_plugin(OAuthProxyPlugin::default())
        .add_plugin(NextCookiesPlugin::new())
        .add_plugin(OidcProviderPlugin::new(OidcProviderOptions::with_login_page(LOGIN_PAGE)))
        .add_plugin(OneTapPlugin::default())
        .add_plugin(CustomSessionPlugin::new(Arc::new(DemoSessionCustomizer)))
        .add_plugin(StripePlugin::new(stripe_options(env)))
        .trusted_origins(TRUSTED_ORIGINS)
}

// ─── Email callbacks ────────────────────────────────────────────

fn verification_sender(mailer: Arc<Mailer>) -> EmailCallback {
    Arc::new(move |data: EmailCallbackData| -> BoxFuture<Result<()>> {
        let mailer = mailer.clone();
        Box::pin(async move {
            mailer.send_verification_email(&data.user, &data.url).await?;
            Ok(())
        })
    })
}

fn reset_password_sender(mailer: Arc<Mailer>) -> EmailCallback {
    Arc::new(move |data: EmailCallbackData| -> BoxFuture<Result<()>> {
        let mailer = mailer.clone();
        Box::pin(async move {
            mailer.send_reset_password(&data.user, &data.url).await?;
            Ok(())
        })
    })
}

fn invitation_options(mailer: Arc<Mailer>) -> OrganizationOptions {
    OrganizationOptions::with_invitation_sender(
        move |data: InvitationEmailData| -> BoxFuture<Result<()>> {
            let mailer = mailer.clone();
            Box::pin(async move {
                mailer.send_invitation(&data).await?;
                Ok(())
            })
        },
    )
}

fn two_factor_options(mailer: Arc<Mailer>) -> TwoFactorOptions {
    TwoFactorOptions::with_otp_sender(move |data: OtpCallbackData| -> BoxFuture<Result<()>> {
        let mailer = mailer.clone();
        Box::pin(async move {
            mailer.send_two_factor_otp(&data.user, &data.otp).await?;
            Ok(())
        })
    })
}
