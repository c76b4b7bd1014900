use clap::{Parser, Subcommand};
use colored::Colorize;

use auth_demo::plans::subscription_plans;
use auth_demo::{build_auth_options, init_auth};
use auth_demo_core::env::init_logger;
use auth_demo_core::{AuthEnv, MemoryEmailSender};
use auth_demo_email::{Mailer, MailerSettings};

/// Better Auth demo — inspect the auth service configuration
#[derive(Parser)]
#[command(name = "auth-demo", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the configuration, connect to MongoDB and list the plugins
    Check,

    /// Print the subscription plans
    Plans,

    /// Print the serializable part of the auth options as JSON
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let env = AuthEnv::from_env();
    init_logger(env.mode);

    let result = match cli.command {
        Commands::Check => check(&env).await,
        Commands::Plans => plans(),
        Commands::Config => config(&env),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red(), e);
        std::process::exit(1);
    }
}

async fn check(env: &AuthEnv) -> anyhow::Result<()> {
    let auth = init_auth(env).await?;
    auth.database.ping().await?;
    println!(
        "{} MongoDB reachable ({})",
        "✓".green(),
        auth.database.database().name()
    );

    println!("{}", "Plugins".bold());
    for id in auth.options.plugin_ids() {
        println!("  {} {}", "•".dimmed(), id);
    }
    println!("{} {} endpoints", "✓".green(), auth.options.endpoints().len());
    Ok(())
}

fn plans() -> anyhow::Result<()> {
    for plan in subscription_plans() {
        println!("{}", plan.name.bold());
        println!("  monthly: {}", plan.price_id.as_deref().unwrap_or("-"));
        println!("  annual:  {}", plan.annual_discount_price_id.as_deref().unwrap_or("-"));
        if let Some(days) = plan.trial_days() {
            println!("  trial:   {days} days");
        }
    }
    Ok(())
}

/// Options only; the mailer is never invoked, so no transport is needed.
fn config(env: &AuthEnv) -> anyhow::Result<()> {
    let mailer = Mailer::new(
        std::sync::Arc::new(MemoryEmailSender::new()),
        MailerSettings::from_env(env),
    );
    let options = build_auth_options(env, std::sync::Arc::new(mailer));
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}
