//! MacroMate command-line front end
//!
//! Runs the shared nutrition pipeline on saved onboarding drafts and on
//! one-off inputs, for scripting and manual checks.

use anyhow::Result;
use clap::Parser;
use macromate_cli::{
    commands::{self, Cli},
    config,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::AppConfig::load()?;
    init_tracing(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = %config::AppConfig::environment(),
        "Starting MacroMate CLI"
    );

    match commands::run(cli, &config) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "command failed");
            for detail in err.details() {
                eprintln!("  - {}", detail);
            }
            Err(err.into())
        }
    }
}

/// Initialize tracing/logging
///
/// Logs go to stderr so command output on stdout stays pipeable.
fn init_tracing(config: &config::AppConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_filter().into());

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config.json_logs() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
