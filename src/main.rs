//! CDC database setup - application entry point
//!
//! CLI-based entry point that dispatches to the run and status commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cdc_db_setup::{
    cli::{Cli, Commands},
    commands,
    config::Config,
};

#[tokio::main]
async fn main() {
    // Load .env before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    let result = match Config::from_args(cli.connection) {
        Ok(config) => {
            tracing::debug!(?config, "Configuration loaded");
            match cli.command.unwrap_or(Commands::Run) {
                Commands::Run => commands::run::execute(config).await,
                Commands::Status => commands::status::execute(config).await,
            }
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(code = e.code(), "Command failed: {}", e);
        commands::report_failure(&e);
        std::process::exit(1);
    }
}

/// `debug` when verbose, otherwise `RUST_LOG` or `info`
fn log_filter(verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        "debug".to_string()
    } else {
        rust_log.unwrap_or_else(|| "info".to_string())
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = log_filter(verbose, std::env::var("RUST_LOG").ok());

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(false, None), "info");
        assert_eq!(log_filter(false, Some("sqlx=debug".into())), "sqlx=debug");
        assert_eq!(log_filter(true, Some("warn".into())), "debug");
    }
}
