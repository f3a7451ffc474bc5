//! Elliptic++ Dataset Audit - label consistency, correlations and EDA
//!
//! Three batch analyses over the Elliptic++ tables, each a linear
//! load -> merge -> aggregate -> report run. No service, no concurrency.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

// Use the library crate
use elliptic_audit::cli::commands;
use elliptic_audit::config::Config;

/// Elliptic++ dataset audit tool
#[derive(Parser)]
#[command(name = "elliptic-audit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check ground-truth illicit addresses against the labeled wallet table
    Matches,

    /// Report feature-feature and feature-label Pearson correlations
    Correlations,

    /// Profile the five raw dataset tables
    Eda,

    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("elliptic_audit=info".parse().unwrap()),
        )
        .with_target(true)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Matches => commands::matches(&config),
        Commands::Correlations => commands::correlations(&config),
        Commands::Eda => commands::eda(&config),
        Commands::Config => commands::show_config(&config),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
