//! Thermowatch CLI
//!
//! A command-line client for the anomaly classification service:
//! submit temperature readings for classification and inspect service
//! status.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{predict, status};

/// Thermowatch CLI
#[derive(Parser)]
#[command(name = "tw")]
#[command(author, version, about = "CLI for the Thermowatch anomaly classification service", long_about = None)]
pub struct Cli {
    /// Service endpoint URL (can also be set via TW_API_URL env var)
    #[arg(long, env = "TW_API_URL")]
    pub api_url: Option<String>,

    /// Output format (defaults to the config file setting, then table)
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a batch of temperature readings
    Predict {
        /// Temperature readings in degrees Celsius
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        readings: Vec<f64>,
    },

    /// Show service readiness, health, and active configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Flags win over the config file, which wins over built-in defaults
    let file_config = config::Config::load().unwrap_or_default();
    let api_url = cli
        .api_url
        .or(file_config.api_url)
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    let format = cli
        .format
        .or_else(|| {
            file_config
                .default_format
                .as_deref()
                .and_then(output::OutputFormat::from_name)
        })
        .unwrap_or_default();

    let client = client::ApiClient::new(&api_url)?;

    match cli.command {
        Commands::Predict { readings } => {
            predict::run(&client, &readings, format).await?;
        }
        Commands::Status => {
            status::run(&client, format).await?;
        }
    }

    Ok(())
}
