//! CD-Admin: Cohort Discovery admin tool

use std::path::PathBuf;

use anyhow::{Context, Result};
use cd_admin::{bins_report, load_config, overview_json, validate_report, AccessLevel};
use clap::{Parser, Subcommand};
use cohort_telemetry::{init_telemetry, TelemetryConfig};
use tracing::info;

/// CD-Admin: Cohort Discovery admin tool
#[derive(Parser, Debug)]
#[command(name = "cd-admin")]
#[command(about = "Check discovery configuration and preview public overviews")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a discovery document
    Validate {
        /// Discovery document
        #[arg(short, long, env = "CD_DISCOVERY_CONFIG", default_value = "config.json")]
        config: PathBuf,
    },

    /// Print the bins a number or date field produces
    Bins {
        #[arg(short, long, env = "CD_DISCOVERY_CONFIG", default_value = "config.json")]
        config: PathBuf,

        /// Field id
        #[arg(short, long)]
        field: String,
    },

    /// Run the public overview against a JSON record fixture
    Overview {
        #[arg(short, long, env = "CD_DISCOVERY_CONFIG", default_value = "config.json")]
        config: PathBuf,

        /// Records keyed by collection (`individual`, `biosample`, `experiment`)
        #[arg(short, long)]
        records: PathBuf,

        /// Grant full data access instead of counts only
        #[arg(long)]
        full_access: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _telemetry = init_telemetry(TelemetryConfig::for_service("cd-admin"))?;

    match args.command {
        Command::Validate { config } => {
            info!(config = %config.display(), "Validating discovery configuration");
            let registry = load_config(&config)?;
            print!("{}", validate_report(&registry)?);
        }
        Command::Bins { config, field } => {
            info!(config = %config.display(), field = %field, "Printing bin layout");
            let registry = load_config(&config)?;
            print!("{}", bins_report(&registry, &field)?);
        }
        Command::Overview {
            config,
            records,
            full_access,
        } => {
            info!(
                config = %config.display(),
                records = %records.display(),
                full_access,
                "Running public overview"
            );
            let registry = load_config(&config)?;
            let json = std::fs::read_to_string(&records)
                .with_context(|| format!("failed to read {}", records.display()))?;
            let records = serde_json::from_str(&json).context("record fixture is not JSON")?;
            let access = if full_access {
                AccessLevel::Full
            } else {
                AccessLevel::Counts
            };

            let overview = overview_json(registry, records, access).await?;
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
    }

    Ok(())
}
