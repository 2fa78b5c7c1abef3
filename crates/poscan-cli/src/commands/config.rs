//! Config command - manage configuration.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use poscan_core::models::config::PoscanConfig;

use super::load_config;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),
}

#[derive(Args)]
struct InitArgs {
    /// Where to write the configuration file
    #[arg(short, long, default_value = "poscan.json")]
    path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = load_config(config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Init(init) => {
            if init.path.exists() && !init.force {
                anyhow::bail!(
                    "Config file already exists: {} (use --force to overwrite)",
                    init.path.display()
                );
            }

            PoscanConfig::default().save(&init.path)?;
            println!(
                "{} Default configuration written to {}",
                style("✓").green(),
                init.path.display()
            );
        }
    }

    Ok(())
}
