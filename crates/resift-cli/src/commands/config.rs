//! Config command - inspect or write the pipeline configuration.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use resift_core::ScanConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the active configuration as JSON
    Show,

    /// Write the default configuration to a file
    Init {
        /// Destination path
        path: PathBuf,
    },
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = if let Some(path) = config_path {
                ScanConfig::from_file(std::path::Path::new(path))?
            } else {
                ScanConfig::default()
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Init { path } => {
            ScanConfig::default().save(&path)?;
            println!(
                "{} Default configuration written to {}",
                style("✓").green(),
                path.display()
            );
        }
    }

    Ok(())
}
