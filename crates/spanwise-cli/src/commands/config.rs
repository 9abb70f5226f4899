//! `spanwise config`: inspect and edit the config file

use std::path::Path;

use clap::{Args, Subcommand};

use crate::config::Config;
use crate::output::table;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print one value
    Get {
        /// One of: seed, output_dir, format, source, graphs, algorithms
        key: String,
    },
    /// Change one value and save the file
    Set {
        key: String,
        /// Lists are comma separated; empty clears seed and source
        value: String,
    },
    /// Print every key with its current value
    List,
    /// Print where the config file lives
    Path,
    /// Write a config file holding the defaults
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs, path: &Path) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Get { key } => {
            let config = Config::load(path)?;
            if !Config::keys().contains(&key.as_str()) {
                anyhow::bail!(
                    "Unknown config key: {} (expected one of {})",
                    key,
                    Config::keys().join(", ")
                );
            }
            println!("{}", config.get(key).unwrap_or_default());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(path)?;
            config.set(key, value)?;
            config.save(path)?;
            tracing::info!("Updated {} in {:?}", key, path);
            println!("{} = {}", key, config.get(key).unwrap_or_default());
        }
        ConfigCommands::List => {
            let config = Config::load(path)?;
            let rows: Vec<Vec<String>> = Config::keys()
                .iter()
                .map(|key| {
                    let value = config.get(key).unwrap_or_else(|| "-".to_string());
                    vec![key.to_string(), value]
                })
                .collect();
            print!("{}", table(&["KEY", "VALUE"], &rows));
        }
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists; pass --force to replace it", path.display());
            }
            Config::default().save(path)?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}
