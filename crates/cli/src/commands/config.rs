// Path: crates/cli/src/commands/config.rs

use crate::util::load_config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use dpos_consensus::extra::build_extra_data;
use dpos_consensus::util::engine_from_config;
use dpos_types::config::DposConfig;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct ConfigCmdArgs {
    #[clap(subcommand)]
    pub command: ConfigSubCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubCommands {
    /// Write a dpos.toml holding the default engine configuration.
    New {
        #[clap(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the effective configuration, defaults filled in.
    Show {
        /// Path to the configuration file. Defaults apply when omitted.
        path: Option<PathBuf>,
    },
    /// Validate a configuration and print the genesis extra-data it implies.
    Check {
        /// Path to the configuration file.
        path: PathBuf,
    },
}

/// Hex-encoded genesis extra-data for `config`, after validating it.
pub fn genesis_extra_hex(config: &DposConfig) -> Result<String> {
    let engine = engine_from_config(config)?;
    let genesis = engine.genesis_header_extra();
    let bytes = build_extra_data(engine.config(), 0, &genesis)?;
    Ok(format!("0x{}", hex::encode(bytes)))
}

pub fn run(args: ConfigCmdArgs) -> Result<()> {
    match args.command {
        ConfigSubCommands::New { out_dir } => {
            fs::create_dir_all(&out_dir)?;
            let path = out_dir.join("dpos.toml");
            fs::write(&path, toml::to_string_pretty(&DposConfig::default())?)?;
            println!("Generated {}", path.display());
        }
        ConfigSubCommands::Show { path } => {
            let config = load_config(path.as_deref())?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigSubCommands::Check { path } => {
            let config = load_config(Some(&path))?;
            let extra = genesis_extra_hex(&config)?;
            println!("Configuration is valid.");
            println!("Genesis extra-data: {extra}");
        }
    }
    Ok(())
}
