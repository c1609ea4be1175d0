// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # DPoS CLI
//!
//! Inspection tools for custom-transaction payloads, header extra-data and
//! engine configuration.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dpos_cli::commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "dpos",
    version,
    about = "Inspect DPoS custom transactions and header extra-data.",
    long_about = "Classifies transaction payloads, decodes header extra-data, builds side-chain confirmation payloads and validates engine configuration."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a transaction payload and print the recognized command.
    Parse(parse::ParseArgs),

    /// Decode a header's extra-data into its accumulator.
    DecodeExtra(decode_extra::DecodeExtraArgs),

    /// Build the payload of a side-chain confirmation transaction.
    ScConfirm(sc_confirm::ScConfirmArgs),

    /// Generate and validate engine configurations.
    Config(config::ConfigCmdArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    match cli.command {
        Commands::Parse(args) => parse::run(args),
        Commands::DecodeExtra(args) => decode_extra::run(args),
        Commands::ScConfirm(args) => sc_confirm::run(args),
        Commands::Config(args) => config::run(args),
    }
}
