// Path: crates/cli/src/commands/decode_extra.rs

use crate::util::{decode_hex, load_config};
use anyhow::{Context, Result};
use clap::Parser;
use dpos_consensus::extra::{decode_header_extra, extra_payload};
use dpos_types::app::HeaderExtra;
use dpos_types::config::DposConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct DecodeExtraArgs {
    /// The header extra-data as hex, vanity and seal included.
    pub extra: String,
    /// Number of the block the extra-data belongs to; selects the codec version.
    #[clap(long, default_value = "0")]
    pub number: u64,
    /// Engine configuration file (TOML). Defaults apply when omitted.
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// The input is the bare encoded accumulator, without vanity and seal.
    #[clap(long)]
    pub payload_only: bool,
}

/// Decodes header extra-data bytes for block `number`.
pub fn decode(
    config: &DposConfig,
    number: u64,
    bytes: &[u8],
    payload_only: bool,
) -> Result<HeaderExtra> {
    let payload = if payload_only {
        bytes
    } else {
        extra_payload(bytes)?
    };
    decode_header_extra(config, number, payload)
        .with_context(|| format!("failed to decode extra-data of block {number}"))
}

pub fn run(args: DecodeExtraArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let bytes = decode_hex(&args.extra)?;
    let extra = decode(&config, args.number, &bytes, args.payload_only)?;
    println!("{}", serde_json::to_string_pretty(&extra)?);
    Ok(())
}
