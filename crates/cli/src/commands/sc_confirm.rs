// Path: crates/cli/src/commands/sc_confirm.rs

use anyhow::{anyhow, Result};
use clap::Parser;
use dpos_consensus::custom_tx::build_sc_event_confirm_data;
use dpos_types::app::parse_hash;

#[derive(Parser, Debug)]
pub struct ScConfirmArgs {
    /// Side-chain hash, `0x`-prefixed.
    #[clap(long)]
    pub sc_hash: String,
    /// Side-chain block number being confirmed.
    #[clap(long)]
    pub number: u64,
    /// Side-chain block timestamp.
    #[clap(long)]
    pub time: u64,
    /// `#`-separated loop information.
    #[clap(long)]
    pub loop_info: String,
    /// `#`-separated charging information.
    #[clap(long, default_value = "")]
    pub charging_info: String,
}

pub fn payload(args: &ScConfirmArgs) -> Result<String> {
    let sc_hash = parse_hash(&args.sc_hash)
        .ok_or_else(|| anyhow!("invalid side-chain hash {:?}", args.sc_hash))?;
    Ok(build_sc_event_confirm_data(
        &sc_hash,
        args.number,
        args.time,
        &args.loop_info,
        &args.charging_info,
    ))
}

pub fn run(args: ScConfirmArgs) -> Result<()> {
    println!("{}", payload(&args)?);
    Ok(())
}
