// Path: crates/cli/src/commands/parse.rs

use crate::util::decode_hex;
use anyhow::Result;
use clap::Parser;
use dpos_consensus::custom_tx::classify;

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// The transaction payload, as text or (with --hex) as hex bytes.
    pub payload: String,
    /// Treat the payload as hex-encoded bytes.
    #[clap(long)]
    pub hex: bool,
}

/// Renders the classification of `payload` as pretty JSON, or `None` for a
/// plain transfer.
pub fn describe(payload: &[u8]) -> Result<Option<String>> {
    match classify(payload) {
        Some(command) => {
            log::debug!("Classified payload as {}", command.name());
            Ok(Some(serde_json::to_string_pretty(&command)?))
        }
        None => Ok(None),
    }
}

pub fn run(args: ParseArgs) -> Result<()> {
    let bytes = if args.hex {
        decode_hex(&args.payload)?
    } else {
        args.payload.into_bytes()
    };
    match describe(&bytes)? {
        Some(json) => println!("{json}"),
        None => println!("Not a custom transaction; processed as a plain transfer."),
    }
    Ok(())
}
