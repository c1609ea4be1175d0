// Path: crates/cli/src/commands/mod.rs

pub mod config;
pub mod decode_extra;
pub mod parse;
pub mod sc_confirm;
