// Path: crates/consensus/src/extra.rs

//! Versioned codec for `HeaderExtra` and the header extra-data framing.
//!
//! A header's extra-data is `vanity (32) | payload | seal (65)`. The payload is
//! the encoded `HeaderExtra`; its layout is chosen per block through
//! [`DposConfig::extra_codec_version`] so historical blocks keep decoding after a
//! layout change.

use dpos_types::app::{Header, HeaderExtra};
use dpos_types::codec;
use dpos_types::config::{DposConfig, ExtraCodecVersion};
use dpos_types::error::CodecError;

/// Bytes reserved at the front of extra-data for signer vanity.
pub const EXTRA_VANITY: usize = 32;
/// Bytes reserved at the end of extra-data for the signer's seal.
pub const EXTRA_SEAL: usize = 65;

/// Encodes `extra` with the codec selected for block `number`.
pub fn encode_header_extra(
    config: &DposConfig,
    number: u64,
    extra: &HeaderExtra,
) -> Result<Vec<u8>, CodecError> {
    match config.extra_codec_version(number) {
        ExtraCodecVersion::V1 => codec::to_bytes_canonical(extra).map_err(CodecError::Encode),
    }
}

/// Decodes a `HeaderExtra` payload with the codec selected for block `number`.
pub fn decode_header_extra(
    config: &DposConfig,
    number: u64,
    bytes: &[u8],
) -> Result<HeaderExtra, CodecError> {
    match config.extra_codec_version(number) {
        ExtraCodecVersion::V1 => codec::from_bytes_canonical(bytes).map_err(CodecError::Decode),
    }
}

/// Returns the payload region between vanity and seal.
pub fn extra_payload(extra_data: &[u8]) -> Result<&[u8], CodecError> {
    let min = EXTRA_VANITY + EXTRA_SEAL;
    let too_short = CodecError::ExtraTooShort {
        len: extra_data.len(),
        min,
    };
    if extra_data.len() < min {
        return Err(too_short);
    }
    extra_data
        .get(EXTRA_VANITY..extra_data.len() - EXTRA_SEAL)
        .ok_or(too_short)
}

/// Frames `payload` between a vanity and a seal. Vanity and seal are truncated
/// or zero-padded to their fixed widths.
pub fn assemble_extra_data(vanity: &[u8], payload: &[u8], seal: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(EXTRA_VANITY + payload.len() + EXTRA_SEAL);
    out.extend(fixed_width(vanity, EXTRA_VANITY));
    out.extend_from_slice(payload);
    out.extend(fixed_width(seal, EXTRA_SEAL));
    out
}

fn fixed_width(bytes: &[u8], width: usize) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .copied()
        .chain(std::iter::repeat(0))
        .take(width)
}

/// Decodes the `HeaderExtra` recorded in `header`.
pub fn decode_from_header(config: &DposConfig, header: &Header) -> Result<HeaderExtra, CodecError> {
    let payload = extra_payload(&header.extra)?;
    decode_header_extra(config, header.number, payload)
}

/// Encodes `extra` and frames it with an empty vanity and seal.
pub fn build_extra_data(
    config: &DposConfig,
    number: u64,
    extra: &HeaderExtra,
) -> Result<Vec<u8>, CodecError> {
    let payload = encode_header_extra(config, number, extra)?;
    Ok(assemble_extra_data(&[], &payload, &[]))
}
