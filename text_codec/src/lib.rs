//! # Text Codec
//!
//! Base64 wire encoding for carrying arbitrary UTF-8 text over the
//! ASCII-only command channel.
//!
//! Decoding is lenient in the same places the host tooling is sloppy:
//! line wraps and other ASCII whitespace are ignored, and trailing padding
//! may be present or absent. Encoding always emits canonical padded output.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use std::string::FromUtf8Error;
use thiserror::Error;

const WIRE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Codec error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Malformed wire text: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Decoded payload is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
}

/// Decodes wire text into raw bytes
pub fn decode_bytes(wire: &str) -> Result<Vec<u8>, CodecError> {
    let compact: String = wire.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(WIRE_ENGINE.decode(compact)?)
}

/// Decodes wire text into a UTF-8 string
pub fn decode(wire: &str) -> Result<String, CodecError> {
    let bytes = decode_bytes(wire)?;
    Ok(String::from_utf8(bytes)?)
}

/// Encodes text into its wire form
pub fn encode(text: &str) -> String {
    WIRE_ENGINE.encode(text.as_bytes())
}
