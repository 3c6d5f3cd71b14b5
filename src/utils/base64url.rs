//! Base64URL encoding/decoding per RFC 4648
//!
//! Encoding always emits the unpadded URL-safe alphabet. Decoding is lenient
//! about padding: the input is mapped onto the standard alphabet, padded to a
//! multiple of four and then decoded strictly.

use crate::error::{Error, Result};
use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};

/// Encode bytes as unpadded Base64URL
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Encode a UTF-8 string as unpadded Base64URL
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Decode Base64URL to bytes, accepting both padded and unpadded input
pub fn decode_bytes(input: &str) -> Result<Vec<u8>> {
    let mut normalized: String = input
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let remainder = normalized.len() % 4;
    if remainder != 0 {
        normalized.extend(std::iter::repeat_n('=', 4 - remainder));
    }

    STANDARD
        .decode(normalized.as_bytes())
        .map_err(|e| Error::InvalidBase64UrlEncoding(format!("Base64URL decode failed: {e}")))
}

/// Decode Base64URL to bytes, rejecting output larger than `max_size`
pub(crate) fn decode_bytes_limited(input: &str, max_size: usize) -> Result<Vec<u8>> {
    // Every 4 input characters decode to at most 3 bytes
    if input.len() / 4 * 3 > max_size + 3 {
        return Err(Error::InvalidBase64UrlEncoding(format!(
            "Encoded segment too large: {} characters (max decoded: {} bytes)",
            input.len(),
            max_size
        )));
    }

    let result = decode_bytes(input)?;
    if result.len() > max_size {
        return Err(Error::InvalidBase64UrlEncoding(format!(
            "Decoded size exceeds limit: {} bytes (max: {})",
            result.len(),
            max_size
        )));
    }

    Ok(result)
}
