//! Variable-length unsigned integers
//!
//! Base-128 (7 bits per octet, high bit set on every octet but the last) is
//! used for long-form tag numbers and OID subidentifiers. Base-256 big-endian
//! is used for long-form lengths.

use crate::error::{Asn1Error, Asn1Result};

/// Decode a base-128 integer from the front of `bytes`
///
/// Returns the value and the number of octets consumed.
pub fn decode_base128(bytes: &[u8]) -> Asn1Result<(u64, usize)> {
    let mut value: u64 = 0;

    for (index, &octet) in bytes.iter().enumerate() {
        if value > u64::MAX >> 7 {
            return Err(Asn1Error::corrupted("base-128 integer overflows 64 bits"));
        }
        value = (value << 7) | u64::from(octet & 0x7f);

        if octet & 0x80 == 0 {
            return Ok((value, index + 1));
        }
    }

    Err(Asn1Error::corrupted(
        "base-128 integer has no terminating octet",
    ))
}

/// Encode `value` as minimal base-128
pub fn encode_base128(value: u64) -> Vec<u8> {
    let mut groups = vec![(value & 0x7f) as u8];
    let mut rest = value >> 7;

    while rest != 0 {
        groups.push((rest & 0x7f) as u8 | 0x80);
        rest >>= 7;
    }

    groups.reverse();
    groups
}

/// Decode a big-endian base-256 integer of at most eight octets
pub fn decode_base256(bytes: &[u8]) -> Asn1Result<u64> {
    if bytes.len() > 8 {
        return Err(Asn1Error::corrupted(format!(
            "base-256 integer of {} octets exceeds 64 bits",
            bytes.len()
        )));
    }

    Ok(bytes
        .iter()
        .fold(0u64, |acc, &octet| (acc << 8) | u64::from(octet)))
}

/// Encode `value` as minimal big-endian base-256 (at least one octet)
pub fn encode_base256(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let first = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len() - 1);
    bytes[first..].to_vec()
}
