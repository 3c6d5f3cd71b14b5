//! ECDSA signature shapes
//!
//! JWS carries ECDSA signatures as the fixed-width concatenation `r || s`,
//! each half as wide as the curve's field. Most signing APIs produce (and
//! most verifiers accept) the DER form `SEQUENCE { INTEGER r, INTEGER s }`.

use crate::asn1::{self, Node, UniversalTag};
use crate::error::{Asn1Error, Error, Result};

/// Convert a DER `SEQUENCE { r, s }` into fixed-width `r || s`
pub fn der_to_raw(der: &[u8], key_size_bytes: usize) -> Result<Vec<u8>> {
    let sequence = asn1::decode(der)?;
    if sequence.universal_tag() != Some(UniversalTag::Sequence) || !sequence.is_constructed() {
        return Err(Asn1Error::mismatch("ECDSA signature is not a SEQUENCE").into());
    }
    if sequence.children().len() > 2 {
        return Err(Asn1Error::mismatch(format!(
            "ECDSA signature has {} components, expected 2",
            sequence.children().len()
        ))
        .into());
    }

    let mut raw = Vec::with_capacity(key_size_bytes * 2);
    for index in 0..2 {
        let integer = integer_content(sequence.child(index)?)?;
        let magnitude = strip_leading_zeros(integer);

        if magnitude.len() > key_size_bytes {
            return Err(Error::InvalidSignaturePairSize {
                expected: key_size_bytes,
                found: magnitude.len(),
            });
        }

        raw.resize(raw.len() + key_size_bytes - magnitude.len(), 0);
        raw.extend_from_slice(magnitude);
    }

    Ok(raw)
}

/// Convert fixed-width `r || s` into a DER `SEQUENCE { r, s }`
///
/// A zero octet is prepended to a half whose top bit is set so it stays a
/// positive INTEGER; the halves are otherwise left untouched.
pub fn raw_to_der(raw: &[u8], key_size_bytes: usize) -> Result<Vec<u8>> {
    if raw.len() != key_size_bytes * 2 {
        return Err(Error::InvalidSignaturePairSize {
            expected: key_size_bytes * 2,
            found: raw.len(),
        });
    }

    let (r, s) = raw.split_at(key_size_bytes);
    let sequence = Node::construct(
        UniversalTag::Sequence,
        vec![positive_integer(r), positive_integer(s)],
    );

    Ok(asn1::encode(&sequence))
}

fn integer_content(node: &Node) -> Result<&[u8]> {
    match (node.universal_tag(), node.content()) {
        (Some(UniversalTag::Integer), Some(content)) => Ok(content),
        _ => Err(Asn1Error::mismatch("ECDSA signature component is not an INTEGER").into()),
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

fn positive_integer(half: &[u8]) -> Node {
    let mut content = Vec::with_capacity(half.len() + 1);
    if half.first().is_some_and(|&b| b & 0x80 != 0) {
        content.push(0x00);
    }
    content.extend_from_slice(half);
    Node::primitive(UniversalTag::Integer, content)
}
