//! BER decoding and DER-style encoding of [`Node`] trees

use super::Node;
use super::tag::TagClass;
use super::varint::{decode_base128, decode_base256, encode_base128, encode_base256};
use crate::error::{Asn1Error, Asn1Result};
use crate::limits::MAX_ASN1_DEPTH;

/// Identifier octet bit marking constructed encoding
const CONSTRUCTED: u8 = 0x20;

/// Low-bits value announcing a long-form tag number
const LONG_FORM_TAG: u8 = 0x1f;

/// Length octet announcing an indefinite-length construct
const INDEFINITE_LENGTH: u8 = 0x80;

/// Decode the first value in `bytes`
///
/// Bytes following the first complete value are ignored.
pub fn decode(bytes: &[u8]) -> Asn1Result<Node> {
    decode_node(bytes, 0).map(|(node, _)| node)
}

/// Decode one node and report how many octets it spans
pub(crate) fn decode_node(input: &[u8], depth: usize) -> Asn1Result<(Node, usize)> {
    if depth > MAX_ASN1_DEPTH {
        return Err(Asn1Error::corrupted(format!(
            "nesting deeper than {MAX_ASN1_DEPTH} levels"
        )));
    }

    let identifier = *input
        .first()
        .ok_or_else(|| Asn1Error::corrupted("missing identifier octet"))?;
    let tag_class = TagClass::from_identifier(identifier);
    let constructed = identifier & CONSTRUCTED != 0;

    let mut offset = 1;
    let mut tag_number = u64::from(identifier & LONG_FORM_TAG);
    if tag_number == u64::from(LONG_FORM_TAG) {
        let (number, consumed) = decode_base128(&input[offset..])?;
        tag_number = number;
        offset += consumed;
    }

    let (length, consumed) = decode_length(&input[offset..])?;
    offset += consumed;

    if !constructed {
        let length = length.ok_or_else(|| {
            Asn1Error::corrupted("primitive value uses indefinite length")
        })?;
        let content = slice_content(input, offset, length)?;
        let node = Node::Primitive {
            tag_number,
            tag_class,
            content: content.to_vec(),
        };
        return Ok((node, offset + length));
    }

    let mut children = Vec::new();
    match length {
        Some(length) => {
            let content = slice_content(input, offset, length)?;
            let mut position = 0;
            while position < content.len() {
                let (child, used) = decode_node(&content[position..], depth + 1)?;
                children.push(child);
                position += used;
            }
            offset += length;
        }
        None => loop {
            if offset >= input.len() {
                return Err(Asn1Error::corrupted(
                    "indefinite-length construct is missing end-of-content",
                ));
            }
            let (child, used) = decode_node(&input[offset..], depth + 1)?;
            offset += used;
            let finished = child.is_end_of_content();
            children.push(child);
            if finished {
                break;
            }
        },
    }

    let node = Node::Construct {
        tag_number,
        tag_class,
        children,
    };
    Ok((node, offset))
}

/// Decode length octets; `None` means indefinite
fn decode_length(input: &[u8]) -> Asn1Result<(Option<usize>, usize)> {
    let first = *input
        .first()
        .ok_or_else(|| Asn1Error::corrupted("missing length octet"))?;

    if first & 0x80 == 0 {
        return Ok((Some(usize::from(first)), 1));
    }

    let count = usize::from(first & 0x7f);
    match count {
        0 => Ok((None, 1)),
        127 => Err(Asn1Error::corrupted("reserved length octet 0xff")),
        _ => {
            let octets = input
                .get(1..1 + count)
                .ok_or_else(|| Asn1Error::corrupted("length octets truncated"))?;
            let value = decode_base256(octets)?;
            let length = usize::try_from(value)
                .map_err(|_| Asn1Error::corrupted(format!("length {value} exceeds usize")))?;
            Ok((Some(length), 1 + count))
        }
    }
}

fn slice_content(input: &[u8], offset: usize, length: usize) -> Asn1Result<&[u8]> {
    offset
        .checked_add(length)
        .and_then(|end| input.get(offset..end))
        .ok_or_else(|| {
            Asn1Error::corrupted(format!(
                "content truncated: need {length} octets, have {}",
                input.len().saturating_sub(offset)
            ))
        })
}

/// Encode `node` and its descendants
///
/// Lengths use the short form up to 127 octets and the minimal long form
/// beyond. A construct whose last child is end-of-content is written with
/// indefinite length.
pub fn encode(node: &Node) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(node, &mut out);
    out
}

fn encode_into(node: &Node, out: &mut Vec<u8>) {
    let (tag_number, tag_class, constructed) = match node {
        Node::Primitive {
            tag_number,
            tag_class,
            ..
        } => (*tag_number, *tag_class, false),
        Node::Construct {
            tag_number,
            tag_class,
            ..
        } => (*tag_number, *tag_class, true),
    };

    let mut identifier = tag_class.identifier_bits();
    if constructed {
        identifier |= CONSTRUCTED;
    }
    if tag_number < u64::from(LONG_FORM_TAG) {
        out.push(identifier | tag_number as u8);
    } else {
        out.push(identifier | LONG_FORM_TAG);
        out.extend(encode_base128(tag_number));
    }

    match node {
        Node::Primitive { content, .. } => {
            encode_length(content.len(), out);
            out.extend_from_slice(content);
        }
        Node::Construct { children, .. } => {
            let mut content = Vec::new();
            for child in children {
                encode_into(child, &mut content);
            }

            if children.last().is_some_and(Node::is_end_of_content) {
                out.push(INDEFINITE_LENGTH);
            } else {
                encode_length(content.len(), out);
            }
            out.extend(content);
        }
    }
}

fn encode_length(length: usize, out: &mut Vec<u8>) {
    if length <= 127 {
        out.push(length as u8);
    } else {
        let octets = encode_base256(length as u64);
        out.push(0x80 | octets.len() as u8);
        out.extend(octets);
    }
}
