//! Self-contained BER/DER codec
//!
//! Values are decoded into a tree of [`Node`]s: primitives carry their raw
//! content octets, constructs own their decoded children. Nothing beyond the
//! universal tag table is interpreted during decoding; typed accessors such as
//! [`Node::decode_i64`] and [`Node::object_identifier`] are applied on demand.
//!
//! ```
//! use jwtforge::asn1::{self, Node, UniversalTag};
//!
//! let bytes = asn1::encode(&Node::construct(
//!     UniversalTag::Sequence,
//!     vec![Node::primitive(UniversalTag::Integer, vec![0x2a])],
//! ));
//! assert_eq!(bytes, [0x30, 0x03, 0x02, 0x01, 0x2a]);
//!
//! let node = asn1::decode(&bytes).unwrap();
//! assert_eq!(node.get(0).unwrap().decode_i64().unwrap(), 42);
//! ```

mod codec;
pub mod oid;
mod tag;
pub mod varint;

pub use codec::{decode, encode};
pub use oid::ObjectIdentifier;
pub use tag::{TagClass, UniversalTag};

use crate::error::{Asn1Error, Asn1Result};
use std::fmt;

/// A decoded ASN.1 value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// Primitive encoding with its content octets
    Primitive {
        tag_number: u64,
        tag_class: TagClass,
        content: Vec<u8>,
    },
    /// Constructed encoding with its children in order
    Construct {
        tag_number: u64,
        tag_class: TagClass,
        children: Vec<Node>,
    },
}

impl Node {
    /// Universal primitive with the given content
    pub fn primitive(tag: UniversalTag, content: Vec<u8>) -> Self {
        Node::Primitive {
            tag_number: tag.number(),
            tag_class: TagClass::Universal,
            content,
        }
    }

    /// Universal construct with the given children
    pub fn construct(tag: UniversalTag, children: Vec<Node>) -> Self {
        Node::Construct {
            tag_number: tag.number(),
            tag_class: TagClass::Universal,
            children,
        }
    }

    /// OBJECT IDENTIFIER primitive
    pub fn oid(oid: &ObjectIdentifier) -> Self {
        Node::primitive(UniversalTag::ObjectIdentifier, oid.to_content())
    }

    /// End-of-content marker terminating indefinite-length constructs
    pub fn end_of_content() -> Self {
        Node::primitive(UniversalTag::EndOfContent, Vec::new())
    }

    pub fn tag_number(&self) -> u64 {
        match self {
            Node::Primitive { tag_number, .. } | Node::Construct { tag_number, .. } => *tag_number,
        }
    }

    pub fn tag_class(&self) -> TagClass {
        match self {
            Node::Primitive { tag_class, .. } | Node::Construct { tag_class, .. } => *tag_class,
        }
    }

    pub fn is_constructed(&self) -> bool {
        matches!(self, Node::Construct { .. })
    }

    /// Semantic type, only defined for the universal class
    pub fn universal_tag(&self) -> Option<UniversalTag> {
        match self.tag_class() {
            TagClass::Universal => UniversalTag::from_number(self.tag_number()),
            _ => None,
        }
    }

    pub fn is_end_of_content(&self) -> bool {
        self.tag_class() == TagClass::Universal && self.tag_number() == 0
    }

    /// Content octets of a primitive
    pub fn content(&self) -> Option<&[u8]> {
        match self {
            Node::Primitive { content, .. } => Some(content),
            Node::Construct { .. } => None,
        }
    }

    /// Children of a construct; empty for primitives
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Construct { children, .. } => children,
            Node::Primitive { .. } => &[],
        }
    }

    /// Immediate child at `index`
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.children().get(index)
    }

    /// Immediate child at `index`, failing with `ValueNotFound`
    pub fn child(&self, index: usize) -> Asn1Result<&Node> {
        self.get(index).ok_or_else(|| {
            Asn1Error::not_found(format!(
                "child {index} of {} with {} children",
                self.describe(),
                self.children().len()
            ))
        })
    }

    /// First immediate child whose own first child is the given OID
    ///
    /// Matches the `SEQUENCE { OBJECT IDENTIFIER, ... }` shape shared by
    /// AlgorithmIdentifier, PKCS#7 ContentInfo and PKCS#9 attributes.
    pub fn child_by_oid(&self, oid: &ObjectIdentifier) -> Option<&Node> {
        self.children().iter().find(|child| {
            child
                .get(0)
                .and_then(Node::object_identifier)
                .is_some_and(|found| &found == oid)
        })
    }

    /// The identifier carried by a universal OBJECT IDENTIFIER primitive
    pub fn object_identifier(&self) -> Option<ObjectIdentifier> {
        match (self.universal_tag(), self) {
            (Some(UniversalTag::ObjectIdentifier), Node::Primitive { content, .. }) => {
                ObjectIdentifier::from_content(content).ok()
            }
            _ => None,
        }
    }

    /// Interpret a universal INTEGER as a signed 64-bit value
    pub fn decode_i64(&self) -> Asn1Result<i64> {
        let content = match (self.universal_tag(), self) {
            (Some(UniversalTag::Integer), Node::Primitive { content, .. }) => content,
            _ => {
                return Err(Asn1Error::mismatch(format!(
                    "expected INTEGER, found {}",
                    self.describe()
                )));
            }
        };

        if content.len() > 8 {
            return Err(Asn1Error::mismatch(format!(
                "INTEGER of {} octets does not fit i64",
                content.len()
            )));
        }

        let Some(&first) = content.first() else {
            return Ok(0);
        };
        let fill = if first & 0x80 != 0 { 0xff } else { 0x00 };
        let mut bytes = [fill; 8];
        bytes[8 - content.len()..].copy_from_slice(content);
        Ok(i64::from_be_bytes(bytes))
    }

    /// Interpret a UTF8String or IA5String as text
    pub fn decode_string(&self) -> Asn1Result<String> {
        match (self.universal_tag(), self) {
            (Some(UniversalTag::Utf8String), Node::Primitive { content, .. }) => {
                String::from_utf8(content.clone())
                    .map_err(|e| Asn1Error::corrupted(format!("invalid UTF8String: {e}")))
            }
            (Some(UniversalTag::Ia5String), Node::Primitive { content, .. }) => {
                if content.is_ascii() {
                    Ok(content.iter().map(|&b| char::from(b)).collect())
                } else {
                    Err(Asn1Error::corrupted("IA5String contains non-ASCII octets"))
                }
            }
            _ => Err(Asn1Error::mismatch(format!(
                "expected UTF8String or IA5String, found {}",
                self.describe()
            ))),
        }
    }

    fn describe(&self) -> String {
        match (self.universal_tag(), self.tag_class()) {
            (Some(tag), _) => tag.name().to_string(),
            (None, TagClass::Universal) => format!("[UNIVERSAL {}]", self.tag_number()),
            (None, TagClass::Application) => format!("[APPLICATION {}]", self.tag_number()),
            (None, TagClass::ContextSpecific) => format!("[{}]", self.tag_number()),
            (None, TagClass::Private) => format!("[PRIVATE {}]", self.tag_number()),
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.describe(), indent = indent * 2)?;

        match self {
            Node::Construct { children, .. } => {
                writeln!(f)?;
                for child in children {
                    child.write_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Node::Primitive { content, .. } => {
                if let Some(oid) = self.object_identifier() {
                    writeln!(f, " {oid}")
                } else if let Ok(text) = self.decode_string() {
                    writeln!(f, " {text:?}")
                } else if content.is_empty() {
                    writeln!(f)
                } else {
                    write!(f, " (")?;
                    for byte in content.iter().take(16) {
                        write!(f, "{byte:02x}")?;
                    }
                    if content.len() > 16 {
                        write!(f, "..")?;
                    }
                    writeln!(f, ", {} bytes)", content.len())
                }
            }
        }
    }
}

/// Indented tree dump, one node per line
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}
