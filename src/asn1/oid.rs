//! Object identifiers
//!
//! Content octets hold the first two arcs folded into one subidentifier
//! (`40 * a + b`) followed by the remaining arcs, each base-128 encoded.

use super::varint::{decode_base128, encode_base128};
use crate::error::{Asn1Error, Asn1Result};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// An ASN.1 OBJECT IDENTIFIER value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    components: Cow<'static, [u64]>,
}

impl ObjectIdentifier {
    /// Create an identifier from its arcs
    ///
    /// At least two arcs are required, the first must be 0, 1 or 2, and the
    /// second must be below 40 unless the first is 2.
    pub fn new(components: impl Into<Vec<u64>>) -> Asn1Result<Self> {
        let components = components.into();
        validate(&components)?;
        Ok(Self {
            components: Cow::Owned(components),
        })
    }

    const fn from_static(components: &'static [u64]) -> Self {
        Self {
            components: Cow::Borrowed(components),
        }
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Decode from the content octets of an OBJECT IDENTIFIER primitive
    pub fn from_content(content: &[u8]) -> Asn1Result<Self> {
        if content.is_empty() {
            return Err(Asn1Error::corrupted("object identifier has no content"));
        }

        let (first, mut offset) = decode_base128(content)?;
        let mut components = if first < 80 {
            vec![first / 40, first % 40]
        } else {
            vec![2, first - 80]
        };

        while offset < content.len() {
            let (arc, consumed) = decode_base128(&content[offset..])?;
            components.push(arc);
            offset += consumed;
        }

        Ok(Self {
            components: Cow::Owned(components),
        })
    }

    /// Encode into content octets
    pub fn to_content(&self) -> Vec<u8> {
        let (first, second) = match *self.components {
            [first, second, ..] => (first, second),
            [first] => (first, 0),
            [] => (0, 0),
        };

        let mut content = encode_base128(first * 40 + second);
        for &arc in self.components.iter().skip(2) {
            content.extend(encode_base128(arc));
        }
        content
    }
}

fn validate(components: &[u64]) -> Asn1Result<()> {
    match *components {
        [first, second, ..] => {
            let valid = match first {
                0 | 1 => second < 40,
                2 => second <= u64::MAX - 80,
                _ => false,
            };
            if valid {
                Ok(())
            } else {
                Err(Asn1Error::corrupted(format!(
                    "object identifier arcs {first}.{second} cannot be encoded"
                )))
            }
        }
        _ => Err(Asn1Error::corrupted(
            "object identifier needs at least two arcs",
        )),
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, arc) in self.components.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
        }
        Ok(())
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Asn1Error;

    fn from_str(s: &str) -> Asn1Result<Self> {
        let components = s
            .split('.')
            .map(|arc| {
                arc.parse::<u64>()
                    .map_err(|_| Asn1Error::corrupted(format!("invalid object identifier '{s}'")))
            })
            .collect::<Asn1Result<Vec<u64>>>()?;
        Self::new(components)
    }
}

// ============================================================================
// Well-known identifiers
// ============================================================================

/// PKCS#7 data content type
pub const PKCS7_DATA: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 7, 1]);
pub const PKCS7_SIGNED_DATA: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 7, 2]);
pub const PKCS7_ENVELOPED_DATA: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 7, 3]);
pub const PKCS7_SIGNED_AND_ENVELOPED_DATA: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 7, 4]);
pub const PKCS7_DIGESTED_DATA: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 7, 5]);
pub const PKCS7_ENCRYPTED_DATA: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 7, 6]);

/// PKCS#9 contentType attribute
pub const PKCS9_CONTENT_TYPE: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 9, 3]);
pub const PKCS9_MESSAGE_DIGEST: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 9, 4]);
pub const PKCS9_SIGNING_TIME: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 9, 5]);

/// rsaEncryption (PKCS#1)
pub const RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 1, 1]);

/// id-ecPublicKey (RFC 5480)
pub const EC_PUBLIC_KEY: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 10045, 2, 1]);

/// NIST P-256
pub const PRIME256V1: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 10045, 3, 1, 7]);
/// NIST P-384
pub const SECP384R1: ObjectIdentifier = ObjectIdentifier::from_static(&[1, 3, 132, 0, 34]);
/// NIST P-521
pub const SECP521R1: ObjectIdentifier = ObjectIdentifier::from_static(&[1, 3, 132, 0, 35]);

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_rsa_encryption_content() {
        let content = hex!("2a864886f70d010101");
        assert_eq!(RSA_ENCRYPTION.to_content(), content);
        assert_eq!(
            ObjectIdentifier::from_content(&content).unwrap(),
            RSA_ENCRYPTION
        );
    }

    #[test]
    fn test_curve_content() {
        assert_eq!(SECP384R1.to_content(), hex!("2b81040022"));
        assert_eq!(PRIME256V1.to_content(), hex!("2a8648ce3d030107"));
    }

    #[test]
    fn test_dotted_form() {
        assert_eq!(PKCS7_SIGNED_DATA.to_string(), "1.2.840.113549.1.7.2");
        let parsed: ObjectIdentifier = "1.2.840.113549.1.9.5".parse().unwrap();
        assert_eq!(parsed, PKCS9_SIGNING_TIME);

        assert!("1.2.x".parse::<ObjectIdentifier>().is_err());
        assert!("1".parse::<ObjectIdentifier>().is_err());
        assert!("3.1".parse::<ObjectIdentifier>().is_err());
        assert!("1.40".parse::<ObjectIdentifier>().is_err());
    }

    #[test]
    fn test_joint_iso_itu_arc() {
        // 2.999.3 folds into a multi-octet first subidentifier
        let oid = ObjectIdentifier::new(vec![2, 999, 3]).unwrap();
        let content = oid.to_content();
        assert_eq!(content, hex!("883703"));
        assert_eq!(ObjectIdentifier::from_content(&content).unwrap(), oid);
    }

    #[test]
    fn test_invalid_content() {
        assert!(matches!(
            ObjectIdentifier::from_content(&[]),
            Err(Asn1Error::DataCorrupted(_))
        ));
        // Dangling continuation octet
        assert!(matches!(
            ObjectIdentifier::from_content(&hex!("2a86")),
            Err(Asn1Error::DataCorrupted(_))
        ));
    }
}
