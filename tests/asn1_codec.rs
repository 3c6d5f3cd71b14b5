//! ASN.1 codec tests against hand-assembled BER/DER
//!
//! Covers PKCS#7 style navigation, indefinite lengths, long-form tags and the
//! ECDSA signature transcoding built on top of the codec.

use hex_literal::hex;
use jwtforge::asn1::{self, Node, ObjectIdentifier, TagClass, UniversalTag, oid, varint};
use jwtforge::signature::transcode;
use jwtforge::{Asn1Error, Error};

// ContentInfo { data, [0] EXPLICIT OCTET STRING "abc" }
const CONTENT_INFO: [u8; 20] = hex!(
    "30 12
       06 09 2a 86 48 86 f7 0d 01 07 01
       a0 05
         04 03 61 62 63"
);

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_content_info() {
    let node = asn1::decode(&CONTENT_INFO).unwrap();
    assert_eq!(node.universal_tag(), Some(UniversalTag::Sequence));
    assert_eq!(node.children().len(), 2);
    assert_eq!(node.child(0).unwrap().object_identifier(), Some(oid::PKCS7_DATA));

    let explicit = node.child(1).unwrap();
    assert_eq!(explicit.tag_class(), TagClass::ContextSpecific);
    assert_eq!(explicit.tag_number(), 0);
    assert!(explicit.is_constructed());
    assert_eq!(explicit.child(0).unwrap().content(), Some(&b"abc"[..]));

    assert_eq!(asn1::encode(&node), CONTENT_INFO);
}

#[test]
fn test_child_by_oid() {
    // SET OF Attribute { contentType, messageDigest }
    let attributes = Node::construct(
        UniversalTag::Set,
        vec![
            Node::construct(
                UniversalTag::Sequence,
                vec![
                    Node::oid(&oid::PKCS9_CONTENT_TYPE),
                    Node::construct(UniversalTag::Set, vec![Node::oid(&oid::PKCS7_DATA)]),
                ],
            ),
            Node::construct(
                UniversalTag::Sequence,
                vec![
                    Node::oid(&oid::PKCS9_MESSAGE_DIGEST),
                    Node::construct(
                        UniversalTag::Set,
                        vec![Node::primitive(UniversalTag::OctetString, vec![0xab; 32])],
                    ),
                ],
            ),
        ],
    );

    let decoded = asn1::decode(&asn1::encode(&attributes)).unwrap();
    let digest = decoded.child_by_oid(&oid::PKCS9_MESSAGE_DIGEST).unwrap();
    assert_eq!(
        digest.child(1).unwrap().child(0).unwrap().content().unwrap().len(),
        32
    );
    assert!(decoded.child_by_oid(&oid::PKCS9_SIGNING_TIME).is_none());
}

#[test]
fn test_indefinite_length_construct() {
    let ber = hex!("30 80 02 01 05 0c 02 68 69 00 00");
    let node = asn1::decode(&ber).unwrap();

    assert_eq!(node.children().len(), 3);
    assert_eq!(node.child(0).unwrap().decode_i64().unwrap(), 5);
    assert_eq!(node.child(1).unwrap().decode_string().unwrap(), "hi");
    assert!(node.child(2).unwrap().is_end_of_content());

    assert_eq!(asn1::encode(&node), ber);
}

#[test]
fn test_nested_indefinite_lengths() {
    let ber = hex!("30 80 31 80 05 00 00 00 00 00");
    let node = asn1::decode(&ber).unwrap();
    let set = node.child(0).unwrap();
    assert_eq!(set.universal_tag(), Some(UniversalTag::Set));
    assert_eq!(set.child(0).unwrap().universal_tag(), Some(UniversalTag::Null));
    assert_eq!(asn1::encode(&node), ber);
}

#[test]
fn test_long_form_tag_and_length() {
    // [APPLICATION 300] with 200 content octets
    let mut ber = hex!("5f 82 2c 81 c8").to_vec();
    ber.extend([0x5a; 200]);

    let node = asn1::decode(&ber).unwrap();
    assert_eq!(node.tag_class(), TagClass::Application);
    assert_eq!(node.tag_number(), 300);
    assert_eq!(node.content().unwrap().len(), 200);
    assert_eq!(asn1::encode(&node), ber);
}

#[test]
fn test_trailing_bytes_ignored() {
    let node = asn1::decode(&hex!("05 00 ff ff")).unwrap();
    assert_eq!(node.universal_tag(), Some(UniversalTag::Null));
}

#[test]
fn test_corrupted_inputs() {
    for input in [
        &hex!("")[..],
        &hex!("30")[..],
        &hex!("04 05 01 02")[..],
        &hex!("30 80 02 01 05")[..],
        &hex!("04 80 00 00")[..],
        &hex!("1f 81")[..],
        &hex!("04 ff")[..],
    ] {
        assert!(
            matches!(asn1::decode(input), Err(Asn1Error::DataCorrupted(_))),
            "{input:02x?}"
        );
    }
}

#[test]
fn test_nesting_limit() {
    let mut ber = Vec::new();
    for _ in 0..100 {
        ber.extend([0x30, 0x80]);
    }
    for _ in 0..100 {
        ber.extend([0x00, 0x00]);
    }
    assert!(matches!(
        asn1::decode(&ber),
        Err(Asn1Error::DataCorrupted(_))
    ));
}

#[test]
fn test_tree_display() {
    let node = asn1::decode(&CONTENT_INFO).unwrap();
    assert_eq!(
        node.to_string(),
        "SEQUENCE\n  OBJECT IDENTIFIER 1.2.840.113549.1.7.1\n  [0]\n    OCTET STRING (616263, 3 bytes)\n"
    );
}

// ============================================================================
// Object Identifiers and Varints
// ============================================================================

#[test]
fn test_object_identifier_text_and_content() {
    let oid: ObjectIdentifier = "1.2.840.10045.3.1.7".parse().unwrap();
    assert_eq!(oid, oid::PRIME256V1);
    assert_eq!(oid.to_content(), hex!("2a 86 48 ce 3d 03 01 07"));
    assert_eq!(oid.to_string(), "1.2.840.10045.3.1.7");

    let large = ObjectIdentifier::from_content(&hex!("88 37 03")).unwrap();
    assert_eq!(large.components(), &[2, 999, 3]);

    assert!("1".parse::<ObjectIdentifier>().is_err());
    assert!("3.1".parse::<ObjectIdentifier>().is_err());
    assert!("1.40".parse::<ObjectIdentifier>().is_err());
    assert!("1.2.x".parse::<ObjectIdentifier>().is_err());
}

#[test]
fn test_varints() {
    assert_eq!(varint::encode_base128(300), hex!("82 2c"));
    assert_eq!(varint::decode_base128(&hex!("82 2c ff")).unwrap(), (300, 2));
    assert!(varint::decode_base128(&hex!("82 82")).is_err());

    assert_eq!(varint::encode_base256(0), hex!("00"));
    assert_eq!(varint::encode_base256(0x01_0000), hex!("01 00 00"));
    assert_eq!(varint::decode_base256(&hex!("01 00 00")).unwrap(), 0x01_0000);
    assert!(varint::decode_base256(&[0x01; 9]).is_err());
}

// ============================================================================
// ECDSA Signature Transcoding
// ============================================================================

#[test]
fn test_transcode_high_bit_halves() {
    let mut raw = vec![0x80; 32];
    raw.extend([0x01; 32]);

    let der = transcode::raw_to_der(&raw, 32).unwrap();
    assert_eq!(&der[..5], &hex!("30 45 02 21 00"));
    assert_eq!(transcode::der_to_raw(&der, 32).unwrap(), raw);
}

/// Halves of `n` bytes at the boundaries of the INTEGER encoding
fn edge_halves(n: usize) -> Vec<Vec<u8>> {
    let with_prefix = |prefix: &[u8], fill: u8| {
        let mut half = prefix.to_vec();
        half.resize(n, fill);
        half
    };
    vec![
        with_prefix(&[0x00, 0x80], 0x5a),
        with_prefix(&[0x00, 0x00], 0x33),
        with_prefix(&[0x00, 0x7f], 0xff),
        with_prefix(&[0x80], 0x00),
        with_prefix(&[0x7f], 0xee),
        with_prefix(&[], 0xff),
        with_prefix(&[], 0x00),
        {
            let mut last_only = vec![0x00; n];
            last_only[n - 1] = 0x01;
            last_only
        },
    ]
}

#[test]
fn test_transcode_round_trip_edge_halves() {
    for n in [32, 48, 66] {
        let halves = edge_halves(n);
        for r in &halves {
            for s in &halves {
                let raw = [r.as_slice(), s.as_slice()].concat();
                let der = transcode::raw_to_der(&raw, n).unwrap();

                let sequence = asn1::decode(&der).unwrap();
                assert_eq!(sequence.universal_tag(), Some(UniversalTag::Sequence));
                for (index, half) in [r, s].into_iter().enumerate() {
                    let integer = sequence.child(index).unwrap();
                    let content = integer.content().unwrap();
                    let expected_len = n + usize::from(half[0] & 0x80 != 0);
                    assert_eq!(content.len(), expected_len);
                }

                assert_eq!(transcode::der_to_raw(&der, n).unwrap(), raw, "n={n}");
            }
        }
    }
}

#[test]
fn test_transcode_short_integers_are_padded() {
    let der = hex!("30 06 02 01 01 02 01 02");
    let raw = transcode::der_to_raw(&der, 32).unwrap();
    assert_eq!(raw.len(), 64);
    assert_eq!(raw[31], 0x01);
    assert_eq!(raw[63], 0x02);
    assert!(raw[..31].iter().chain(&raw[32..63]).all(|&b| b == 0));
}

#[test]
fn test_transcode_errors() {
    assert!(matches!(
        transcode::raw_to_der(&[0x01; 63], 32),
        Err(Error::InvalidSignaturePairSize {
            expected: 64,
            found: 63
        })
    ));

    let mut oversized = hex!("30 26 02 21 01").to_vec();
    oversized.extend([0x02; 32]);
    oversized.extend(hex!("02 01 01"));
    assert!(matches!(
        transcode::der_to_raw(&oversized, 32),
        Err(Error::InvalidSignaturePairSize {
            expected: 32,
            found: 33
        })
    ));

    assert!(matches!(
        transcode::der_to_raw(&hex!("31 06 02 01 01 02 01 02"), 32),
        Err(Error::Asn1(Asn1Error::TypeMismatch(_)))
    ));
    assert!(matches!(
        transcode::der_to_raw(&hex!("30 03 02 01 01"), 32),
        Err(Error::Asn1(Asn1Error::ValueNotFound(_)))
    ));
}
