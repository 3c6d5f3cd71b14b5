//! Key format compatibility tests
//!
//! Keys produced by other libraries must import cleanly:
//! - PKCS#8 private keys (RSA from the `rsa` crate, EC from `ring`)
//! - PKCS#1 RSA private and public keys
//! - X9.63 EC private keys
//! - SubjectPublicKeyInfo for RSA and EC
//! - X.509 certificates carried in the `x5c` header

use jwtforge::asn1::{self, Node, TagClass, UniversalTag, oid};
use jwtforge::{Algorithm, EcCurve, Error, Header, Key, KeyType, Payload, Signer, StandardToken, Verifier};

// ============================================================================
// RSA Key Format Tests
// ============================================================================

mod rsa_key_formats {
    use super::*;
    use rsa::RsaPrivateKey;
    use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};
    use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};

    fn generate_rsa_keypair() -> RsaPrivateKey {
        let mut rng = rand::thread_rng();
        RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate RSA key")
    }

    fn signed_token(private_key: &RsaPrivateKey) -> StandardToken {
        let pkcs8 = private_key.to_pkcs8_der().unwrap();
        let key = Key::rsa_private_pkcs8(pkcs8.as_bytes()).unwrap();
        let signer = Signer::new(&Algorithm::RS256, key).unwrap();

        let mut payload = Payload::new();
        payload.subject = Some("user".to_string());
        StandardToken::encode_payload(payload, Some(&signer)).unwrap()
    }

    #[test]
    fn test_rsa_pkcs1_public_key() {
        let private_key = generate_rsa_keypair();
        let token = signed_token(&private_key);

        let public_der = private_key.to_public_key().to_pkcs1_der().unwrap();
        let key = Key::rsa_public_pkcs1(public_der.as_bytes()).unwrap();
        assert_eq!(key.metadata().key_type, KeyType::Rsa);
        assert_eq!(key.metadata().size_bytes, 256);

        let verifier = Verifier::new(&Algorithm::RS256, key).unwrap();
        assert!(token.validate_signature(&verifier));
    }

    #[test]
    fn test_rsa_pkcs1_private_key() {
        let private_key = generate_rsa_keypair();
        let pkcs1 = private_key.to_pkcs1_der().unwrap();
        let key = Key::rsa_private_pkcs1(pkcs1.as_bytes()).unwrap();
        assert_eq!(key.key_type(), "RSA private");
        assert_eq!(key.metadata().size_bytes, 256);

        let signer = Signer::new(&Algorithm::PS256, key).unwrap();
        let token = StandardToken::encode_payload(Payload::new(), Some(&signer)).unwrap();
        assert!(token.validate_signature(&signer.verifier()));

        // the same key imported from PKCS#8 verifies it too
        let pkcs8 = private_key.to_pkcs8_der().unwrap();
        let other = Key::rsa_private_pkcs8(pkcs8.as_bytes()).unwrap();
        let verifier = Verifier::new(&Algorithm::PS256, other.public_key().unwrap()).unwrap();
        assert!(token.validate_signature(&verifier));
    }

    #[test]
    fn test_rsa_pkcs1_private_rejects_pkcs8() {
        let pkcs8 = generate_rsa_keypair().to_pkcs8_der().unwrap();
        assert!(matches!(
            Key::rsa_private_pkcs1(pkcs8.as_bytes()),
            Err(Error::KeyRejected(_))
        ));
    }

    #[test]
    fn test_rsa_spki_public_key() {
        let private_key = generate_rsa_keypair();
        let token = signed_token(&private_key);

        let spki = private_key.to_public_key().to_public_key_der().unwrap();
        let key = Key::public_from_spki(spki.as_bytes()).unwrap();
        assert_eq!(key.key_type(), "RSA public");

        let verifier = Verifier::new(&Algorithm::RS256, key).unwrap();
        assert!(token.validate_signature(&verifier));
    }

    #[test]
    fn test_rsa_public_key_cannot_sign() {
        let private_key = generate_rsa_keypair();
        let public_der = private_key.to_public_key().to_pkcs1_der().unwrap();
        let key = Key::rsa_public_pkcs1(public_der.as_bytes()).unwrap();

        assert!(matches!(
            Signer::new(&Algorithm::RS256, key),
            Err(Error::KeyTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_rsa_key_rejected_for_ecdsa() {
        let private_key = generate_rsa_keypair();
        let pkcs8 = private_key.to_pkcs8_der().unwrap();

        assert!(matches!(
            Key::ec_private_pkcs8(pkcs8.as_bytes()),
            Err(Error::KeyRejected(_))
        ));
    }
}

// ============================================================================
// ECDSA Key Format Tests
// ============================================================================

mod ecdsa_key_formats {
    use super::*;
    use ring::rand::SystemRandom;
    use ring::signature::{
        ECDSA_P256_SHA256_FIXED_SIGNING, ECDSA_P384_SHA384_FIXED_SIGNING, EcdsaKeyPair,
        EcdsaSigningAlgorithm,
    };

    fn p384_signer() -> Signer {
        let pkcs8 =
            EcdsaKeyPair::generate_pkcs8(&ECDSA_P384_SHA384_FIXED_SIGNING, &SystemRandom::new())
                .unwrap();
        Signer::new(&Algorithm::ES384, Key::ec_private_pkcs8(pkcs8.as_ref()).unwrap()).unwrap()
    }

    /// PKCS#8 key plus the same key as `04 || x || y || d`
    fn pkcs8_and_x963(algorithm: &'static EcdsaSigningAlgorithm) -> (Vec<u8>, Vec<u8>) {
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(algorithm, &SystemRandom::new())
            .unwrap()
            .as_ref()
            .to_vec();

        // PrivateKeyInfo.privateKey wraps ECPrivateKey { version, d, [1] publicKey }
        let info = asn1::decode(&pkcs8).unwrap();
        let ec_private_key = asn1::decode(info.child(2).unwrap().content().unwrap()).unwrap();
        let scalar = ec_private_key.child(1).unwrap().content().unwrap();
        let public_key = ec_private_key
            .children()
            .iter()
            .find(|node| node.tag_class() == TagClass::ContextSpecific && node.tag_number() == 1)
            .unwrap();
        let point = &public_key.child(0).unwrap().content().unwrap()[1..];

        let mut x963 = point.to_vec();
        x963.extend_from_slice(scalar);
        (pkcs8, x963)
    }

    fn spki_der(signer: &Signer) -> Vec<u8> {
        match signer.key().public_key() {
            Some(Key::EcPublic(public)) => public.to_spki_der(),
            other => panic!("unexpected public key {other:?}"),
        }
    }

    /// A structurally valid v3 certificate around `spki`; the signature is not meaningful
    fn certificate(spki: &[u8]) -> Vec<u8> {
        let sequence = |children| Node::construct(UniversalTag::Sequence, children);
        let algorithm = sequence(vec![
            Node::oid(&"1.2.840.10045.4.3.3".parse().unwrap()),
        ]);
        let name = sequence(vec![]);

        let tbs = sequence(vec![
            Node::Construct {
                tag_number: 0,
                tag_class: TagClass::ContextSpecific,
                children: vec![Node::primitive(UniversalTag::Integer, vec![0x02])],
            },
            Node::primitive(UniversalTag::Integer, vec![0x10, 0x01]),
            algorithm.clone(),
            name.clone(),
            sequence(vec![
                Node::primitive(UniversalTag::UtcTime, b"250101000000Z".to_vec()),
                Node::primitive(UniversalTag::UtcTime, b"350101000000Z".to_vec()),
            ]),
            name,
            asn1::decode(spki).unwrap(),
        ]);

        asn1::encode(&sequence(vec![
            tbs,
            algorithm,
            Node::primitive(UniversalTag::BitString, vec![0x00, 0x30, 0x00]),
        ]))
    }

    #[test]
    fn test_ec_spki_round_trip() {
        let signer = p384_signer();
        let spki = spki_der(&signer);

        let decoded = asn1::decode(&spki).unwrap();
        let algorithm = decoded.child(0).unwrap();
        assert_eq!(algorithm.child(0).unwrap().object_identifier(), Some(oid::EC_PUBLIC_KEY));
        assert_eq!(algorithm.child(1).unwrap().object_identifier(), Some(oid::SECP384R1));

        let key = Key::public_from_spki(&spki).unwrap();
        assert_eq!(key.metadata().size_bytes, EcCurve::P384.size_bytes());

        let token = StandardToken::encode_payload(Payload::new(), Some(&signer)).unwrap();
        assert!(token.validate_signature(&Verifier::new(&Algorithm::ES384, key).unwrap()));
    }

    #[test]
    fn test_verify_with_x5c_certificate() {
        let signer = p384_signer();

        let mut header: Header = Header::new(Algorithm::ES384);
        header.certificate_chain = Some(vec![certificate(&spki_der(&signer))]);
        let token = StandardToken::build(header, Payload::new(), Some(&signer)).unwrap();

        let parsed = StandardToken::parse(&token.to_string()).unwrap();
        let chain = parsed.header().certificate_chain.as_ref().unwrap();
        let key = Key::public_from_certificate(&chain[0]).unwrap();

        let verifier = Verifier::new(&parsed.header().algorithm, key).unwrap();
        assert!(parsed.validate_signature(&verifier));
    }

    #[test]
    fn test_ec_x963_private_key() {
        for (signing, algorithm, curve) in [
            (&ECDSA_P256_SHA256_FIXED_SIGNING, Algorithm::ES256, EcCurve::P256),
            (&ECDSA_P384_SHA384_FIXED_SIGNING, Algorithm::ES384, EcCurve::P384),
        ] {
            let (pkcs8, x963) = pkcs8_and_x963(signing);
            assert_eq!(x963.len(), 1 + 3 * curve.size_bytes());

            let key = Key::ec_private_x963(&x963).unwrap();
            assert_eq!(key.metadata().size_bytes, curve.size_bytes());
            let signer = Signer::new(&algorithm, key).unwrap();
            let token = StandardToken::encode_payload(Payload::new(), Some(&signer)).unwrap();

            // same key pair through PKCS#8, in both directions
            let pkcs8_signer = Signer::new(&algorithm, Key::ec_private_pkcs8(pkcs8).unwrap()).unwrap();
            assert!(token.validate_signature(&pkcs8_signer.verifier()));

            let other = StandardToken::encode_payload(Payload::new(), Some(&pkcs8_signer)).unwrap();
            assert!(other.validate_signature(&signer.verifier()));
        }
    }

    #[test]
    fn test_ec_x963_rejects_foreign_scalar() {
        let (_, mut x963) = pkcs8_and_x963(&ECDSA_P256_SHA256_FIXED_SIGNING);
        let (_, other) = pkcs8_and_x963(&ECDSA_P256_SHA256_FIXED_SIGNING);
        x963[65..].copy_from_slice(&other[65..]);

        assert!(matches!(
            Key::ec_private_x963(&x963),
            Err(Error::KeyRejected(_))
        ));
    }

    #[test]
    fn test_ec_point_wrong_length() {
        assert!(matches!(
            Key::ec_public_point(EcCurve::P256, vec![0x04; 33]),
            Err(Error::KeyRejected(_))
        ));
    }

    #[test]
    fn test_unsupported_spki_algorithm() {
        let spki = asn1::encode(&Node::construct(
            UniversalTag::Sequence,
            vec![
                Node::construct(
                    UniversalTag::Sequence,
                    vec![Node::oid(&"1.3.101.112".parse().unwrap())],
                ),
                Node::primitive(UniversalTag::BitString, vec![0x00; 33]),
            ],
        ));
        assert!(matches!(
            Key::public_from_spki(&spki),
            Err(Error::KeyRejected(_))
        ));
    }
}
