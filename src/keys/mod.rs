//! Key handles for signing and verification
//!
//! Keys are opaque to the token codec: it only needs their [`KeyMetadata`]
//! (for ECDSA signature widths) and hands them to a
//! [`CryptoProvider`](crate::CryptoProvider). Asymmetric keys are imported from
//! standard DER containers, which are inspected with the crate's own ASN.1
//! codec:
//! - RSA private keys from PKCS#8 or PKCS#1, RSA public keys from PKCS#1
//! - EC private keys from PKCS#8 (curve read from the AlgorithmIdentifier)
//! - EC keys in X9.63 form (`04 || x || y`, followed by `d` for private keys)
//! - public keys from SubjectPublicKeyInfo or an X.509 certificate
mod certificate;

use crate::algorithm::{self, Algorithm};
use crate::asn1::{self, Node, ObjectIdentifier, UniversalTag, oid};
use crate::error::{Asn1Error, Error, Result};
use std::fmt;

/// Broad key category reported in [`KeyMetadata`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Symmetric,
    Rsa,
    Ec,
}

/// Type and size of a key
///
/// `size_bytes` is the secret length for symmetric keys, the modulus length
/// for RSA keys and the field element width for EC keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyMetadata {
    pub key_type: KeyType,
    pub size_bytes: usize,
}

/// Named curves supported for ECDSA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    /// P-256 (prime256v1)
    P256,
    /// P-384 (secp384r1)
    P384,
    /// P-521 (secp521r1)
    P521,
}

impl EcCurve {
    /// Width of one field element, and of each signature half
    pub fn size_bytes(self) -> usize {
        match self {
            EcCurve::P256 => 32,
            EcCurve::P384 => 48,
            EcCurve::P521 => 66,
        }
    }

    pub fn oid(self) -> ObjectIdentifier {
        match self {
            EcCurve::P256 => oid::PRIME256V1,
            EcCurve::P384 => oid::SECP384R1,
            EcCurve::P521 => oid::SECP521R1,
        }
    }

    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        [EcCurve::P256, EcCurve::P384, EcCurve::P521]
            .into_iter()
            .find(|curve| &curve.oid() == oid)
    }

    pub fn name(self) -> &'static str {
        match self {
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
            EcCurve::P521 => "P-521",
        }
    }
}

/// A key that can be used for signing or verification
#[derive(Debug, Clone)]
pub enum Key {
    /// Shared secret for HMAC algorithms
    Symmetric(SymmetricKey),

    /// RSA private key (signs, and verifies through its public half)
    RsaPrivate(RsaPrivateKey),

    /// RSA public key
    RsaPublic(RsaPublicKey),

    /// EC private key (signs, and verifies through its public half)
    EcPrivate(EcPrivateKey),

    /// EC public key
    EcPublic(EcPublicKey),
}

impl Key {
    /// Create a symmetric key from bytes
    pub fn symmetric(secret: impl Into<Vec<u8>>) -> Self {
        Key::Symmetric(SymmetricKey::new(secret.into()))
    }

    /// Import an RSA private key from PKCS#8 DER
    pub fn rsa_private_pkcs8(der: impl Into<Vec<u8>>) -> Result<Self> {
        let der = der.into();
        let (algorithm_oid, _) = pkcs8_algorithm(&der)?;
        if algorithm_oid != oid::RSA_ENCRYPTION {
            return Err(Error::KeyRejected(format!(
                "PKCS#8 algorithm {algorithm_oid} is not rsaEncryption"
            )));
        }

        RsaPrivateKey::new(RsaPrivateDer::Pkcs8(der)).map(Key::RsaPrivate)
    }

    /// Import an RSA private key from PKCS#1 `RSAPrivateKey` DER
    pub fn rsa_private_pkcs1(der: impl Into<Vec<u8>>) -> Result<Self> {
        RsaPrivateKey::new(RsaPrivateDer::Pkcs1(der.into())).map(Key::RsaPrivate)
    }

    /// Import an RSA public key from PKCS#1 `RSAPublicKey` DER
    pub fn rsa_public_pkcs1(der: impl Into<Vec<u8>>) -> Result<Self> {
        Ok(Key::RsaPublic(RsaPublicKey::from_pkcs1(der.into())?))
    }

    /// Import an EC private key from PKCS#8 DER
    pub fn ec_private_pkcs8(der: impl Into<Vec<u8>>) -> Result<Self> {
        let der = der.into();
        let (algorithm_oid, parameters) = pkcs8_algorithm(&der)?;
        if algorithm_oid != oid::EC_PUBLIC_KEY {
            return Err(Error::KeyRejected(format!(
                "PKCS#8 algorithm {algorithm_oid} is not id-ecPublicKey"
            )));
        }

        let curve_oid = parameters
            .ok_or_else(|| Asn1Error::not_found("named curve in EC AlgorithmIdentifier"))?;
        let curve = EcCurve::from_oid(&curve_oid)
            .ok_or_else(|| Error::KeyRejected(format!("unsupported named curve {curve_oid}")))?;

        let point = algorithm::ecdsa::public_point_from_pkcs8(curve, &der)?;
        Ok(Key::EcPrivate(EcPrivateKey {
            encoding: EcPrivateEncoding::Pkcs8(der),
            public: EcPublicKey { curve, point },
        }))
    }

    /// Import an EC private key in X9.63 form (`0x04 || x || y || d`)
    ///
    /// The curve follows from the length: 97, 145 or 199 bytes for P-256,
    /// P-384 and P-521.
    pub fn ec_private_x963(data: &[u8]) -> Result<Self> {
        let curve = [EcCurve::P256, EcCurve::P384, EcCurve::P521]
            .into_iter()
            .find(|curve| data.len() == 1 + 3 * curve.size_bytes())
            .ok_or_else(|| {
                Error::KeyRejected(format!(
                    "{} bytes is not an X9.63 private key length",
                    data.len()
                ))
            })?;

        let (point, scalar) = data.split_at(1 + 2 * curve.size_bytes());
        let public = EcPublicKey::from_point(curve, point.to_vec())?;
        algorithm::ecdsa::check_key_pair(curve, scalar, point)?;

        Ok(Key::EcPrivate(EcPrivateKey {
            encoding: EcPrivateEncoding::Scalar(scalar.to_vec()),
            public,
        }))
    }

    /// Import an EC public key from an uncompressed point (`0x04 || x || y`)
    pub fn ec_public_point(curve: EcCurve, point: impl Into<Vec<u8>>) -> Result<Self> {
        EcPublicKey::from_point(curve, point.into()).map(Key::EcPublic)
    }

    /// Import a public key from DER `SubjectPublicKeyInfo`
    pub fn public_from_spki(der: &[u8]) -> Result<Self> {
        public_from_spki_node(&asn1::decode(der)?)
    }

    /// Extract the subject public key of a DER X.509 certificate
    pub fn public_from_certificate(der: &[u8]) -> Result<Self> {
        let certificate = asn1::decode(der)?;
        public_from_spki_node(certificate::subject_public_key_info(&certificate)?)
    }

    /// Type and size of the key
    pub fn metadata(&self) -> KeyMetadata {
        match self {
            Key::Symmetric(key) => KeyMetadata {
                key_type: KeyType::Symmetric,
                size_bytes: key.secret.len(),
            },
            Key::RsaPrivate(RsaPrivateKey { public, .. }) | Key::RsaPublic(public) => {
                KeyMetadata {
                    key_type: KeyType::Rsa,
                    size_bytes: public.modulus_len,
                }
            }
            Key::EcPrivate(EcPrivateKey { public, .. }) | Key::EcPublic(public) => KeyMetadata {
                key_type: KeyType::Ec,
                size_bytes: public.curve.size_bytes(),
            },
        }
    }

    /// Public half of an asymmetric key; `None` for symmetric keys
    pub fn public_key(&self) -> Option<Key> {
        match self {
            Key::Symmetric(_) => None,
            Key::RsaPrivate(key) => Some(Key::RsaPublic(key.public.clone())),
            Key::EcPrivate(key) => Some(Key::EcPublic(key.public.clone())),
            Key::RsaPublic(_) | Key::EcPublic(_) => Some(self.clone()),
        }
    }

    /// Get key type name for error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            Key::Symmetric(_) => "Symmetric",
            Key::RsaPrivate(_) => "RSA private",
            Key::RsaPublic(_) => "RSA public",
            Key::EcPrivate(key) => match key.public.curve {
                EcCurve::P256 => "EC P-256 private",
                EcCurve::P384 => "EC P-384 private",
                EcCurve::P521 => "EC P-521 private",
            },
            Key::EcPublic(key) => match key.curve {
                EcCurve::P256 => "EC P-256 public",
                EcCurve::P384 => "EC P-384 public",
                EcCurve::P521 => "EC P-521 public",
            },
        }
    }

    fn mismatch(&self, algorithm: &Algorithm, expected: &str) -> Error {
        Error::KeyTypeMismatch {
            algorithm: algorithm.to_string(),
            expected_key_type: expected.to_string(),
            actual_key_type: self.key_type().to_string(),
        }
    }

    /// Get as symmetric key or return error
    pub(crate) fn as_symmetric(&self, algorithm: &Algorithm) -> Result<&SymmetricKey> {
        match self {
            Key::Symmetric(key) => Ok(key),
            _ => Err(self.mismatch(algorithm, "Symmetric")),
        }
    }

    pub(crate) fn as_rsa_private(&self, algorithm: &Algorithm) -> Result<&RsaPrivateKey> {
        match self {
            Key::RsaPrivate(key) => Ok(key),
            _ => Err(self.mismatch(algorithm, "RSA private")),
        }
    }

    pub(crate) fn as_rsa_public(&self, algorithm: &Algorithm) -> Result<&RsaPublicKey> {
        match self {
            Key::RsaPrivate(key) => Ok(&key.public),
            Key::RsaPublic(key) => Ok(key),
            _ => Err(self.mismatch(algorithm, "RSA")),
        }
    }

    pub(crate) fn as_ec_private(&self, algorithm: &Algorithm) -> Result<&EcPrivateKey> {
        match self {
            Key::EcPrivate(key) if algorithm.curve() == Some(key.public.curve) => Ok(key),
            _ => Err(self.mismatch(algorithm, &expected_ec(algorithm, "private"))),
        }
    }

    pub(crate) fn as_ec_public(&self, algorithm: &Algorithm) -> Result<&EcPublicKey> {
        let public = match self {
            Key::EcPrivate(key) => &key.public,
            Key::EcPublic(key) => key,
            _ => return Err(self.mismatch(algorithm, &expected_ec(algorithm, "public"))),
        };

        if algorithm.curve() == Some(public.curve) {
            Ok(public)
        } else {
            Err(self.mismatch(algorithm, &expected_ec(algorithm, "public")))
        }
    }
}

fn expected_ec(algorithm: &Algorithm, half: &str) -> String {
    match algorithm.curve() {
        Some(curve) => format!("EC {} {half}", curve.name()),
        None => format!("EC {half}"),
    }
}

/// Symmetric key for HMAC algorithms
#[derive(Clone)]
pub struct SymmetricKey {
    secret: Vec<u8>,
}

impl SymmetricKey {
    /// Create a new symmetric key
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl From<&[u8]> for SymmetricKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<&str> for SymmetricKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

/// Container an RSA private key was imported from
#[derive(Clone)]
pub(crate) enum RsaPrivateDer {
    /// `PrivateKeyInfo`
    Pkcs8(Vec<u8>),
    /// `RSAPrivateKey`
    Pkcs1(Vec<u8>),
}

/// RSA private key (PKCS#8 or PKCS#1 DER) with its public half
#[derive(Clone)]
pub struct RsaPrivateKey {
    der: RsaPrivateDer,
    public: RsaPublicKey,
}

impl RsaPrivateKey {
    fn new(der: RsaPrivateDer) -> Result<Self> {
        let public_der = algorithm::rsa::public_key(&der)?;
        Ok(Self {
            der,
            public: RsaPublicKey::from_pkcs1(public_der)?,
        })
    }

    pub(crate) fn der(&self) -> &RsaPrivateDer {
        &self.der
    }

    pub fn public(&self) -> &RsaPublicKey {
        &self.public
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// RSA public key (PKCS#1 `RSAPublicKey` DER)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pkcs1: Vec<u8>,
    modulus_len: usize,
}

impl RsaPublicKey {
    fn from_pkcs1(der: Vec<u8>) -> Result<Self> {
        let sequence = asn1::decode(&der)?;
        if sequence.universal_tag() != Some(UniversalTag::Sequence) {
            return Err(Asn1Error::mismatch("RSAPublicKey is not a SEQUENCE").into());
        }

        let modulus = integer_content(sequence.child(0)?, "RSA modulus")?;
        integer_content(sequence.child(1)?, "RSA public exponent")?;

        let modulus_len = modulus.iter().skip_while(|&&b| b == 0).count();
        if modulus_len == 0 {
            return Err(Error::KeyRejected("RSA modulus is zero".to_string()));
        }

        Ok(Self {
            pkcs1: der,
            modulus_len,
        })
    }

    /// Get the DER-encoded key bytes
    pub fn as_der(&self) -> &[u8] {
        &self.pkcs1
    }

    /// Modulus length in bytes
    pub fn modulus_len(&self) -> usize {
        self.modulus_len
    }
}

/// Encoding an EC private key was imported from
#[derive(Clone)]
pub(crate) enum EcPrivateEncoding {
    /// `PrivateKeyInfo`
    Pkcs8(Vec<u8>),
    /// Big-endian private scalar `d`, paired with the public point
    Scalar(Vec<u8>),
}

/// EC private key (PKCS#8 DER or raw scalar) with its public point
#[derive(Clone)]
pub struct EcPrivateKey {
    encoding: EcPrivateEncoding,
    public: EcPublicKey,
}

impl EcPrivateKey {
    pub(crate) fn encoding(&self) -> &EcPrivateEncoding {
        &self.encoding
    }

    pub fn public(&self) -> &EcPublicKey {
        &self.public
    }

    pub fn curve(&self) -> EcCurve {
        self.public.curve
    }
}

impl fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcPrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// EC public key as an uncompressed point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPublicKey {
    curve: EcCurve,
    point: Vec<u8>,
}

impl EcPublicKey {
    fn from_point(curve: EcCurve, point: Vec<u8>) -> Result<Self> {
        let expected = 1 + 2 * curve.size_bytes();
        if point.len() != expected || point.first() != Some(&0x04) {
            return Err(Error::KeyRejected(format!(
                "expected {expected}-byte uncompressed {} point, got {} bytes",
                curve.name(),
                point.len()
            )));
        }
        Ok(Self { curve, point })
    }

    pub fn curve(&self) -> EcCurve {
        self.curve
    }

    /// Uncompressed point bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.point
    }

    /// Encode as DER `SubjectPublicKeyInfo`
    pub fn to_spki_der(&self) -> Vec<u8> {
        let mut bits = Vec::with_capacity(self.point.len() + 1);
        bits.push(0);
        bits.extend_from_slice(&self.point);

        asn1::encode(&Node::construct(
            UniversalTag::Sequence,
            vec![
                Node::construct(
                    UniversalTag::Sequence,
                    vec![Node::oid(&oid::EC_PUBLIC_KEY), Node::oid(&self.curve.oid())],
                ),
                Node::primitive(UniversalTag::BitString, bits),
            ],
        ))
    }
}

fn integer_content<'a>(node: &'a Node, what: &str) -> Result<&'a [u8]> {
    match (node.universal_tag(), node.content()) {
        (Some(UniversalTag::Integer), Some(content)) => Ok(content),
        _ => Err(Asn1Error::mismatch(format!("{what} is not an INTEGER")).into()),
    }
}

/// Algorithm OID and optional OID parameter of a PKCS#8 `PrivateKeyInfo`
fn pkcs8_algorithm(der: &[u8]) -> Result<(ObjectIdentifier, Option<ObjectIdentifier>)> {
    let info = asn1::decode(der)?;
    algorithm_identifier(info.child(1)?)
}

fn algorithm_identifier(node: &Node) -> Result<(ObjectIdentifier, Option<ObjectIdentifier>)> {
    let algorithm = node
        .child(0)?
        .object_identifier()
        .ok_or_else(|| Asn1Error::mismatch("AlgorithmIdentifier without OBJECT IDENTIFIER"))?;
    let parameters = node.get(1).and_then(Node::object_identifier);
    Ok((algorithm, parameters))
}

fn public_from_spki_node(spki: &Node) -> Result<Key> {
    let (algorithm, parameters) = algorithm_identifier(spki.child(0)?)?;

    let bits = spki.child(1)?;
    let key_bytes = match (bits.universal_tag(), bits.content()) {
        (Some(UniversalTag::BitString), Some([0, key_bytes @ ..])) => key_bytes,
        (Some(UniversalTag::BitString), Some(_)) => {
            return Err(Asn1Error::corrupted("subjectPublicKey has unused bits").into());
        }
        _ => return Err(Asn1Error::mismatch("subjectPublicKey is not a BIT STRING").into()),
    };

    if algorithm == oid::RSA_ENCRYPTION {
        Key::rsa_public_pkcs1(key_bytes)
    } else if algorithm == oid::EC_PUBLIC_KEY {
        let curve_oid = parameters
            .ok_or_else(|| Asn1Error::not_found("named curve in EC AlgorithmIdentifier"))?;
        let curve = EcCurve::from_oid(&curve_oid)
            .ok_or_else(|| Error::KeyRejected(format!("unsupported named curve {curve_oid}")))?;
        Key::ec_public_point(curve, key_bytes)
    } else {
        Err(Error::KeyRejected(format!(
            "unsupported public key algorithm {algorithm}"
        )))
    }
}
