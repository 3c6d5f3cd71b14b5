//! ECDSA backend
//!
//! Signatures cross this module's boundary in DER form. Verification
//! normalises them to the fixed-width encoding first, so DER integers with
//! redundant leading zeros (as produced by [`raw_to_der`]) are still accepted.
//!
//! [`raw_to_der`]: crate::signature::transcode::raw_to_der

use crate::error::{Error, Result};
use crate::keys::{EcCurve, EcPrivateEncoding};
use crate::signature::transcode;

// Select crypto backend based on features
#[cfg(feature = "aws-lc-rs")]
use aws_lc_rs::{
    rand::SystemRandom,
    signature::{
        self, EcdsaKeyPair, EcdsaSigningAlgorithm, EcdsaVerificationAlgorithm, KeyPair,
        UnparsedPublicKey,
    },
};
#[cfg(not(feature = "aws-lc-rs"))]
use ring::{
    rand::SystemRandom,
    signature::{
        self, EcdsaKeyPair, EcdsaSigningAlgorithm, EcdsaVerificationAlgorithm, KeyPair,
        UnparsedPublicKey,
    },
};

/// Validate a PKCS#8 EC private key and return its uncompressed public point
pub(crate) fn public_point_from_pkcs8(curve: EcCurve, pkcs8: &[u8]) -> Result<Vec<u8>> {
    let key_pair = key_pair(curve, pkcs8)?;
    Ok(key_pair.public_key().as_ref().to_vec())
}

/// Check that a private scalar belongs to an uncompressed public point
pub(crate) fn check_key_pair(curve: EcCurve, scalar: &[u8], point: &[u8]) -> Result<()> {
    components_key_pair(curve, scalar, point).map(|_| ())
}

/// Sign `message`, returning a DER `SEQUENCE { r, s }`
///
/// `point` is the public point of the key and only read for scalar keys.
pub(crate) fn sign(
    curve: EcCurve,
    private: &EcPrivateEncoding,
    point: &[u8],
    message: &[u8],
) -> Result<Vec<u8>> {
    let key_pair = match private {
        EcPrivateEncoding::Pkcs8(pkcs8) => key_pair(curve, pkcs8)?,
        EcPrivateEncoding::Scalar(scalar) => components_key_pair(curve, scalar, point)?,
    };
    let signature = key_pair
        .sign(&SystemRandom::new(), message)
        .map_err(|e| Error::SigningFailed(format!("ECDSA {}: {e}", curve.name())))?;
    Ok(signature.as_ref().to_vec())
}

/// Verify a DER signature against an uncompressed public point
pub(crate) fn verify(curve: EcCurve, point: &[u8], message: &[u8], der_signature: &[u8]) -> bool {
    let Ok(algorithm) = verification_algorithm(curve) else {
        return false;
    };

    match transcode::der_to_raw(der_signature, curve.size_bytes()) {
        Ok(fixed) => UnparsedPublicKey::new(algorithm, point)
            .verify(message, &fixed)
            .is_ok(),
        Err(e) => {
            tracing::debug!(curve = curve.name(), error = %e, "Malformed ECDSA signature");
            false
        }
    }
}

#[cfg(feature = "aws-lc-rs")]
fn key_pair(curve: EcCurve, pkcs8: &[u8]) -> Result<EcdsaKeyPair> {
    EcdsaKeyPair::from_pkcs8(signing_algorithm(curve)?, pkcs8)
        .map_err(|e| Error::KeyRejected(format!("EC {} PKCS#8: {e}", curve.name())))
}

#[cfg(not(feature = "aws-lc-rs"))]
fn key_pair(curve: EcCurve, pkcs8: &[u8]) -> Result<EcdsaKeyPair> {
    EcdsaKeyPair::from_pkcs8(signing_algorithm(curve)?, pkcs8, &SystemRandom::new())
        .map_err(|e| Error::KeyRejected(format!("EC {} PKCS#8: {e}", curve.name())))
}

#[cfg(feature = "aws-lc-rs")]
fn components_key_pair(curve: EcCurve, scalar: &[u8], point: &[u8]) -> Result<EcdsaKeyPair> {
    EcdsaKeyPair::from_private_key_and_public_key(signing_algorithm(curve)?, scalar, point)
        .map_err(|e| Error::KeyRejected(format!("EC {} X9.63: {e}", curve.name())))
}

#[cfg(not(feature = "aws-lc-rs"))]
fn components_key_pair(curve: EcCurve, scalar: &[u8], point: &[u8]) -> Result<EcdsaKeyPair> {
    EcdsaKeyPair::from_private_key_and_public_key(
        signing_algorithm(curve)?,
        scalar,
        point,
        &SystemRandom::new(),
    )
    .map_err(|e| Error::KeyRejected(format!("EC {} X9.63: {e}", curve.name())))
}

fn signing_algorithm(curve: EcCurve) -> Result<&'static EcdsaSigningAlgorithm> {
    match curve {
        EcCurve::P256 => Ok(&signature::ECDSA_P256_SHA256_ASN1_SIGNING),
        EcCurve::P384 => Ok(&signature::ECDSA_P384_SHA384_ASN1_SIGNING),
        #[cfg(feature = "aws-lc-rs")]
        EcCurve::P521 => Ok(&signature::ECDSA_P521_SHA512_ASN1_SIGNING),
        #[cfg(not(feature = "aws-lc-rs"))]
        EcCurve::P521 => Err(p521_unsupported()),
    }
}

fn verification_algorithm(curve: EcCurve) -> Result<&'static EcdsaVerificationAlgorithm> {
    match curve {
        EcCurve::P256 => Ok(&signature::ECDSA_P256_SHA256_FIXED),
        EcCurve::P384 => Ok(&signature::ECDSA_P384_SHA384_FIXED),
        #[cfg(feature = "aws-lc-rs")]
        EcCurve::P521 => Ok(&signature::ECDSA_P521_SHA512_FIXED),
        #[cfg(not(feature = "aws-lc-rs"))]
        EcCurve::P521 => Err(p521_unsupported()),
    }
}

#[cfg(not(feature = "aws-lc-rs"))]
fn p521_unsupported() -> Error {
    Error::UnsupportedAlgorithm("ES512 (P-521) requires the aws-lc-rs feature".to_string())
}
