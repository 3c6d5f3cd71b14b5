use super::{AlgorithmFamily, HashFunction};
use crate::error::{Error, Result};
use crate::keys::RsaPrivateDer;

// Select crypto backend based on features
#[cfg(feature = "aws-lc-rs")]
use aws_lc_rs::{
    rand::SystemRandom,
    signature::{self, KeyPair, RsaKeyPair, UnparsedPublicKey},
};
#[cfg(not(feature = "aws-lc-rs"))]
use ring::{
    rand::SystemRandom,
    signature::{self, KeyPair, RsaKeyPair, UnparsedPublicKey},
};

/// Validate an RSA private key and return its PKCS#1 public key
pub(crate) fn public_key(der: &RsaPrivateDer) -> Result<Vec<u8>> {
    let key_pair = key_pair(der)?;
    Ok(key_pair.public_key().as_ref().to_vec())
}

/// Sign with PKCS#1 v1.5 or PSS padding
pub(crate) fn sign(
    family: AlgorithmFamily,
    hash: HashFunction,
    der: &RsaPrivateDer,
    message: &[u8],
) -> Result<Vec<u8>> {
    let key_pair = key_pair(der)?;

    let mut signature = vec![0; key_pair.public_modulus_len()];
    key_pair
        .sign(
            padding(family, hash),
            &SystemRandom::new(),
            message,
            &mut signature,
        )
        .map_err(|e| Error::SigningFailed(format!("RSA: {e}")))?;

    Ok(signature)
}

/// Verify against a PKCS#1 `RSAPublicKey`
pub(crate) fn verify(
    family: AlgorithmFamily,
    hash: HashFunction,
    public_key_der: &[u8],
    message: &[u8],
    signature: &[u8],
) -> bool {
    UnparsedPublicKey::new(verification_algorithm(family, hash), public_key_der)
        .verify(message, signature)
        .is_ok()
}

fn key_pair(der: &RsaPrivateDer) -> Result<RsaKeyPair> {
    match der {
        RsaPrivateDer::Pkcs8(pkcs8) => RsaKeyPair::from_pkcs8(pkcs8)
            .map_err(|e| Error::KeyRejected(format!("RSA PKCS#8: {e}"))),
        RsaPrivateDer::Pkcs1(pkcs1) => RsaKeyPair::from_der(pkcs1)
            .map_err(|e| Error::KeyRejected(format!("RSA PKCS#1: {e}"))),
    }
}

fn padding(family: AlgorithmFamily, hash: HashFunction) -> &'static dyn signature::RsaEncoding {
    match (family, hash) {
        (AlgorithmFamily::RsaPss, HashFunction::Sha256) => &signature::RSA_PSS_SHA256,
        (AlgorithmFamily::RsaPss, HashFunction::Sha384) => &signature::RSA_PSS_SHA384,
        (AlgorithmFamily::RsaPss, HashFunction::Sha512) => &signature::RSA_PSS_SHA512,
        (_, HashFunction::Sha256) => &signature::RSA_PKCS1_SHA256,
        (_, HashFunction::Sha384) => &signature::RSA_PKCS1_SHA384,
        (_, HashFunction::Sha512) => &signature::RSA_PKCS1_SHA512,
    }
}

fn verification_algorithm(
    family: AlgorithmFamily,
    hash: HashFunction,
) -> &'static dyn signature::VerificationAlgorithm {
    match (family, hash) {
        (AlgorithmFamily::RsaPss, HashFunction::Sha256) => &signature::RSA_PSS_2048_8192_SHA256,
        (AlgorithmFamily::RsaPss, HashFunction::Sha384) => &signature::RSA_PSS_2048_8192_SHA384,
        (AlgorithmFamily::RsaPss, HashFunction::Sha512) => &signature::RSA_PSS_2048_8192_SHA512,
        (_, HashFunction::Sha256) => &signature::RSA_PKCS1_2048_8192_SHA256,
        (_, HashFunction::Sha384) => &signature::RSA_PKCS1_2048_8192_SHA384,
        (_, HashFunction::Sha512) => &signature::RSA_PKCS1_2048_8192_SHA512,
    }
}
