use super::{Algorithm, AlgorithmFamily, ecdsa, hmac, rsa};
use crate::error::{Error, Result};
use crate::keys::Key;

/// Cryptographic operations behind token signing and verification
///
/// ECDSA signatures are exchanged in DER (`SEQUENCE { r, s }`) form; the
/// token layer converts to and from the fixed-width JWS encoding. Every other
/// family uses the signature bytes as they appear in the token.
///
/// Verification reports failure as `false` and never as an error, so a
/// provider has no channel to tell a caller why a signature was rejected.
pub trait CryptoProvider: Send + Sync {
    /// Sign `message` with `key`
    fn sign(&self, algorithm: &Algorithm, key: &Key, message: &[u8]) -> Result<Vec<u8>>;

    /// Check `signature` over `message` with `key`
    fn verify(&self, algorithm: &Algorithm, key: &Key, message: &[u8], signature: &[u8]) -> bool;
}

/// Provider backed by `hmac`/`sha2` and `ring` (or `aws-lc-rs`)
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProvider;

impl CryptoProvider for DefaultProvider {
    fn sign(&self, algorithm: &Algorithm, key: &Key, message: &[u8]) -> Result<Vec<u8>> {
        let (family, hash) = algorithm
            .parts()
            .ok_or_else(|| Error::UnsupportedAlgorithm(algorithm.to_string()))?;

        match family {
            AlgorithmFamily::Hmac => {
                hmac::sign(hash, key.as_symmetric(algorithm)?.as_bytes(), message)
            }
            AlgorithmFamily::RsaPkcs1 | AlgorithmFamily::RsaPss => {
                let private = key.as_rsa_private(algorithm)?;
                rsa::sign(family, hash, private.der(), message)
            }
            AlgorithmFamily::Ecdsa => {
                let private = key.as_ec_private(algorithm)?;
                ecdsa::sign(
                    private.curve(),
                    private.encoding(),
                    private.public().as_bytes(),
                    message,
                )
            }
        }
    }

    fn verify(&self, algorithm: &Algorithm, key: &Key, message: &[u8], signature: &[u8]) -> bool {
        let Some((family, hash)) = algorithm.parts() else {
            tracing::debug!(algorithm = %algorithm, "No verifier for algorithm");
            return false;
        };

        let outcome = match family {
            AlgorithmFamily::Hmac => key
                .as_symmetric(algorithm)
                .map(|secret| hmac::verify(hash, secret.as_bytes(), message, signature)),
            AlgorithmFamily::RsaPkcs1 | AlgorithmFamily::RsaPss => {
                key.as_rsa_public(algorithm).map(|public| {
                    rsa::verify(family, hash, public.as_der(), message, signature)
                })
            }
            AlgorithmFamily::Ecdsa => key.as_ec_public(algorithm).map(|public| {
                ecdsa::verify(public.curve(), public.as_bytes(), message, signature)
            }),
        };

        outcome.unwrap_or_else(|e| {
            tracing::debug!(algorithm = %algorithm, error = %e, "Key unusable for verification");
            false
        })
    }
}
