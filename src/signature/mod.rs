//! Token signers and verifiers
//!
//! [`Signer`] and [`Verifier`] pair an algorithm family and digest with a
//! [`Key`]. They produce and accept signatures in the shape tokens carry on
//! the wire; for ECDSA that means fixed-width `r || s`, converted from and to
//! the DER form a [`CryptoProvider`] works with via [`transcode`].

pub mod transcode;

use crate::algorithm::{Algorithm, AlgorithmFamily, CryptoProvider, DefaultProvider, HashFunction};
use crate::error::{Error, Result};
use crate::keys::Key;

/// Signs token input with one algorithm and key
#[derive(Debug, Clone)]
pub enum Signer {
    Hmac { hash: HashFunction, key: Key },
    RsaPkcs1 { hash: HashFunction, key: Key },
    RsaPss { hash: HashFunction, key: Key },
    Ecdsa { hash: HashFunction, key: Key },
}

/// Checks token signatures for one algorithm and key
#[derive(Debug, Clone)]
pub enum Verifier {
    Hmac { hash: HashFunction, key: Key },
    RsaPkcs1 { hash: HashFunction, key: Key },
    RsaPss { hash: HashFunction, key: Key },
    Ecdsa { hash: HashFunction, key: Key },
}

impl Signer {
    /// Create a signer, checking that `key` can sign with `algorithm`
    pub fn new(algorithm: &Algorithm, key: Key) -> Result<Self> {
        let (family, hash) = algorithm
            .parts()
            .ok_or_else(|| Error::UnsupportedAlgorithm(algorithm.to_string()))?;

        match family {
            AlgorithmFamily::Hmac => key.as_symmetric(algorithm).map(|_| ())?,
            AlgorithmFamily::RsaPkcs1 | AlgorithmFamily::RsaPss => {
                key.as_rsa_private(algorithm).map(|_| ())?
            }
            AlgorithmFamily::Ecdsa => key.as_ec_private(algorithm).map(|_| ())?,
        }

        Ok(match family {
            AlgorithmFamily::Hmac => Signer::Hmac { hash, key },
            AlgorithmFamily::RsaPkcs1 => Signer::RsaPkcs1 { hash, key },
            AlgorithmFamily::RsaPss => Signer::RsaPss { hash, key },
            AlgorithmFamily::Ecdsa => Signer::Ecdsa { hash, key },
        })
    }

    /// HS256 signer over a shared secret
    pub fn hs256(secret: impl Into<Vec<u8>>) -> Self {
        Signer::Hmac {
            hash: HashFunction::Sha256,
            key: Key::symmetric(secret),
        }
    }

    /// HS384 signer over a shared secret
    pub fn hs384(secret: impl Into<Vec<u8>>) -> Self {
        Signer::Hmac {
            hash: HashFunction::Sha384,
            key: Key::symmetric(secret),
        }
    }

    /// HS512 signer over a shared secret
    pub fn hs512(secret: impl Into<Vec<u8>>) -> Self {
        Signer::Hmac {
            hash: HashFunction::Sha512,
            key: Key::symmetric(secret),
        }
    }

    /// Algorithm written into the `alg` header
    pub fn algorithm(&self) -> Algorithm {
        let (family, hash, _) = self.parts();
        Algorithm::from_parts(family, hash)
    }

    pub fn key(&self) -> &Key {
        self.parts().2
    }

    /// Sign with the default provider
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        self.sign_with(&DefaultProvider, message)
    }

    /// Sign through `provider`, returning the token's signature bytes
    pub fn sign_with(&self, provider: &dyn CryptoProvider, message: &[u8]) -> Result<Vec<u8>> {
        let algorithm = self.algorithm();
        let signature = provider.sign(&algorithm, self.key(), message)?;

        match self {
            Signer::Ecdsa { key, .. } => {
                transcode::der_to_raw(&signature, key.metadata().size_bytes)
            }
            _ => Ok(signature),
        }
    }

    /// Verifier for signatures this signer produces
    ///
    /// Asymmetric signers hand over only their public key.
    pub fn verifier(&self) -> Verifier {
        let (family, hash, key) = self.parts();
        let key = key.public_key().unwrap_or_else(|| key.clone());

        match family {
            AlgorithmFamily::Hmac => Verifier::Hmac { hash, key },
            AlgorithmFamily::RsaPkcs1 => Verifier::RsaPkcs1 { hash, key },
            AlgorithmFamily::RsaPss => Verifier::RsaPss { hash, key },
            AlgorithmFamily::Ecdsa => Verifier::Ecdsa { hash, key },
        }
    }

    fn parts(&self) -> (AlgorithmFamily, HashFunction, &Key) {
        match self {
            Signer::Hmac { hash, key } => (AlgorithmFamily::Hmac, *hash, key),
            Signer::RsaPkcs1 { hash, key } => (AlgorithmFamily::RsaPkcs1, *hash, key),
            Signer::RsaPss { hash, key } => (AlgorithmFamily::RsaPss, *hash, key),
            Signer::Ecdsa { hash, key } => (AlgorithmFamily::Ecdsa, *hash, key),
        }
    }
}

impl Verifier {
    /// Create a verifier, checking that `key` can verify `algorithm`
    pub fn new(algorithm: &Algorithm, key: Key) -> Result<Self> {
        let (family, hash) = algorithm
            .parts()
            .ok_or_else(|| Error::UnsupportedAlgorithm(algorithm.to_string()))?;

        match family {
            AlgorithmFamily::Hmac => key.as_symmetric(algorithm).map(|_| ())?,
            AlgorithmFamily::RsaPkcs1 | AlgorithmFamily::RsaPss => {
                key.as_rsa_public(algorithm).map(|_| ())?
            }
            AlgorithmFamily::Ecdsa => key.as_ec_public(algorithm).map(|_| ())?,
        }

        Ok(match family {
            AlgorithmFamily::Hmac => Verifier::Hmac { hash, key },
            AlgorithmFamily::RsaPkcs1 => Verifier::RsaPkcs1 { hash, key },
            AlgorithmFamily::RsaPss => Verifier::RsaPss { hash, key },
            AlgorithmFamily::Ecdsa => Verifier::Ecdsa { hash, key },
        })
    }

    /// HS256 verifier over a shared secret
    pub fn hs256(secret: impl Into<Vec<u8>>) -> Self {
        Verifier::Hmac {
            hash: HashFunction::Sha256,
            key: Key::symmetric(secret),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        let (family, hash, _) = self.parts();
        Algorithm::from_parts(family, hash)
    }

    pub fn key(&self) -> &Key {
        self.parts().2
    }

    /// Verify with the default provider
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        self.verify_with(&DefaultProvider, message, signature)
    }

    /// Verify through `provider`; any failure is reported as `false`
    pub fn verify_with(&self, provider: &dyn CryptoProvider, message: &[u8], signature: &[u8]) -> bool {
        let algorithm = self.algorithm();

        match self {
            Verifier::Ecdsa { key, .. } => {
                match transcode::raw_to_der(signature, key.metadata().size_bytes) {
                    Ok(der) => provider.verify(&algorithm, key, message, &der),
                    Err(e) => {
                        tracing::debug!("ECDSA signature has the wrong shape: {e}");
                        false
                    }
                }
            }
            _ => provider.verify(&algorithm, self.key(), message, signature),
        }
    }

    fn parts(&self) -> (AlgorithmFamily, HashFunction, &Key) {
        match self {
            Verifier::Hmac { hash, key } => (AlgorithmFamily::Hmac, *hash, key),
            Verifier::RsaPkcs1 { hash, key } => (AlgorithmFamily::RsaPkcs1, *hash, key),
            Verifier::RsaPss { hash, key } => (AlgorithmFamily::RsaPss, *hash, key),
            Verifier::Ecdsa { hash, key } => (AlgorithmFamily::Ecdsa, *hash, key),
        }
    }
}
