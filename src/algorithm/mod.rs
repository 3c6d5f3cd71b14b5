mod traits;

pub(crate) mod ecdsa;
pub(crate) mod hmac;
pub(crate) mod rsa;

pub use traits::{CryptoProvider, DefaultProvider};

use crate::keys::EcCurve;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Algorithm identifier from the `alg` header field
///
/// Unrecognised identifiers are kept verbatim in [`Algorithm::Other`] so a
/// header naming an algorithm this crate cannot process still parses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Algorithm {
    /// Unsecured token, empty signature
    None,

    /// HMAC with SHA-256
    HS256,

    /// HMAC with SHA-384
    HS384,

    /// HMAC with SHA-512
    HS512,

    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,

    /// RSASSA-PKCS1-v1_5 with SHA-384
    RS384,

    /// RSASSA-PKCS1-v1_5 with SHA-512
    RS512,

    /// ECDSA with P-256 and SHA-256
    ES256,

    /// ECDSA with P-384 and SHA-384
    ES384,

    /// ECDSA with P-521 and SHA-512
    ES512,

    /// RSASSA-PSS with SHA-256 and MGF1
    PS256,

    /// RSASSA-PSS with SHA-384 and MGF1
    PS384,

    /// RSASSA-PSS with SHA-512 and MGF1
    PS512,

    /// Any other identifier
    Other(String),
}

/// Digest used by an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashFunction {
    Sha256,
    Sha384,
    Sha512,
}

/// Signature scheme of an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    Hmac,
    RsaPkcs1,
    RsaPss,
    Ecdsa,
}

impl Algorithm {
    /// Identifier as it appears in the header
    pub fn as_str(&self) -> &str {
        match self {
            Algorithm::None => "none",
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
            Algorithm::RS256 => "RS256",
            Algorithm::RS384 => "RS384",
            Algorithm::RS512 => "RS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES384 => "ES384",
            Algorithm::ES512 => "ES512",
            Algorithm::PS256 => "PS256",
            Algorithm::PS384 => "PS384",
            Algorithm::PS512 => "PS512",
            Algorithm::Other(name) => name,
        }
    }

    /// Build an identifier from a family and digest
    pub fn from_parts(family: AlgorithmFamily, hash: HashFunction) -> Self {
        use AlgorithmFamily::*;
        use HashFunction::*;

        match (family, hash) {
            (Hmac, Sha256) => Algorithm::HS256,
            (Hmac, Sha384) => Algorithm::HS384,
            (Hmac, Sha512) => Algorithm::HS512,
            (RsaPkcs1, Sha256) => Algorithm::RS256,
            (RsaPkcs1, Sha384) => Algorithm::RS384,
            (RsaPkcs1, Sha512) => Algorithm::RS512,
            (RsaPss, Sha256) => Algorithm::PS256,
            (RsaPss, Sha384) => Algorithm::PS384,
            (RsaPss, Sha512) => Algorithm::PS512,
            (Ecdsa, Sha256) => Algorithm::ES256,
            (Ecdsa, Sha384) => Algorithm::ES384,
            (Ecdsa, Sha512) => Algorithm::ES512,
        }
    }

    /// Family and digest, `None` for `none` and unknown identifiers
    pub fn parts(&self) -> Option<(AlgorithmFamily, HashFunction)> {
        use AlgorithmFamily::*;
        use HashFunction::*;

        match self {
            Algorithm::HS256 => Some((Hmac, Sha256)),
            Algorithm::HS384 => Some((Hmac, Sha384)),
            Algorithm::HS512 => Some((Hmac, Sha512)),
            Algorithm::RS256 => Some((RsaPkcs1, Sha256)),
            Algorithm::RS384 => Some((RsaPkcs1, Sha384)),
            Algorithm::RS512 => Some((RsaPkcs1, Sha512)),
            Algorithm::PS256 => Some((RsaPss, Sha256)),
            Algorithm::PS384 => Some((RsaPss, Sha384)),
            Algorithm::PS512 => Some((RsaPss, Sha512)),
            Algorithm::ES256 => Some((Ecdsa, Sha256)),
            Algorithm::ES384 => Some((Ecdsa, Sha384)),
            Algorithm::ES512 => Some((Ecdsa, Sha512)),
            Algorithm::None | Algorithm::Other(_) => None,
        }
    }

    pub fn family(&self) -> Option<AlgorithmFamily> {
        self.parts().map(|(family, _)| family)
    }

    pub fn hash(&self) -> Option<HashFunction> {
        self.parts().map(|(_, hash)| hash)
    }

    /// Curve an ECDSA algorithm is bound to
    pub fn curve(&self) -> Option<EcCurve> {
        match self {
            Algorithm::ES256 => Some(EcCurve::P256),
            Algorithm::ES384 => Some(EcCurve::P384),
            Algorithm::ES512 => Some(EcCurve::P521),
            _ => None,
        }
    }

    /// Check if algorithm is HMAC-based (symmetric)
    pub fn is_symmetric(&self) -> bool {
        self.family() == Some(AlgorithmFamily::Hmac)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Algorithm::from(s))
    }
}

impl From<&str> for Algorithm {
    fn from(s: &str) -> Self {
        match s {
            "none" => Algorithm::None,
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            "RS256" => Algorithm::RS256,
            "RS384" => Algorithm::RS384,
            "RS512" => Algorithm::RS512,
            "ES256" => Algorithm::ES256,
            "ES384" => Algorithm::ES384,
            "ES512" => Algorithm::ES512,
            "PS256" => Algorithm::PS256,
            "PS384" => Algorithm::PS384,
            "PS512" => Algorithm::PS512,
            other => Algorithm::Other(other.to_string()),
        }
    }
}

impl Serialize for Algorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Algorithm::from(name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("HS256".parse::<Algorithm>().unwrap(), Algorithm::HS256);
        assert_eq!("ES512".parse::<Algorithm>().unwrap(), Algorithm::ES512);
        assert_eq!("none".parse::<Algorithm>().unwrap(), Algorithm::None);
        assert_eq!(
            "EdDSA".parse::<Algorithm>().unwrap(),
            Algorithm::Other("EdDSA".to_string())
        );
        // Identifiers are case-sensitive
        assert_eq!(
            Algorithm::from("hs256"),
            Algorithm::Other("hs256".to_string())
        );
    }

    #[test]
    fn test_parts_round_trip() {
        for name in [
            "HS256", "HS384", "HS512", "RS256", "RS384", "RS512", "ES256", "ES384", "ES512",
            "PS256", "PS384", "PS512",
        ] {
            let algorithm = Algorithm::from(name);
            let (family, hash) = algorithm.parts().unwrap();
            assert_eq!(Algorithm::from_parts(family, hash), algorithm);
            assert_eq!(algorithm.as_str(), name);
        }
        assert!(Algorithm::None.parts().is_none());
        assert!(Algorithm::Other("X".into()).parts().is_none());
    }

    #[test]
    fn test_curve_binding() {
        assert_eq!(Algorithm::ES256.curve(), Some(EcCurve::P256));
        assert_eq!(Algorithm::ES512.curve(), Some(EcCurve::P521));
        assert_eq!(Algorithm::RS256.curve(), None);
        assert!(Algorithm::HS384.is_symmetric());
        assert!(!Algorithm::PS256.is_symmetric());
    }

    #[test]
    fn test_serde_as_string() {
        assert_eq!(
            serde_json::to_string(&Algorithm::PS384).unwrap(),
            "\"PS384\""
        );
        let parsed: Algorithm = serde_json::from_str("\"foo\"").unwrap();
        assert_eq!(parsed, Algorithm::Other("foo".to_string()));
        assert!(serde_json::from_str::<Algorithm>("42").is_err());
    }
}
