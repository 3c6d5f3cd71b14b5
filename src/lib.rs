//! # jwtforge - Compact JWTs with a self-contained ASN.1 codec
//!
//! **jwtforge** issues and verifies JSON Web Tokens in the compact serialization
//! (`header.payload.signature`). Keys arrive as DER containers and are inspected
//! with the crate's own BER/DER codec, which is also public for working with
//! certificates, PKCS#7 structures and object identifiers directly.
//!
//! ## Quick Start
//!
//! ```
//! use jwtforge::{Payload, Signer, StandardToken};
//!
//! let signer = Signer::hs256(b"your-256-bit-secret".to_vec());
//!
//! let mut payload = Payload::new();
//! payload.subject = Some("1234567890".to_string());
//!
//! let token = StandardToken::encode_payload(payload, Some(&signer)).unwrap();
//! let wire = token.to_string();
//!
//! let parsed = StandardToken::parse(&wire).unwrap();
//! assert!(parsed.validate_signature(&signer.verifier()));
//! assert_eq!(parsed.payload().subject.as_deref(), Some("1234567890"));
//! ```
//!
//! ## Custom Fields
//!
//! Header and payload are generic over caller-defined records which are
//! flattened next to the registered fields:
//!
//! ```
//! use jwtforge::{NoFields, Payload, Token};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Claims {
//!     admin: bool,
//! }
//!
//! let payload = Payload::with_claims(Claims { admin: true });
//! let token = Token::<NoFields, Claims>::encode_payload(payload, None).unwrap();
//! let parsed = Token::<NoFields, Claims>::parse(&token.to_string()).unwrap();
//! assert!(parsed.payload().claims.admin);
//! ```
//!
//! ## Algorithm Support
//!
//! - **HMAC**: HS256, HS384, HS512
//! - **RSA PKCS#1 v1.5**: RS256, RS384, RS512
//! - **RSA-PSS**: PS256, PS384, PS512
//! - **ECDSA**: ES256, ES384 (ES512 with the `aws-lc-rs` feature)
//!
//! Unsigned tokens (`alg: none`) can be issued and parsed, but never pass
//! [`Token::validate_signature`].
//!
//! ## Features
//!
//! - **`aws-lc-rs`**: Use `aws-lc-rs` instead of `ring` for RSA/ECDSA
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515) JSON Web Signature (JWS)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519) JSON Web Token (JWT)
//! - [X.690](https://www.itu.int/rec/T-REC-X.690) BER/DER encoding rules

// Core modules
pub mod error;
pub(crate) mod limits;
pub mod utils;

// Encoding
pub mod asn1;

// Algorithms and keys
pub mod algorithm;
pub mod keys;
pub mod signature;

// Token types
pub mod token;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use token::{Audience, Header, NoFields, Payload, StandardToken, Token};

pub use algorithm::{Algorithm, CryptoProvider, DefaultProvider};
pub use keys::{EcCurve, Key, KeyMetadata, KeyType};
pub use signature::{Signer, Verifier};

pub use error::{Asn1Error, Error, Result};
