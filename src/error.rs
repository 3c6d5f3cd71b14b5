//! Error types for token, key and ASN.1 processing
//!
//! Signature verification never produces an error: a rejected signature is
//! reported as `false` by the verification functions. The variants below cover
//! malformed input, issuance contract violations and provider failures.

use thiserror::Error;

/// Errors that can occur while parsing, building or signing tokens
#[derive(Error, Debug)]
pub enum Error {
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid token structure: expected three parts separated by '.'")]
    InvalidTokenStructure,

    #[error("Base64URL decoding failed: {0}")]
    InvalidBase64UrlEncoding(String),

    /// Header or payload JSON could not be encoded or decoded.
    ///
    /// The underlying `serde_json` error is kept as-is so callers can tell a
    /// missing field from a type mismatch or a syntax error.
    #[error("JSON processing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Header certificate chain entry is not valid base64")]
    InvalidHeaderCertificateChain,

    // ============================================================================
    // Issuance Errors
    // ============================================================================
    #[error("Header algorithm '{header}' does not match signer algorithm '{signer}'")]
    HeaderAndSignerAlgorithmMismatch { header: String, signer: String },

    // ============================================================================
    // Binary Structure Errors
    // ============================================================================
    #[error(transparent)]
    Asn1(#[from] Asn1Error),

    #[error("Invalid ECDSA signature pair size: expected {expected} bytes, found {found}")]
    InvalidSignaturePairSize { expected: usize, found: usize },

    // ============================================================================
    // Key and Provider Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not supported by the crypto provider")]
    UnsupportedAlgorithm(String),

    #[error(
        "Key type mismatch for algorithm '{algorithm}': expected {expected_key_type}, got {actual_key_type}"
    )]
    KeyTypeMismatch {
        algorithm: String,
        expected_key_type: String,
        actual_key_type: String,
    },

    #[error("Key rejected: {0}")]
    KeyRejected(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

/// Errors raised while decoding BER/DER structures
///
/// Each variant carries a short description of what was being read when the
/// problem was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Asn1Error {
    /// The node exists but is not of the requested type
    #[error("ASN.1 type mismatch: {0}")]
    TypeMismatch(String),

    /// A required child node is absent
    #[error("ASN.1 value not found: {0}")]
    ValueNotFound(String),

    /// The encoding itself is malformed or truncated
    #[error("ASN.1 data corrupted: {0}")]
    DataCorrupted(String),
}

impl Asn1Error {
    pub(crate) fn corrupted(details: impl Into<String>) -> Self {
        Asn1Error::DataCorrupted(details.into())
    }

    pub(crate) fn mismatch(details: impl Into<String>) -> Self {
        Asn1Error::TypeMismatch(details.into())
    }

    pub(crate) fn not_found(details: impl Into<String>) -> Self {
        Asn1Error::ValueNotFound(details.into())
    }
}

/// Result type alias for jwtforge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for the ASN.1 codec
pub type Asn1Result<T> = std::result::Result<T, Asn1Error>;
