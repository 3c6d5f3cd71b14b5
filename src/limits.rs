//! Size limit constants for input validation

/// Maximum length for a token string (256KB)
///
/// Headers may embed a full `x5c` certificate chain, so this is larger than
/// what a bare signed token needs.
pub(crate) const MAX_TOKEN_LENGTH: usize = 256 * 1024;

/// Maximum size for decoded header JSON (64KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 64 * 1024;

/// Maximum size for decoded payload JSON (128KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 128 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RSA-8192 signatures are 1024 bytes, every other supported algorithm is smaller
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

/// Maximum nesting depth accepted by the ASN.1 decoder
///
/// Certificates nest about ten levels deep; anything past this is treated as
/// corrupted input rather than recursed into.
pub(crate) const MAX_ASN1_DEPTH: usize = 64;
