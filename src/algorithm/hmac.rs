use super::HashFunction;
use crate::error::{Error, Result};

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// Compute an HMAC tag over `message`
pub(crate) fn sign(hash: HashFunction, secret: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let tag = match hash {
        HashFunction::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(secret).map_err(rejected)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        HashFunction::Sha384 => {
            let mut mac = Hmac::<Sha384>::new_from_slice(secret).map_err(rejected)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        HashFunction::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(secret).map_err(rejected)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(tag)
}

/// Verify an HMAC tag with constant-time comparison
pub(crate) fn verify(hash: HashFunction, secret: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Ok(expected) = sign(hash, secret, message) else {
        return false;
    };

    if signature.len() != expected.len() {
        return false;
    }

    constant_time_eq(signature, &expected)
}

fn rejected(e: hmac::digest::InvalidLength) -> Error {
    Error::KeyRejected(format!("HMAC key: {e}"))
}
