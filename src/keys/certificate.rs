//! Minimal X.509 navigation
//!
//! Only the path down to `subjectPublicKeyInfo` is walked. Signatures,
//! validity and extensions are left to the caller.

use crate::asn1::{Node, TagClass, UniversalTag};
use crate::error::{Asn1Error, Result};

/// Locate `tbsCertificate.subjectPublicKeyInfo`
pub(super) fn subject_public_key_info(certificate: &Node) -> Result<&Node> {
    expect_sequence(certificate, "Certificate")?;
    let tbs = certificate.child(0)?;
    expect_sequence(tbs, "TBSCertificate")?;

    // version is an optional [0] EXPLICIT field in front of serialNumber
    let has_version = tbs.get(0).is_some_and(|first| {
        first.tag_class() == TagClass::ContextSpecific && first.tag_number() == 0
    });
    let index = if has_version { 6 } else { 5 };

    let spki = tbs.child(index)?;
    expect_sequence(spki, "SubjectPublicKeyInfo")?;
    Ok(spki)
}

fn expect_sequence(node: &Node, what: &str) -> Result<()> {
    if node.universal_tag() == Some(UniversalTag::Sequence) && node.is_constructed() {
        Ok(())
    } else {
        Err(Asn1Error::mismatch(format!("{what} is not a SEQUENCE")).into())
    }
}
