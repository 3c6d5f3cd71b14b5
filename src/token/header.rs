use super::fields::{self, NoFields};
use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// JOSE header
///
/// The registered fields are modelled directly; any further fields live in
/// the extension record `H` and are written at the same JSON level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Header<H = NoFields> {
    /// Signing algorithm (`alg`)
    pub algorithm: Algorithm,

    /// Token type (`typ`), typically "JWT"
    pub token_type: Option<String>,

    /// Content type (`cty`)
    pub content_type: Option<String>,

    /// Key ID (`kid`)
    pub key_id: Option<String>,

    /// DER certificates (`x5c`), carried as standard base64 on the wire
    pub certificate_chain: Option<Vec<Vec<u8>>>,

    /// Certificate chain URL (`x5u`)
    pub certificate_chain_url: Option<String>,

    /// Extensions the recipient must understand (`crit`)
    pub critical: Option<Vec<String>>,

    /// Caller-defined header fields
    pub fields: H,
}

#[derive(Serialize, Deserialize)]
struct RegisteredHeader {
    alg: Algorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x5c: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x5u: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    crit: Option<Vec<String>>,
}

impl<H: Default> Header<H> {
    /// Header with only the algorithm set
    pub fn new(algorithm: Algorithm) -> Self {
        Self::with_fields(algorithm, H::default())
    }
}

impl<H> Header<H> {
    /// Header with the algorithm and extension fields set
    pub fn with_fields(algorithm: Algorithm, fields: H) -> Self {
        Self {
            algorithm,
            token_type: None,
            content_type: None,
            key_id: None,
            certificate_chain: None,
            certificate_chain_url: None,
            critical: None,
            fields,
        }
    }

    pub(crate) fn to_json(&self) -> Result<Vec<u8>>
    where
        H: Serialize,
    {
        let registered = RegisteredHeader {
            alg: self.algorithm.clone(),
            typ: self.token_type.clone(),
            cty: self.content_type.clone(),
            kid: self.key_id.clone(),
            x5c: self
                .certificate_chain
                .as_ref()
                .map(|chain| chain.iter().map(|der| STANDARD.encode(der)).collect()),
            x5u: self.certificate_chain_url.clone(),
            crit: self.critical.clone(),
        };
        fields::merge_to_json(&registered, &self.fields)
    }

    pub(crate) fn from_json(bytes: &[u8]) -> Result<Self>
    where
        H: DeserializeOwned,
    {
        let (registered, fields): (RegisteredHeader, H) = fields::split_from_json(bytes)?;

        let certificate_chain = registered
            .x5c
            .map(|chain| {
                chain
                    .iter()
                    .map(|entry| {
                        STANDARD
                            .decode(entry)
                            .map_err(|_| Error::InvalidHeaderCertificateChain)
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        Ok(Self {
            algorithm: registered.alg,
            token_type: registered.typ,
            content_type: registered.cty,
            key_id: registered.kid,
            certificate_chain,
            certificate_chain_url: registered.x5u,
            critical: registered.crit,
            fields,
        })
    }
}
