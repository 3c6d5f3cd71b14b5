use super::fields::{self, NoFields};
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// Token claims
///
/// Time claims are decoded from (possibly fractional) epoch seconds and
/// encoded as whole seconds, truncated toward zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Payload<C = NoFields> {
    /// Issuer (`iss`)
    pub issuer: Option<String>,

    /// Subject (`sub`)
    pub subject: Option<String>,

    /// Audience (`aud`)
    pub audience: Option<Audience>,

    /// Expiration time (`exp`)
    pub expiration_time: Option<SystemTime>,

    /// Not before (`nbf`)
    pub not_before: Option<SystemTime>,

    /// Issued at (`iat`)
    pub issued_at: Option<SystemTime>,

    /// Token ID (`jti`)
    pub token_id: Option<String>,

    /// Caller-defined claims
    pub claims: C,
}

/// The `aud` claim, either a single string or an array of strings
///
/// Both forms compare and hash by the audiences they list, so
/// `Single("a")` equals `Multiple(vec!["a"])`.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    /// All listed audiences
    pub fn as_slice(&self) -> &[String] {
        match self {
            Audience::Single(audience) => std::slice::from_ref(audience),
            Audience::Multiple(audiences) => audiences,
        }
    }

    pub fn contains(&self, audience: &str) -> bool {
        self.as_slice().iter().any(|a| a == audience)
    }
}

impl PartialEq for Audience {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Hash for Audience {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.as_slice().hash(state);
    }
}

impl From<&str> for Audience {
    fn from(audience: &str) -> Self {
        Audience::Single(audience.to_string())
    }
}

impl From<Vec<String>> for Audience {
    fn from(audiences: Vec<String>) -> Self {
        Audience::Multiple(audiences)
    }
}

#[derive(Serialize, Deserialize)]
struct RegisteredClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aud: Option<Audience>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "epoch_seconds")]
    exp: Option<SystemTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "epoch_seconds")]
    nbf: Option<SystemTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "epoch_seconds")]
    iat: Option<SystemTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jti: Option<String>,
}

impl<C: Default> Payload<C> {
    /// Payload with no claims set
    pub fn new() -> Self {
        Self::with_claims(C::default())
    }
}

impl<C: Default> Default for Payload<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Payload<C> {
    /// Payload carrying the given extension claims
    pub fn with_claims(claims: C) -> Self {
        Self {
            issuer: None,
            subject: None,
            audience: None,
            expiration_time: None,
            not_before: None,
            issued_at: None,
            token_id: None,
            claims,
        }
    }

    pub(crate) fn to_json(&self) -> Result<Vec<u8>>
    where
        C: Serialize,
    {
        let registered = RegisteredClaims {
            iss: self.issuer.clone(),
            sub: self.subject.clone(),
            aud: self.audience.clone(),
            exp: self.expiration_time,
            nbf: self.not_before,
            iat: self.issued_at,
            jti: self.token_id.clone(),
        };
        fields::merge_to_json(&registered, &self.claims)
    }

    pub(crate) fn from_json(bytes: &[u8]) -> Result<Self>
    where
        C: DeserializeOwned,
    {
        let (registered, claims): (RegisteredClaims, C) = fields::split_from_json(bytes)?;
        Ok(Self {
            issuer: registered.iss,
            subject: registered.sub,
            audience: registered.aud,
            expiration_time: registered.exp,
            not_before: registered.nbf,
            issued_at: registered.iat,
            token_id: registered.jti,
            claims,
        })
    }
}

/// `Option<SystemTime>` as numeric seconds since the Unix epoch
mod epoch_seconds {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub(super) fn serialize<S: Serializer>(
        time: &Option<SystemTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_i64(to_seconds(*time)),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<SystemTime>, D::Error> {
        match Option::<f64>::deserialize(deserializer)? {
            Some(seconds) => from_seconds(seconds)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("timestamp {seconds} out of range"))),
            None => Ok(None),
        }
    }

    fn to_seconds(time: SystemTime) -> i64 {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_secs())
                .map(|secs| -secs)
                .unwrap_or(i64::MIN),
        }
    }

    fn from_seconds(seconds: f64) -> Option<SystemTime> {
        if seconds >= 0.0 {
            let offset = Duration::try_from_secs_f64(seconds).ok()?;
            UNIX_EPOCH.checked_add(offset)
        } else {
            let offset = Duration::try_from_secs_f64(-seconds).ok()?;
            UNIX_EPOCH.checked_sub(offset)
        }
    }
}
