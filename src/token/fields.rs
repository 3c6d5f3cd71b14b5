//! Merging standard fields with caller-defined extension fields
//!
//! Header and payload documents are flat JSON objects. The registered keys
//! are handled by a fixed internal struct; everything else belongs to the
//! caller's extension record. Encoding serializes both to objects and merges
//! them, decoding reads both from the same parsed document.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extension record with no fields of its own
///
/// Unknown keys are ignored when decoding into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoFields {}

/// Serialize `standard` and `extension` into one JSON object
///
/// On a key collision the standard field wins. An extension serializing to
/// `null` contributes nothing; any other non-object is rejected.
pub(crate) fn merge_to_json<S, E>(standard: &S, extension: &E) -> Result<Vec<u8>>
where
    S: Serialize,
    E: Serialize,
{
    let mut object = match serde_json::to_value(standard)? {
        Value::Object(object) => object,
        _ => Map::new(),
    };

    match serde_json::to_value(extension)? {
        Value::Object(extra) => {
            for (key, value) in extra {
                object.entry(key).or_insert(value);
            }
        }
        Value::Null => {}
        other => {
            return Err(Error::Json(serde::ser::Error::custom(format!(
                "extension fields must serialize to a JSON object, got {}",
                json_kind(&other)
            ))));
        }
    }

    Ok(serde_json::to_vec(&Value::Object(object))?)
}

/// Decode `standard` and `extension` from the same JSON object
pub(crate) fn split_from_json<S, E>(bytes: &[u8]) -> Result<(S, E)>
where
    S: DeserializeOwned,
    E: DeserializeOwned,
{
    let document: Value = serde_json::from_slice(bytes)?;
    if !document.is_object() {
        return Err(Error::Json(serde::de::Error::custom(format!(
            "expected a JSON object, got {}",
            json_kind(&document)
        ))));
    }

    let standard = S::deserialize(&document)?;
    let extension = E::deserialize(&document)?;
    Ok((standard, extension))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
