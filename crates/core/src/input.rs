//! Helpers for raw client payloads.
//!
//! Payload structs keep every field optional so that a malformed submission
//! still reaches validation. The deserializers here extend that to values of
//! the wrong JSON type, which are read as absent instead of failing the
//! whole body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Longest accepted name, e-mail or description, in characters.
pub const MAX_TEXT_LEN: usize = 255;

/// Returns true if `text` does not fit a `VARCHAR(MAX_TEXT_LEN)` column.
#[must_use]
pub fn exceeds_text_len(text: &str) -> bool {
    text.chars().count() > MAX_TEXT_LEN
}

/// Reads an optional field, mapping a value of the wrong type to `None`.
///
/// Use with `#[serde(default, deserialize_with = "...")]`.
///
/// # Errors
///
/// Fails only if the input is not valid JSON.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Reads an optional list whose entries are read leniently.
///
/// Anything that is not an array becomes `None`. An entry that does not
/// match `T` becomes `T::default()`, so its position is kept and its own
/// fields are reported as missing.
///
/// # Errors
///
/// Fails only if the input is not valid JSON.
pub fn lenient_entries<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        entries
            .into_iter()
            .map(|entry| serde_json::from_value(entry).unwrap_or_default())
            .collect(),
    ))
}

/// Reads a whole payload, falling back to an empty one when the body is not
/// a JSON object.
#[must_use]
pub fn from_json<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(value).unwrap_or_default()
}
