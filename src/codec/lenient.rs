//! Field-level decode helpers used through `#[serde(deserialize_with = ...)]`.
//!
//! Each helper first captures the raw JSON value, then decides whether a
//! mismatch is coerced to the field's default or reported. Optional scalars
//! and enums never fail; records and lists only fall back to their default
//! when the JSON value has the wrong shape altogether. Maps drop bad entries
//! one at a time.

use serde::de::{DeserializeOwned, Error};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Optional scalar or enum: `null`, a missing key or any undecodable value
/// become `None`.
pub(crate) fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match T::deserialize(value) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(err) => {
            tracing::debug!(error = %err, "coerced optional field to absent");
            Ok(None)
        }
    }
}

/// Defaulted scalar: any undecodable value becomes `T::default()`.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(option(deserializer)?.unwrap_or_default())
}

/// Optional record: anything but an object becomes `None`, an object is
/// decoded strictly.
pub(crate) fn record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    strict_if(value, Value::is_object)
}

/// Record that is required on the wire but has a default shape.
pub(crate) fn record_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(record(deserializer)?.unwrap_or_default())
}

/// Defaulted collection: anything but an array becomes empty.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(list_option(deserializer)?.unwrap_or_default())
}

/// Optional collection where an empty array is distinct from absence.
pub(crate) fn list_option<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    strict_if(value, Value::is_array)
}

/// Defaulted map: anything but an object becomes empty, and entries whose key
/// or value does not decode are dropped one by one.
pub(crate) fn map<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: DeserializeOwned + Ord,
    V: DeserializeOwned,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };
    let decoded = entries
        .into_iter()
        .filter_map(|(key, value)| {
            let entry = K::deserialize(Value::String(key.clone()))
                .and_then(|decoded_key| V::deserialize(value).map(|decoded| (decoded_key, decoded)));
            match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::debug!(key = %key, error = %err, "dropped undecodable map entry");
                    None
                }
            }
        })
        .collect();
    Ok(decoded)
}

fn strict_if<T, E>(value: Value, has_shape: fn(&Value) -> bool) -> Result<Option<T>, E>
where
    T: DeserializeOwned,
    E: Error,
{
    if !has_shape(&value) {
        if !value.is_null() {
            tracing::debug!(found = json_kind(&value), "coerced mis-shaped field to default");
        }
        return Ok(None);
    }
    T::deserialize(value).map(Some).map_err(E::custom)
}

/// Human readable name of a JSON value's kind.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
