//! Decoding of snak values.
//!
//! The `value` member of a WikiData `datavalue` changes shape with the
//! property's datatype: external ids and URLs are plain strings, a handful of
//! legacy values are bare integers, and everything else (items, times,
//! coordinates, quantities, monolingual text) is an object. The shape is only
//! known once the token has been seen, so [`DynamicValue`] inspects the raw
//! JSON and picks its variant from the content.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::trace;

use crate::error::{Error, Result};

/// Discriminant of a [`DynamicValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Int,
    Struct,
}

/// A snak value, classified by the shape of its JSON token.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    /// A quoted string literal, with the surrounding quotes removed.
    String(String),
    /// A bare integer literal.
    Int(i64),
    /// An object, decoded into the fixed structured field set.
    Struct(Box<DataValueFields>),
}

impl DynamicValue {
    /// Classifies a raw JSON value token.
    ///
    /// Checks run in order: quoted string, integer, object. Strings are only
    /// unquoted; escape sequences stay as they appear in the token. Tokens
    /// that are none of the three (`true`, `null`, floats, arrays) end up in
    /// the object branch and fail there with [`Error::Decode`].
    pub fn from_json_bytes(raw: &[u8]) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::EmptyValue);
        }

        if raw.len() >= 2 && raw[0] == b'"' && raw[raw.len() - 1] == b'"' {
            let inner = String::from_utf8_lossy(&raw[1..raw.len() - 1]).into_owned();
            trace!(value = %inner, "string snak value");
            return Ok(DynamicValue::String(inner));
        }

        if let Some(i) = std::str::from_utf8(raw).ok().and_then(|s| s.parse::<i64>().ok()) {
            trace!(value = i, "integer snak value");
            return Ok(DynamicValue::Int(i));
        }

        let fields: DataValueFields = serde_json::from_slice(raw)?;
        trace!("structured snak value");
        Ok(DynamicValue::Struct(Box::new(fields)))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            DynamicValue::String(_) => ValueKind::String,
            DynamicValue::Int(_) => ValueKind::Int,
            DynamicValue::Struct(_) => ValueKind::Struct,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            DynamicValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&DataValueFields> {
        match self {
            DynamicValue::Struct(fields) => Some(fields),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for DynamicValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        DynamicValue::from_json_bytes(raw.get().as_bytes()).map_err(de::Error::custom)
    }
}

/// Fields of an object-shaped snak value.
///
/// Only a subset is meaningful for any one datatype; the rest stay at their
/// zero value. `null` is read as zero too, the API emits it for e.g. the
/// precision of some coordinates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataValueFields {
    #[serde(rename = "entity-type", deserialize_with = "null_as_default")]
    pub entity_type: String,
    #[serde(rename = "numeric-id", deserialize_with = "null_as_default")]
    pub numeric_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub value_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,

    // time
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub precision: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub before: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub after: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub timezone: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub calendarmodel: String,

    // globecoordinate
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub globe: String,

    // quantity
    #[serde(deserialize_with = "null_as_default")]
    pub amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lowerbound: String,
    #[serde(deserialize_with = "null_as_default")]
    pub upperbound: String,
    #[serde(deserialize_with = "null_as_default")]
    pub unit: String,

    // monolingualtext
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
