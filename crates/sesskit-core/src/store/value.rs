//! Generic session value representation
//!
//! Values stored in a session must survive whatever persistence the backing
//! store uses, so they are restricted to a union of serializable kinds.
//! Arbitrary application types travel through [`SessionValue::encode`] /
//! [`SessionValue::decode`] as opaque JSON blobs.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A value stored in a session namespace
///
/// Equality and round-trip guarantees apply per kind: a `Bool` comes back a
/// `Bool`, a `Blob` byte-for-byte. The accessors are strict and never
/// coerce across kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionValue {
    /// Explicitly stored absence
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Opaque serialized payload, see [`SessionValue::encode`]
    Blob(Vec<u8>),
    /// Nested string-keyed mapping; the namespace slots are stored as maps
    Map(HashMap<String, SessionValue>),
}

impl SessionValue {
    /// Encode an arbitrary serializable value as an opaque blob
    pub fn encode<T: Serialize>(value: &T) -> Result<Self> {
        Ok(SessionValue::Blob(serde_json::to_vec(value)?))
    }

    /// Decode an opaque blob back into a concrete type
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            SessionValue::Blob(bytes) => Ok(serde_json::from_slice(bytes)?),
            other => Err(Error::InvalidArgument(format!(
                "Expected a blob value, found {}",
                other.kind()
            ))),
        }
    }

    /// Kind name, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            SessionValue::Null => "null",
            SessionValue::Bool(_) => "bool",
            SessionValue::Int(_) => "int",
            SessionValue::Float(_) => "float",
            SessionValue::Text(_) => "text",
            SessionValue::Blob(_) => "blob",
            SessionValue::Map(_) => "map",
        }
    }

    /// Whether this is the `Null` kind
    pub fn is_null(&self) -> bool {
        matches!(self, SessionValue::Null)
    }

    /// The boolean payload, if this is a `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SessionValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer payload, if this is an `Int`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SessionValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The float payload, if this is a `Float`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SessionValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The string payload, if this is a `Text`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SessionValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// The raw bytes, if this is a `Blob`
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            SessionValue::Blob(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The nested mapping, if this is a `Map`
    pub fn as_map(&self) -> Option<&HashMap<String, SessionValue>> {
        match self {
            SessionValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for SessionValue {
    fn from(value: bool) -> Self {
        SessionValue::Bool(value)
    }
}

impl From<i32> for SessionValue {
    fn from(value: i32) -> Self {
        SessionValue::Int(i64::from(value))
    }
}

impl From<i64> for SessionValue {
    fn from(value: i64) -> Self {
        SessionValue::Int(value)
    }
}

impl From<u32> for SessionValue {
    fn from(value: u32) -> Self {
        SessionValue::Int(i64::from(value))
    }
}

impl From<f64> for SessionValue {
    fn from(value: f64) -> Self {
        SessionValue::Float(value)
    }
}

impl From<&str> for SessionValue {
    fn from(value: &str) -> Self {
        SessionValue::Text(value.to_string())
    }
}

impl From<String> for SessionValue {
    fn from(value: String) -> Self {
        SessionValue::Text(value)
    }
}

impl From<Vec<u8>> for SessionValue {
    fn from(value: Vec<u8>) -> Self {
        SessionValue::Blob(value)
    }
}

impl From<HashMap<String, SessionValue>> for SessionValue {
    fn from(value: HashMap<String, SessionValue>) -> Self {
        SessionValue::Map(value)
    }
}
