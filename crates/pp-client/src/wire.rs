//! Conversion between records and PayPal's JSON wire format.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ErrorInfo, ErrorKind, Result};

/// Records that mirror a PayPal JSON object.
///
/// Implemented for every serde record; keys follow PayPal's snake_case names
/// and empty fields are omitted.
pub trait WireFormat: Sized {
    /// Serialize into a JSON object.
    fn to_wire_format(&self) -> Map<String, Value>;

    /// Build from a parsed JSON value.
    fn from_wire_format(value: &Value) -> Result<Self>;

    /// Build from raw JSON bytes.
    fn from_wire_bytes(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_wire_format(&value)
    }
}

impl<T> WireFormat for T
where
    T: Serialize + DeserializeOwned,
{
    fn to_wire_format(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    fn from_wire_format(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ErrorInfo::new(
                ErrorKind::JsonParsingError,
                "Expected a JSON object",
            ));
        }
        Ok(T::deserialize(value)?)
    }
}
