//! Helpers for raw registry documents

use serde_json::{Map, Value};

use market_meta::normalize::UNKNOWN_EXTENSION_NAME;

use crate::{Error, Result};

/// The `extensions` array of a registry document.
pub fn extensions(doc: &Value) -> Result<&Vec<Value>> {
    doc.get("extensions")
        .and_then(Value::as_array)
        .ok_or(Error::MissingExtensions)
}

/// Mutable access to the `extensions` array.
pub fn extensions_mut(doc: &mut Value) -> Result<&mut Vec<Value>> {
    doc.get_mut("extensions")
        .and_then(Value::as_array_mut)
        .ok_or(Error::MissingExtensions)
}

/// An extension record as a JSON object.
pub fn as_object(ext: &Value, index: usize) -> Result<&Map<String, Value>> {
    ext.as_object().ok_or(Error::NotAnObject { index })
}

pub fn as_object_mut(ext: &mut Value, index: usize) -> Result<&mut Map<String, Value>> {
    ext.as_object_mut().ok_or(Error::NotAnObject { index })
}

/// Display name of a record for progress output.
pub fn display_name(ext: &Map<String, Value>) -> String {
    ext.get("name")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_EXTENSION_NAME)
        .to_string()
}

/// String value of `key`, if present and non-empty.
pub fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}
