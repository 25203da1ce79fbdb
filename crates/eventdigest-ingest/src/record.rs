//! The raw input record.
//!
//! A [`RawRecord`] is a flat mapping from field name to an arbitrary JSON
//! value, exactly as handed over by whatever exported the calendar. A field
//! may hold a scalar, a sequence, or sequence-shaped text; nothing is
//! interpreted until the resolver and coercer run.
//!
//! Blankness and text conversion follow the loose rules calendar exports are
//! written against: see [`value_text`] and [`is_truthy`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{IngestError, IngestResult};

/// An externally supplied field-name → value mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: Map<String, Value>,
}

impl RawRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a record from a JSON document holding one object.
    pub fn from_json_str(input: &str) -> IngestResult<Self> {
        let value: Value = serde_json::from_str(input).map_err(IngestError::invalid_json)?;
        Self::from_value(value)
    }

    /// Wraps a JSON value, which must be an object.
    pub fn from_value(value: Value) -> IngestResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(IngestError::not_an_object(value_kind(&other))),
        }
    }

    /// Returns the value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Builder method to bind a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns the number of bound fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is bound.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Converts a value to text the way loosely typed exports expect.
///
/// - strings are kept as-is
/// - `null` is empty
/// - integral numbers print without a fraction (`3.0` → `3`)
/// - sequences join their elements' text with `,`
/// - objects become `[object Object]`
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_text(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{f:.0}");
            }
        }
    }
    n.to_string()
}

/// Returns false for `null`, `false`, `0`, and the empty string.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text of an optional value, empty when it is absent or falsy.
pub fn optional_text(value: Option<&Value>) -> String {
    match value {
        Some(v) if is_truthy(v) => value_text(v),
        _ => String::new(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
