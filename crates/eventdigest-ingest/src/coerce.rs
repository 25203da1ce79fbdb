//! Coercion of a resolved field value into a sequence of scalars.

use serde_json::Value;

/// Turns one resolved field value into an ordered sequence.
///
/// - absent, `null` or `""`: empty
/// - a JSON array: its elements, unchanged
/// - text holding a JSON array: the parsed elements
/// - other text: split on `,`, each piece trimmed
/// - any other scalar: a single element
///
/// Text that fails to parse as JSON is not an error; it is split instead.
pub fn coerce_sequence(value: Option<&Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => items,
            _ => s
                .split(',')
                .map(|piece| Value::String(piece.trim().to_string()))
                .collect(),
        },
        Some(other) => vec![other.clone()],
    }
}
