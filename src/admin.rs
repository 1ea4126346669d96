//! Admin panel display helpers
//!
//! The admin page renders loosely-typed config payloads (config items,
//! collection versions, enumerators, token claims). These helpers pull display
//! strings out of `serde_json::Value`s using browser-style truthiness, so a
//! missing, null, empty or zero field falls through to the next candidate.

use serde_json::{Map, Value};

/// Browser truthiness: null, false, 0, NaN and "" are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Browser string coercion of a JSON value.
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 {
                return format!("{}", f as i64);
            }
        }
    }
    n.to_string()
}

/// First truthy field among `keys`, coerced to a string.
fn first_truthy(object: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| is_truthy(value))
        .map(coerce_string)
}

/// Render a config value: null becomes "null", objects and arrays are
/// pretty-printed with two-space indentation, scalars use their string form.
pub fn format_config_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(value @ (Value::Object(_) | Value::Array(_))) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| coerce_string(value))
        }
        Some(other) => coerce_string(other),
    }
}

/// UI color for a config value source.
pub fn source_color(source: &str) -> &'static str {
    match source {
        "file" => "primary",
        "env" => "success",
        _ => "default",
    }
}

pub fn collection_name(version: &Value) -> String {
    first_truthy(version, &["collection_name", "name", "collection"])
        .unwrap_or_else(|| "Unknown".to_string())
}

pub fn version_number(version: &Value) -> String {
    first_truthy(version, &["current_version", "version", "version_number"])
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn enumerator_version(enumerator: &Value) -> String {
    match enumerator.as_object().and_then(|e| e.get("version")) {
        Some(Value::Null) | None => "Unknown".to_string(),
        Some(version) => coerce_string(version),
    }
}

pub fn enumerator_items(enumerator: &Value) -> Vec<Map<String, Value>> {
    objects_in(enumerator.get("enumerators"))
}

pub fn enumerator_item_name(item: &Value) -> String {
    first_truthy(item, &["name"]).unwrap_or_else(|| "Unknown".to_string())
}

pub fn enumerator_item_values(item: &Value) -> Vec<Map<String, Value>> {
    objects_in(item.get("values"))
}

/// Display value of an enumerator value entry; empty when missing.
pub fn value_of(value_item: &Value) -> String {
    first_truthy(value_item, &["value"]).unwrap_or_default()
}

pub fn value_description(value_item: &Value) -> String {
    first_truthy(value_item, &["description"]).unwrap_or_default()
}

/// A single token claim as a string, when present and truthy.
pub fn token_value(token: Option<&Value>, key: &str) -> Option<String> {
    token
        .filter(|t| t.is_object())
        .and_then(|t| first_truthy(t, &[key]))
}

/// The token's `roles` claim, each entry coerced to a string.
pub fn token_roles(token: Option<&Value>) -> Vec<String> {
    token
        .and_then(|t| t.as_object())
        .and_then(|t| t.get("roles"))
        .and_then(Value::as_array)
        .map(|roles| roles.iter().map(coerce_string).collect())
        .unwrap_or_default()
}

fn objects_in(value: Option<&Value>) -> Vec<Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_object().cloned())
                .collect()
        })
        .unwrap_or_default()
}
