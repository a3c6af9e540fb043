//! Loose comparisons over JSON values
//!
//! The site mixes string and numeric ids freely, so ids are compared the way a
//! dynamically typed client would: numeric strings compare by value, anything
//! else compares as text.

use serde_json::Value;

/// Truthiness of a JSON value: null, false, zero, `""`, `"0"` and empty
/// containers are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Type-coercing equality between a JSON value and a textual id
pub fn loose_eq(value: &Value, other: &str) -> bool {
    match value {
        Value::String(s) => s == other || numeric_eq(s, other),
        Value::Number(n) => numeric_eq(&n.to_string(), other),
        Value::Bool(b) => *b == is_truthy(&Value::String(other.to_string())),
        Value::Null => other.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Render a scalar JSON value as a map key
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "1" } else { "" }.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn numeric_eq(a: &str, b: &str) -> bool {
    if let (Some(x), Some(y)) = (as_integer(a), as_integer(b)) {
        return x == y;
    }
    match (as_float(a), as_float(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn as_integer(s: &str) -> Option<i128> {
    s.trim().parse().ok()
}

fn as_float(s: &str) -> Option<f64> {
    let s = s.trim();
    let looks_numeric = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if looks_numeric { s.parse().ok() } else { None }
}
