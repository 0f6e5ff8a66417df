//! Document value tree
//!
//! This module defines the generic value model every assertion operates on.
//! A document is parsed once into a `Value` and never mutated afterward.
//!
//! ## Contract
//!
//! - Numbers are 64-bit IEEE-754 floats, as in any JSON document
//! - No implicit type coercions in equality
//! - Object keys are unique and unordered; equality ignores key order

use std::collections::HashMap;

/// Generic document value
///
/// ## The Six Types
///
/// 1. `Null` - JSON null
/// 2. `Bool` - Boolean true or false
/// 3. `Number` - 64-bit IEEE-754 floating point
/// 4. `String` - UTF-8 encoded string
/// 5. `Object` - String-keyed map of values
/// 6. `Array` - Ordered sequence of values
///
/// ## Equality Rules
///
/// - Different types are NEVER equal
/// - Numbers use IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
/// - Objects compare key sets and per-key values, ignoring insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// JSON null
    #[default]
    Null,

    /// Boolean true or false
    Bool(bool),

    /// Any JSON number
    Number(f64),

    /// UTF-8 encoded string
    String(String),

    /// String-keyed map of values
    Object(HashMap<String, Value>),

    /// Ordered sequence of values
    Array(Vec<Value>),
}

impl Value {
    /// Returns the type name as used in failure messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as i64
    ///
    /// Returns `None` for non-numbers, numbers with a fractional part, and
    /// integral numbers outside the `i64` range.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => to_i64(*n),
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as array slice
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as object reference
    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

/// True when `n` is finite and has no fractional part
pub fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0
}

/// `n` as an `i64` when it is integral and inside `[-2^63, 2^63)`
pub fn to_i64(n: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if is_integral(n) && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Object properties in ascending key order
pub fn sorted_entries(map: &HashMap<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by_key(|(k, _)| *k);
    entries
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}

// ============================================================================
// Tests
// ============================================================================
