//! Canonical JSON encoding
//!
//! Produces deterministic text for a [`Value`]: object keys sorted, integral
//! numbers without a fractional part. The compact form is used as an identity
//! key (uniqueness checks, `json()`); the pretty form feeds structural diffs.

use docassert_core::value::{is_integral, sorted_entries};
use docassert_core::Value;
use std::fmt::Write;

/// Encode a Value to compact canonical JSON
pub fn encode_json(value: &Value) -> String {
    let mut out = String::new();
    write_compact(&mut out, value);
    out
}

/// Encode a Value to indented canonical JSON (two spaces per level)
pub fn encode_pretty(value: &Value) -> String {
    let mut out = String::new();
    write_pretty(&mut out, value, 0);
    out
}

/// Format a number the way it is rendered in canonical JSON
///
/// Integral values print without a decimal point (`123`), others use the
/// shortest representation that round-trips (`123.123`).
pub fn encode_number(n: f64) -> String {
    if is_integral(n) && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else if n.is_finite() {
        format!("{}", n)
    } else {
        "null".to_string()
    }
}

/// Encode a string with proper JSON escaping
pub fn encode_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    push_string(&mut result, s);
    result
}

fn push_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_compact(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&encode_number(*n)),
        Value::String(s) => push_string(out, s),
        Value::Array(arr) => {
            out.push('[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_compact(out, item);
            }
            out.push(']');
        }
        Value::Object(obj) => {
            out.push('{');
            for (i, (k, v)) in sorted_entries(obj).into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_string(out, k);
                out.push(':');
                write_compact(out, v);
            }
            out.push('}');
        }
    }
}

fn indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("  ");
    }
}

fn write_pretty(out: &mut String, value: &Value, level: usize) {
    match value {
        Value::Array(arr) if !arr.is_empty() => {
            out.push_str("[\n");
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                indent(out, level + 1);
                write_pretty(out, item, level + 1);
            }
            out.push('\n');
            indent(out, level);
            out.push(']');
        }
        Value::Object(obj) if !obj.is_empty() => {
            out.push_str("{\n");
            for (i, (k, v)) in sorted_entries(obj).into_iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                indent(out, level + 1);
                push_string(out, k);
                out.push_str(": ");
                write_pretty(out, v, level + 1);
            }
            out.push('\n');
            indent(out, level);
            out.push('}');
        }
        other => write_compact(out, other),
    }
}
