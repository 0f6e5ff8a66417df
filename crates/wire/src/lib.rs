//! Wire codec for docassert
//!
//! This crate turns raw bytes into document values and back:
//!
//! - a strict JSON loader with UTF-8, trailing-content and depth checks
//! - a canonical encoder (sorted keys, integral numbers without `.0`)
//! - a line diff over canonical pretty encodings
//!
//! ## Examples
//!
//! ```
//! use docassert_wire::{decode_json, encode_json};
//! use docassert_core::Value;
//!
//! let decoded = decode_json(r#"{"b": 2, "a": [1.5, null]}"#).unwrap();
//! assert_eq!(encode_json(&decoded), r#"{"a":[1.5,null],"b":2}"#);
//! assert_eq!(decode_json("42").unwrap(), Value::Number(42.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod json;

pub use json::{
    decode_json, decode_slice, diff_lines, diff_values, encode_json, encode_number, encode_pretty,
    encode_string, unified_diff, DecodeError, DiffLine, DEFAULT_MAX_DEPTH,
};
