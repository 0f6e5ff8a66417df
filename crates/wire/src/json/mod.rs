//! JSON codec for document values
//!
//! - [`decode_json`] / [`decode_slice`]: strict parser producing [`Value`] trees
//! - [`encode_json`] / [`encode_pretty`]: canonical text with sorted keys
//! - [`diff_values`]: line diff of two canonical pretty encodings
//!
//! [`Value`]: docassert_core::Value

mod decode;
mod diff;
mod encode;

pub use decode::{decode_json, decode_slice, DecodeError, DEFAULT_MAX_DEPTH};
pub use diff::{diff_lines, diff_values, unified_diff, DiffLine};
pub use encode::{encode_json, encode_number, encode_pretty, encode_string};
