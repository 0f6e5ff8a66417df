//! # docassert
//!
//! Path-qualified, fail-once assertions over JSON documents for tests.
//!
//! A test hands raw JSON to [`has`] (or [`assert_json`]) with a callback. Inside
//! the callback, [`AssertJson::node`] looks up a location and returns a
//! [`Node`]; typed checks on the node return chainable assertions. Every
//! failure goes to a [`FailureSink`] as one readable sentence naming the path:
//!
//! ```text
//! failed asserting that JSON node "user.roles[1]" equal to "admin", actual is "guest"
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use docassert::prelude::*;
//!
//! let recorder = Recorder::new();
//! let passed = has(&recorder, br#"{"user": {"id": 7, "roles": ["admin"]}}"#, |json| {
//!     json.node(("user", "id")).is_integer().greater_than(0);
//!     json.node(("user", "roles")).is_array().with_length(1).with_unique_elements();
//!     json.node(path!["user", "roles", 0usize]).is_string().equal_to("admin");
//! });
//! assert!(passed);
//! ```
//!
//! ## Fail once
//!
//! A type check that fails reports once and poisons the rest of the chain:
//! `node("key").is_integer().equal_to(0)` on `{"key": null}` reports only
//! that the value is not numeric. Comparators after a successful type check
//! report independently.
//!
//! ## Crates
//!
//! - [`docassert_core`]: value tree, paths and resolution
//! - [`docassert_wire`]: JSON decoding, canonical encoding and diffs

#![warn(missing_docs)]

pub mod assertions;
mod config;
mod document;
mod error;
pub mod jwt;
mod node;
mod sink;

pub mod prelude;

// Entry points
pub use document::{
    assert_json, file_has, has, has_value, has_with, load, load_file, load_with, lookup, AssertJson,
};
pub use node::Node;

// Configuration and sinks
pub use config::{Config, ConfigBuilder};
pub use sink::{FailureSink, PanickingSink, Recorder};

// Errors
pub use error::{Error, Result};

// Typed assertions
pub use assertions::{
    ArrayAssertion, IntegerAssertion, JwtAssertion, NumberAssertion, ObjectAssertion,
    RegexPattern, StringAssertion, TimeAssertion, UrlAssertion, UuidAssertion, DATE_LAYOUT,
    RFC3339,
};

// Core model
pub use docassert_core::{path, IntoPath, Path, PathElement, Value};
