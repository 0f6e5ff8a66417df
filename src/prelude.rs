//! Convenient imports for docassert.
//!
//! ```
//! use docassert::prelude::*;
//!
//! assert_json(r#"{"ok": true}"#, |json| json.node("ok").is_true());
//! ```

// Entry points
pub use crate::{assert_json, file_has, has, has_value, has_with, AssertJson, Node};

// Configuration and sinks
pub use crate::{Config, FailureSink, PanickingSink, Recorder};

// Paths and values
pub use crate::{path, IntoPath, Path, Value};

// Time layouts
pub use crate::{DATE_LAYOUT, RFC3339};

// JWT keys
pub use crate::jwt::{Token, VerificationKey};
