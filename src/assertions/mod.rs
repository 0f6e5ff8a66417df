//! Typed assertions
//!
//! Each assertion is created by a successful type check on a [`Node`](crate::Node)
//! and wraps an `Option` state. `None` is the poisoned stage: every method on a
//! poisoned assertion returns immediately without reporting, so a chain fails
//! at most once for its type check.

pub(crate) mod context;

mod array;
mod jwt;
mod numeric;
mod object;
mod string;
mod time;
mod url;
mod uuid;
pub(crate) mod validate;

pub use self::array::ArrayAssertion;
pub use self::jwt::JwtAssertion;
pub use self::numeric::{IntegerAssertion, NumberAssertion};
pub use self::object::ObjectAssertion;
pub use self::string::{RegexPattern, StringAssertion};
pub use self::time::{TimeAssertion, DATE_LAYOUT, RFC3339};
pub use self::url::UrlAssertion;
pub use self::uuid::UuidAssertion;
