//! Document context configuration
//!
//! ```
//! use docassert::Config;
//!
//! let config = Config::builder()
//!     .message("user endpoint: ")
//!     .max_depth(64)
//!     .build();
//! assert_eq!(config.message(), "user endpoint: ");
//! assert_eq!(config.max_depth(), 64);
//! ```

use docassert_wire::DEFAULT_MAX_DEPTH;

/// Settings for one top-level assertion call
#[derive(Debug, Clone)]
pub struct Config {
    message: String,
    max_depth: usize,
}

impl Config {
    /// Create a builder with default settings
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Prefix prepended to every failure message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Maximum nesting depth accepted by the loader
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`Config`]
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    message: String,
    max_depth: usize,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    ///
    /// Empty message prefix, nesting limit of 512.
    pub fn new() -> Self {
        Self {
            message: String::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the failure message prefix
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the loader nesting limit
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Finish building
    pub fn build(self) -> Config {
        Config {
            message: self.message,
            max_depth: self.max_depth,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
