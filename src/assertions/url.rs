//! URL assertions

use super::context::{quote_all, Context, Stage};
use std::fmt::Display;
use url::Url;

/// Assertions on a string node holding an absolute URL
#[derive(Debug)]
pub struct UrlAssertion<'a>(Option<Stage<'a, Url>>);

impl<'a> UrlAssertion<'a> {
    pub(crate) fn new(ctx: Context<'a>, url: Url) -> Self {
        UrlAssertion(Some(Stage::new(ctx, url)))
    }

    pub(crate) fn poisoned() -> Self {
        UrlAssertion(None)
    }

    /// Assert that the scheme is one of `schemas`
    pub fn with_schemas<S: AsRef<str>>(self, schemas: &[S]) -> Self {
        if let Some(s) = &self.0 {
            let scheme = s.value.scheme();
            if !schemas.iter().any(|allowed| allowed.as_ref() == scheme) {
                s.ctx.fail(format_args!(
                    "is URL with schemas {}, actual is {:?}",
                    quote_all(schemas),
                    scheme
                ));
            }
        }
        self
    }

    /// Assert that the host is one of `hosts`
    pub fn with_hosts<S: AsRef<str>>(self, hosts: &[S]) -> Self {
        if let Some(s) = &self.0 {
            let host = s.value.host_str().unwrap_or_default();
            if !hosts.iter().any(|allowed| allowed.as_ref() == host) {
                s.ctx.fail(format_args!(
                    "is URL with hosts {}, actual is {:?}",
                    quote_all(hosts),
                    host
                ));
            }
        }
        self
    }

    /// Assert with a custom predicate; an `Err` is reported as the reason
    pub fn that<E: Display>(self, predicate: impl FnOnce(&Url) -> Result<(), E>) -> Self {
        if let Some(s) = &self.0 {
            if let Err(err) = predicate(&s.value) {
                s.ctx.fail(format_args!("is URL: {}", err));
            }
        }
        self
    }

    /// The parsed URL, `None` after a failure
    pub fn value(&self) -> Option<&Url> {
        self.0.as_ref().map(|s| &s.value)
    }
}
