//! Semantic string validators

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// One `@`, no whitespace, a dotted host with non-empty labels
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").unwrap());

/// WHATWG "valid e-mail address"
static HTML5_EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

pub(crate) fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

pub(crate) fn is_html5_email(value: &str) -> bool {
    HTML5_EMAIL_REGEX.is_match(value)
}

/// Absolute URL with a non-empty host
pub(crate) fn parse_url(value: &str) -> Option<Url> {
    let url = Url::parse(value).ok()?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Some(url),
        _ => None,
    }
}
