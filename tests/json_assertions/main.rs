//! JSON Assertions Test Suite
//!
//! End-to-end checks of the public API: documents go in as raw bytes, failure
//! messages come out through a `Recorder`.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test json_assertions
//!
//! # Run JWT tests only
//! cargo test --test json_assertions jwt::
//! ```

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use docassert::jwt::{Token, VerificationKey};
use docassert::{has, AssertJson, Recorder};
use ring::hmac;

// Test modules
pub mod collections;
pub mod deprecated;
pub mod files;
pub mod jwt;
pub mod node;
pub mod numeric;
pub mod paths;
pub mod recursive;
pub mod semantic;
pub mod string;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Secret used for every test token
pub const SECRET: &[u8] = b"test-secret";

/// Run `f` against `data` and return the recorder for inspection
pub fn check(data: impl AsRef<[u8]>, f: impl FnOnce(&AssertJson<'_>)) -> Recorder {
    let recorder = Recorder::new();
    has(&recorder, data, f);
    recorder
}

/// Sign `claims` as an HS256 token with `secret`
pub fn hs256_token(claims: &str, secret: &[u8]) -> String {
    let input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims.as_bytes())
    );
    let tag = hmac::sign(&hmac::Key::new(hmac::HMAC_SHA256, secret), input.as_bytes());
    format!("{}.{}", input, URL_SAFE_NO_PAD.encode(tag.as_ref()))
}

/// Key function returning [`SECRET`]
pub fn secret_key(_: &Token) -> Result<VerificationKey, String> {
    Ok(VerificationKey::Hmac(SECRET.to_vec()))
}

/// Install a test subscriber so `tracing` output shows up with `--nocapture`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
