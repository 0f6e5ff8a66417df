//! JSON-in-string Tests
//!
//! Strings holding whole documents are asserted on with `with_json`; nested
//! failures read as one sentence through every level.

use crate::{check, hs256_token, secret_key, SECRET};
use docassert::{has_with, Config, Recorder};

#[test]
fn nested_document_failure_is_qualified() {
    let recorder = check(r#"{"payload": "{\"user\": {\"id\": \"x\"}}"}"#, |json| {
        json.node("payload").is_string().with_json(|inner| {
            inner.node(("user", "id")).is_integer();
        });
    });
    recorder.assert_messages(&[
        r#"JSON node "payload" is string with JSON: failed asserting that JSON node "user.id" is integer: value is not numeric"#,
    ]);
}

#[test]
fn invalid_embedded_document_skips_callback() {
    let mut called = false;
    let recorder = check(r#"{"payload": "not json"}"#, |json| {
        json.node("payload")
            .is_string()
            .with_json(|_| called = true)
            .equal_to("not json");
    });
    assert!(!called);
    recorder.assert_messages(&[r#"JSON node "payload" is string with JSON: data has invalid JSON: "#]);
}

#[test]
fn prefixes_compose_across_levels() {
    let recorder = Recorder::new();
    let config = Config::builder().message("outer: ").build();
    let data = r#"{"a": "{\"b\": \"{\\\"c\\\": 1}\"}"}"#;
    has_with(&config, &recorder, data, |json| {
        json.node("a").is_string().with_json(|level1| {
            level1.node("b").is_string().with_json(|level2| {
                level2.node("c").is_string();
            });
        });
    });
    recorder.assert_messages(&[
        r#"outer: JSON node "a" is string with JSON: JSON node "b" is string with JSON: failed asserting that JSON node "c" is string"#,
    ]);
}

#[test]
fn jwt_payload_inside_embedded_document() {
    let token = hs256_token(r#"{"role":"guest"}"#, SECRET);
    let inner = format!(r#"{{\"token\": \"{}\"}}"#, token);
    let data = format!(r#"{{"envelope": "{}"}}"#, inner);
    let recorder = check(data, |json| {
        json.node("envelope").is_string().with_json(|envelope| {
            envelope
                .node("token")
                .is_jwt(secret_key)
                .with_payload(|payload| {
                    payload.node("role").is_string().equal_to("admin");
                });
        });
    });
    recorder.assert_messages(&[
        r#"JSON node "envelope" is string with JSON: JSON node "token" is JWT with payload: failed asserting that JSON node "role" equal to "admin", actual is "guest""#,
    ]);
}

#[test]
fn node_assert_keeps_prefix_and_path() {
    let recorder = check(r#"{"data": {"items": [{"name": 1}]}}"#, |json| {
        json.with_message("list: ").node("data").assert(|data| {
            data.node(("items", 0usize, "name")).is_string();
        });
    });
    recorder.assert_messages(&[
        r#"list: failed asserting that JSON node "data.items[0].name" is string"#,
    ]);
}
