//! String Assertion Tests

use crate::check;
use docassert::{has_with, Config, Recorder};
use regex::Regex;

#[test]
fn equal_to_reports_expected_and_actual() {
    let recorder = check(r#"{"key": "value"}"#, |json| {
        json.node("key").is_string().equal_to("value");
        json.node("key").is_string().equal_to("other");
    });
    recorder.assert_messages(&[
        r#"failed asserting that JSON node "key" equal to "other", actual is "value""#,
    ]);
}

#[test]
fn fail_once_after_type_mismatch() {
    let recorder = check(r#"{"key": null}"#, |json| {
        json.node("key")
            .is_string()
            .equal_to("a")
            .matches("^a$")
            .with_length(1)
            .with_uuid()
            .not_nil();
    });
    recorder.assert_messages(&[r#""key" is string"#]);
}

#[test]
fn chain_on_matching_string() {
    let pattern = Regex::new(r"^\w+@\w+\.com$").unwrap();
    check(r#"{"email": "ann@example.com"}"#, |json| {
        json.node("email")
            .is_string()
            .is_not_empty()
            .matches(&pattern)
            .contains("@")
            .not_contains(" ")
            .with_length_greater_than(5)
            .with_length_less_than(64)
            .with_email()
            .with_html5_email()
            .that(|s| if s.ends_with(".com") { Ok(()) } else { Err("not .com") });
    })
    .assert_no_messages();
}

#[test]
fn strings_with_quotes_are_escaped_in_messages() {
    let recorder = check(r#"{"q": "say \"hi\""}"#, |json| {
        json.node("q").is_string().equal_to("hi");
    });
    recorder.assert_messages(&[r#"equal to "hi", actual is "say \"hi\"""#]);
}

#[test]
fn config_message_prefixes_every_failure() {
    let recorder = Recorder::new();
    let config = Config::builder().message("GET /users: ").build();
    has_with(&config, &recorder, r#"{"name": 1, "tags": "x"}"#, |json| {
        json.node("name").is_string();
        json.node("tags").is_array();
    });
    for message in recorder.messages() {
        assert!(message.starts_with("GET /users: failed asserting"), "{}", message);
    }
    assert_eq!(recorder.len(), 2);
}
