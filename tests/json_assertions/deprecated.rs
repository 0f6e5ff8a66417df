//! Deprecated Node Shortcut Tests
//!
//! The old shortcuts delegate to typed assertions, so they report the same
//! messages.

#![allow(deprecated)]

use crate::check;

#[test]
fn string_shortcuts() {
    let recorder = check(r#"{"s": "stringValue"}"#, |json| {
        json.node("s").equal_to_the_string("stringValue");
        json.node("s").matches("^string");
        json.node("s").does_not_match("^value");
        json.node("s").contains("Val");
        json.node("s").does_not_contain("xyz");
        json.node("s").is_string_with_length(11);
        json.node("s").is_string_with_length_in_range(1, 20);

        json.node("s").equal_to_the_string("other");
        json.node("s").is_string_with_length(3);
    });
    recorder.assert_messages(&[
        r#""s" equal to "other", actual is "stringValue""#,
        "is string with length 3, actual is 11",
    ]);
}

#[test]
fn number_shortcuts() {
    let recorder = check(r#"{"i": 123, "f": 123.5}"#, |json| {
        json.node("i").equal_to_the_integer(123);
        json.node("f").equal_to_the_float(123.5);
        json.node("f").is_number_in_range(100.0, 200.0);
        json.node("f").is_number_greater_than(100.0);
        json.node("f").is_number_less_than_or_equal(123.5);

        json.node("f").equal_to_the_integer(123);
        json.node("i").is_number_in_range(200.0, 300.0);
    });
    recorder.assert_messages(&[
        "is integer: value is float, not integer",
        "greater than or equal to 200, actual is 123",
    ]);
}

#[test]
fn collection_shortcuts() {
    let recorder = check(r#"{"a": [1, 2], "o": {"k": 1}}"#, |json| {
        json.node("a").is_array_with_elements_count(2);
        json.node("o").is_object_with_properties_count(1);
        json.node("a").is_object_with_properties_count(2);
    });
    recorder.assert_messages(&[r#""a" is object"#]);
}
