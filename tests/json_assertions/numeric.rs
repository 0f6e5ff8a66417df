//! Number and Integer Assertion Tests

use crate::check;

#[test]
fn integer_chain_on_null_fails_once() {
    let recorder = check(r#"{"key": null}"#, |json| {
        json.node("key").is_integer().equal_to(0).greater_than(0);
    });
    recorder.assert_messages(&[r#""key" is integer: value is not numeric"#]);
}

#[test]
fn float_is_not_integer() {
    let recorder = check(r#"{"f": 123.123, "i": 123}"#, |json| {
        json.node("f").is_integer();
        assert_eq!(json.node("i").integer(), 123);
        assert_eq!(json.node("f").is_float().value(), 123.123);
    });
    recorder.assert_messages(&[r#""f" is integer: value is float, not integer"#]);
}

#[test]
fn integral_values_beyond_int64_are_not_integers() {
    let recorder = check(r#"{"big": 1e20, "small": -1e20}"#, |json| {
        json.node("big").is_integer().equal_to(i64::MAX);
        json.node("small").is_integer().less_than(0);
        json.node("big").is_number().equal_to(1e20);
    });
    recorder.assert_messages(&[
        r#""big" is integer: value is out of int64 range"#,
        r#""small" is integer: value is out of int64 range"#,
    ]);
}

#[test]
fn integral_float_literal_is_integer() {
    check(r#"{"n": 5.0, "e": 1e3}"#, |json| {
        json.node("n").is_integer().equal_to(5);
        json.node("e").is_integer().equal_to(1000);
    })
    .assert_no_messages();
}

#[test]
fn number_messages_use_canonical_rendering() {
    let recorder = check(r#"{"n": 10}"#, |json| {
        json.node("n").is_number().less_than(2.5).greater_than(10.0);
    });
    recorder.assert_messages(&[
        r#""n" less than 2.5, actual is 10"#,
        r#""n" greater than 10, actual is 10"#,
    ]);
}

#[test]
fn delta_comparison() {
    let recorder = check(r#"{"pi": 3.14159}"#, |json| {
        json.node("pi").is_number().equal_to_with_delta(3.14, 0.01);
        json.node("pi").is_number().equal_to_with_delta(3.0, 0.1);
    });
    recorder.assert_messages(&["equal to 3 with delta 0.1, actual is 3.14159"]);
}
