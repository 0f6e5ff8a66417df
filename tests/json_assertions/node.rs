//! Node Tests
//!
//! Existence, literal checks, conversions and iteration.

use crate::{check, init_tracing};
use docassert::{assert_json, has_value, Recorder, Value};

// ============================================================================
// Existence
// ============================================================================

#[test]
fn nested_path_not_found_names_full_path() {
    let recorder = check(r#"{"a": {"b": {"c": ["value"]}}}"#, |json| {
        json.node(("a", "b", "c", 1usize)).exists();
        json.node(("a", "b", "c", 1usize)).is_string();
    });
    recorder.assert_messages(&[
        r#"failed asserting that JSON node "a.b.c[1]" exists"#,
        r#"failed to find JSON node "a.b.c[1]": index 1 is out of range (length 1) at "a.b.c[1]""#,
    ]);
}

#[test]
fn property_on_array_is_not_assignable() {
    let recorder = check(r#"{"list": [1]}"#, |json| {
        json.node(("list", "key")).is_number();
    });
    recorder.assert_messages(&[r#"failed to find JSON node "list.key": property "key" is not assignable to array"#]);
}

#[test]
fn index_on_object_is_rejected() {
    let recorder = check(r#"{"obj": {"0": 1}}"#, |json| {
        json.node(("obj", 0usize)).is_number();
    });
    recorder.assert_messages(&[r#"index 0 cannot be applied to object at "obj[0]""#]);
}

#[test]
fn root_node_is_whole_document() {
    check(r#"[1, 2]"#, |json| {
        json.node(docassert::Path::root()).is_array().with_length(2);
    })
    .assert_no_messages();
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn literal_checks() {
    let recorder = check(
        r#"{"null": null, "true": true, "false": false, "zero": 0}"#,
        |json| {
            json.node("null").is_null();
            json.node("true").is_true();
            json.node("false").is_false();
            json.node("zero").is_not_null();

            json.node("zero").is_false();
            json.node("null").is_true();
        },
    );
    recorder.assert_messages(&[r#""zero" is boolean"#, r#""null" is boolean"#]);
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn conversions_return_zero_values_after_failure() {
    let recorder = check(r#"{"obj": {}}"#, |json| {
        assert_eq!(json.node("obj").string(), "");
        assert_eq!(json.node("obj").float(), 0.0);
        assert_eq!(json.node("obj").integer(), 0);
        assert!(json.node("missing").value().is_none());
        assert!(json.node("obj").uuid().is_nil());
        assert_eq!(json.node("obj").time().timestamp(), 0);
    });
    assert_eq!(recorder.len(), 6);
}

#[test]
fn json_is_canonical() {
    check(r#"{"o": {"z": [1.5, "s"], "a": null}}"#, |json| {
        assert_eq!(
            String::from_utf8(json.node("o").json()).unwrap(),
            r#"{"a":null,"z":[1.5,"s"]}"#
        );
    })
    .assert_no_messages();
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn equal_json_ignores_key_order() {
    let recorder = check(r#"{"user": {"name": "Ann", "tags": ["a", "b"]}}"#, |json| {
        json.node("user").equal_json(r#"{"tags": ["a", "b"], "name": "Ann"}"#);
        json.node("user").equal_json(r#"{"tags": ["b", "a"], "name": "Ann"}"#);
    });
    recorder.assert_messages(&[r#""user" is equal to JSON, diff:"#]);
    assert!(recorder.messages()[0].contains("--- Expected\n+++ Actual\n"));
}

#[test]
fn for_each_visits_children_with_paths() {
    let recorder = check(r#"{"users": [{"id": 1}, {"id": "2"}, {}]}"#, |json| {
        json.node("users").for_each(|user| {
            user.assert(|user| {
                user.node("id").is_integer();
            });
        });
    });
    recorder.assert_messages(&[
        r#""users[1].id" is integer: value is not numeric"#,
        r#"failed to find JSON node "users[2].id""#,
    ]);
}

#[test]
fn for_each_on_missing_node_reports_not_found() {
    let recorder = check(r#"{}"#, |json| json.node("items").for_each(|_| {}));
    recorder.assert_messages(&[r#"failed to find JSON node "items""#]);
}

#[test]
fn has_value_accepts_built_documents() {
    init_tracing();
    let recorder = Recorder::new();
    let value: Value = [("id".to_string(), Value::from(7))].into_iter().collect();
    let passed = has_value(&recorder, &value, |json| {
        json.node("id").is_integer().equal_to(8);
    });
    assert!(!passed);
    recorder.assert_messages(&["equal to 8, actual is 7"]);
}

#[test]
fn assert_json_passes_silently() {
    assert_json(r#"{"ok": true}"#, |json| json.node("ok").is_true());
}

#[test]
#[should_panic(expected = "2 JSON assertion(s) failed")]
fn assert_json_panics_with_every_failure() {
    assert_json(r#"{"ok": true}"#, |json| {
        json.node("ok").is_false();
        json.node("missing").exists();
    });
}
