//! Array and Object Assertion Tests

use crate::check;

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn unique_elements_name_every_duplicate() {
    let recorder = check(r#"{"dup": [3, 2, 3, 4, 2], "ok": [1, 2, 3, 4, 5]}"#, |json| {
        json.node("ok").is_array().with_unique_elements();
        json.node("dup").is_array().with_unique_elements();
    });
    recorder.assert_messages(&[
        r#""dup" has unique elements, duplicated elements: 3 at [0, 2], 2 at [1, 4]"#,
    ]);
}

#[test]
fn unique_elements_of_nested_values() {
    let recorder = check(r#"[[1, 2], [2, 1], [1, 2], null, null]"#, |json| {
        json.node(docassert::Path::root())
            .is_array()
            .with_unique_elements();
    });
    recorder.assert_messages(&["duplicated elements: [1,2] at [0, 2], null at [3, 4]"]);
}

#[test]
fn array_counts() {
    let recorder = check(r#"{"a": []}"#, |json| {
        json.node("a").is_array().with_length(0).with_length_less_than(1);
        json.node("a").is_array().with_length_greater_than_or_equal(1);
    });
    recorder.assert_messages(&[
        "is array with elements count greater than or equal to 1, actual is 0",
    ]);
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn object_counts_and_uniqueness() {
    let recorder = check(r#"{"o": {"b": true, "a": true, "c": false}}"#, |json| {
        json.node("o")
            .is_object()
            .with_properties_count(3)
            .with_properties_count_less_than_or_equal(2)
            .with_unique_elements();
    });
    recorder.assert_messages(&[
        "is object with properties count less than or equal to 2, actual is 3",
        r#"has unique elements, duplicated elements: true at ["a", "b"]"#,
    ]);
}

#[test]
fn object_type_mismatch_poisons_chain() {
    let recorder = check(r#"{"o": [1]}"#, |json| {
        json.node("o")
            .is_object()
            .with_properties_count(1)
            .with_unique_elements();
    });
    recorder.assert_messages(&[r#""o" is object"#]);
}
