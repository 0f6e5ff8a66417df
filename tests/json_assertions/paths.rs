//! Path Syntax Tests
//!
//! Tuple paths, the `path!` macro, legacy pointer strings and rendering of
//! unusual property names.

use crate::check;
use docassert::{path, Path, PathElement};
use proptest::prelude::*;

#[test]
fn path_forms_reach_the_same_node() {
    let data = r#"{"complexNode": {"items": [{"key": "a"}, {"key": "b"}]}}"#;
    check(data, |json| {
        json.node(("complexNode", "items", 1usize, "key")).is_string().equal_to("b");
        json.node(path!["complexNode", "items", 1usize, "key"]).is_string().equal_to("b");
        json.node("/complexNode/items/1/key").is_string().equal_to("b");
        json.node(vec![
            PathElement::from("complexNode"),
            PathElement::from("items"),
            PathElement::from(1usize),
            PathElement::from("key"),
        ])
        .is_string()
        .equal_to("b");
    })
    .assert_no_messages();
}

#[test]
fn pointer_escapes() {
    check(r#"{"a/b": {"c~d": 1}, "": 2}"#, |json| {
        json.node("/a~1b/c~0d").is_integer().equal_to(1);
        json.node("/").is_integer().equal_to(2);
    })
    .assert_no_messages();
}

#[test]
fn plain_strings_are_single_properties() {
    check(r#"{"a.b": 1}"#, |json| {
        json.node("a.b").is_integer().equal_to(1);
    })
    .assert_no_messages();
}

#[test]
fn unusual_names_render_bracketed() {
    let recorder = check(r#"{"a b": {"it's": null}, "": null}"#, |json| {
        json.node(("a b", "it's")).is_string();
        json.node("").is_string();
    });
    recorder.assert_messages(&[
        r#"failed asserting that JSON node "['a b']['it\'s']" is string"#,
        r#"failed asserting that JSON node "['']" is string"#,
    ]);
}

#[test]
fn sub_document_paths_join() {
    let recorder = check(r#"{"outer": {"inner": [true, 1]}}"#, |json| {
        let inner = json.at(("outer", "inner"));
        inner.node(1usize).is_true();
        inner.at(0usize).node(Path::root()).is_true();
    });
    recorder.assert_messages(&[r#""outer.inner[1]" is boolean"#]);
}

proptest! {
    #[test]
    fn identifier_names_render_bare(name in "[a-zA-Z_$][a-zA-Z0-9_$]{0,12}") {
        let path = Path::root().with_property(name.clone()).with_index(3);
        prop_assert_eq!(path.to_string(), format!("{}[3]", name));
    }

    #[test]
    fn indices_always_bracketed(indices in proptest::collection::vec(0usize..1000, 1..5)) {
        let path: Path = indices.iter().copied().map(PathElement::Index).collect();
        let expected: String = indices.iter().map(|i| format!("[{}]", i)).collect();
        prop_assert_eq!(path.to_string(), expected);
    }
}
