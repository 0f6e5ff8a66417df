//! File Loading Tests

use docassert::{file_has, load_file, lookup, Error, Recorder};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn fixture_document() {
    let recorder = Recorder::new();
    let passed = file_has(&recorder, fixture("object.json"), |json| {
        json.node("id").is_uuid().version(4);
        json.node("name").is_string().equal_to("Fixture");
        json.node("createdAt").is_time().at_date(2022, 10, 16);
        json.node("homepage").is_url().with_schemas(&["https"]);
        json.node("tags").is_array().with_length(2).with_unique_elements();
        json.node(("stats", "views")).is_integer().greater_than(100);
        json.node("/stats/rating").is_number().equal_to(4.5);
    });
    assert!(passed, "{:?}", recorder.messages());
}

#[test]
fn missing_file_is_one_failure() {
    let recorder = Recorder::new();
    let mut called = false;
    let passed = file_has(&recorder, fixture("does-not-exist.json"), |_| called = true);
    assert!(!passed);
    assert!(!called);
    recorder.assert_messages(&["failed to read file '"]);
}

#[test]
fn temp_file_with_invalid_json() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"a": [1, 2"#).unwrap();

    let recorder = Recorder::new();
    file_has(&recorder, file.path(), |_| {});
    recorder.assert_messages(&["data has invalid JSON: unexpected end of JSON input"]);

    assert!(matches!(load_file(file.path()), Err(Error::Decode(_))));
}

#[test]
fn load_and_lookup_without_sink() {
    let doc = load_file(fixture("object.json")).unwrap();
    assert_eq!(lookup(&doc, ("stats", "views")).unwrap().as_i64(), Some(120));
    assert_eq!(lookup(&doc, "/tags/1").unwrap().as_str(), Some("beta"));

    let err = lookup(&doc, ("tags", 5usize)).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(load_file(fixture("nope.json")), Err(Error::Io(_))));
}
