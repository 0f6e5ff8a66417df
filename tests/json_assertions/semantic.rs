//! UUID, Time, URL and Email Tests

use crate::check;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

// ============================================================================
// UUID
// ============================================================================

#[test]
fn uuid_checks() {
    let id = Uuid::new_v4();
    let data = format!(r#"{{"id": "{}", "bad": "1234"}}"#, id);
    let recorder = check(data, |json| {
        json.node("id")
            .is_uuid()
            .not_nil()
            .version(4)
            .variant(1)
            .equal_to(id);
        assert_eq!(json.node("id").uuid(), id);
        json.node("bad").is_uuid().nil();
    });
    recorder.assert_messages(&[r#""bad" is UUID, actual is "1234""#]);
}

// ============================================================================
// Time
// ============================================================================

#[test]
fn time_with_offset_compares_by_instant() {
    check(r#"{"t": "2022-10-16T15:13:44+02:00"}"#, |json| {
        json.node("t")
            .is_time()
            .equal_to(Utc.with_ymd_and_hms(2022, 10, 16, 13, 13, 44).unwrap())
            .at_date(2022, 10, 16);
    })
    .assert_no_messages();
}

#[test]
fn custom_layouts() {
    let recorder = check(
        r#"{"eu": "16.10.2022", "stamp": "2022-10-16 15:13:44", "bad": "2022-10-16"}"#,
        |json| {
            json.node("eu")
                .is_time_with_layout("%d.%m.%Y")
                .equal_to_date(2022, 10, 16);
            let stamp = json.node("stamp").time_with_layout("%Y-%m-%d %H:%M:%S");
            assert_eq!(stamp, Utc.with_ymd_and_hms(2022, 10, 16, 15, 13, 44).unwrap());
            json.node("bad").is_time();
        },
    );
    recorder.assert_messages(&[r#""bad" is time: "#]);
}

#[test]
fn date_ranges() {
    let recorder = check(r#"{"d": "2022-10-16"}"#, |json| {
        json.node("d")
            .is_date()
            .after_date(2022, 10, 15)
            .before_date(2022, 10, 17)
            .before_or_equal_to_date(2022, 10, 16)
            .after_date(2022, 10, 16);
    });
    recorder.assert_messages(&[
        r#""d" is time after "2022-10-16T00:00:00Z", actual is "2022-10-16T00:00:00Z""#,
    ]);
}

// ============================================================================
// URL and email
// ============================================================================

#[test]
fn url_checks() {
    let recorder = check(
        r#"{"home": "https://example.com/", "local": "file:///tmp/x", "text": "example"}"#,
        |json| {
            json.node("home")
                .is_url()
                .with_schemas(&["http", "https"])
                .with_hosts(&["example.com"]);
            json.node("local").is_url();
            json.node("text").is_url().with_schemas(&["https"]);
        },
    );
    recorder.assert_messages(&[
        r#""local" is URL, actual is "file:///tmp/x""#,
        r#""text" is URL, actual is "example""#,
    ]);
}

#[test]
fn email_formats() {
    let recorder = check(
        r#"{"plain": "user@example.com", "local": "user@localhost", "bad": "not an email"}"#,
        |json| {
            json.node("plain").is_email();
            json.node("plain").is_html5_email();
            json.node("local").is_html5_email();
            json.node("local").is_email();
            json.node("bad").is_html5_email();
        },
    );
    recorder.assert_messages(&[
        r#""local" is email, actual is "user@localhost""#,
        r#""bad" is email (HTML5 format), actual is "not an email""#,
    ]);
}
