use std::path::Path;

use bisect_core::errors::{BisectError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("line", "3")
        .with_context("reason", "example")
}

#[test]
fn store_error_surface() {
    let err = BisectError::Store(sample_info("store.parse", "not an integer"));
    assert_eq!(err.code(), "store.parse");
    assert!(err.info().context.contains_key("line"));
}

#[test]
fn selection_error_surface() {
    let err = BisectError::Selection(sample_info("selection.out_of_range", "index 9"));
    assert_eq!(err.info().code, "selection.out_of_range");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn io_helper_records_path() {
    let err = BisectError::io("store.read", Path::new("objects.txt"), "missing");
    assert!(matches!(err, BisectError::Store(_)));
    assert_eq!(err.info().context.get("path").map(String::as_str), Some("objects.txt"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = BisectError::Config(
        ErrorInfo::new("config.invalid", "bad marker collides")
            .with_context("bad_marker", "0")
            .with_hint("pick any non-zero value"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("config error: bad marker collides (code: config.invalid)"));
    assert!(rendered.contains("bad_marker=0"));
    assert!(rendered.contains("hint: pick any non-zero value"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = BisectError::Bisect(ErrorInfo::new("bisect.inconsistent", "all-good is bad"));
    let json = serde_json::to_value(&err).expect("json");
    assert_eq!(json["family"], "Bisect");
    assert_eq!(json["detail"]["code"], "bisect.inconsistent");
}
