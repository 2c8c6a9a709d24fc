// tests/update_check.rs

//! Version comparison and release-note cleanup for the update check.

use stagehand::update::{is_newer, strip_markdown_images, ReleaseInfo};

#[test]
fn release_json_decodes_with_missing_body() {
    let release: ReleaseInfo =
        serde_json::from_str(r#"{"tag_name": "v1.4.0", "extra": "ignored"}"#).unwrap();
    assert_eq!(release.tag_name, "v1.4.0");
    assert_eq!(release.body, "");
}

#[test]
fn patch_component_compares_numerically() {
    // String comparison would call 1.2.9 newer here.
    assert!(is_newer("v1.2.10", "v1.2.9"));
    assert!(!is_newer("v1.2.9", "v1.2.10"));
}

#[test]
fn equal_versions_are_not_newer() {
    assert!(!is_newer("1.2.3", "1.2.3"));
    assert!(!is_newer("v1.2.3", "1.2.3"));
}

#[test]
fn missing_components_are_treated_as_zero() {
    assert!(is_newer("1.3", "1.2.9"));
    assert!(is_newer("v2", "1.9.9"));
    assert!(!is_newer("1.2", "1.2.0"));
}

#[test]
fn suffixed_components_parse_by_leading_digits() {
    assert!(is_newer("1.3.0-rc1", "1.2.9"));
    assert!(!is_newer("1.2.9-rc1", "1.2.9"));
}

#[test]
fn markdown_images_are_stripped_from_release_notes() {
    let body = "New features!\n![screenshot](https://example.com/a.png)\nBug fixes.";
    let cleaned = strip_markdown_images(body);
    assert!(!cleaned.contains("example.com"));
    assert!(cleaned.contains("New features!"));
    assert!(cleaned.contains("Bug fixes."));
}

#[test]
fn text_without_images_is_unchanged() {
    let body = "A [link](https://example.com) survives; only images go.";
    assert_eq!(strip_markdown_images(body), body);
}
