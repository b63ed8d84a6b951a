//! Tests for error types

use miette::Diagnostic;
use mosaic_core::{Error, ErrorKind, Violation};

#[test]
fn test_configuration_error() {
    let error = Error::configuration("batch too large");
    assert_eq!(error.to_string(), "Configuration error: batch too large");
    assert_eq!(error.kind(), ErrorKind::Configuration);
}

#[test]
fn test_upstream_error() {
    let error = Error::upstream("npm registry", "returned HTTP 503");
    assert_eq!(
        error.to_string(),
        "npm registry unavailable: returned HTTP 503"
    );
}

#[test]
fn test_missing_field_error() {
    let error = Error::missing_field("version", "luxass/mosaic has no release and no manifest version");
    assert_eq!(
        error.to_string(),
        "Missing required field `version`: luxass/mosaic has no release and no manifest version"
    );
}

#[test]
fn test_not_found_errors() {
    let error = Error::NotFound {
        location: "repos/luxass/luxass/contents/.github/mosaic/vercel/next.js.toml".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "No mosaic config found at repos/luxass/luxass/contents/.github/mosaic/vercel/next.js.toml"
    );

    let error = Error::ManifestNotFound {
        owner: "luxass".to_string(),
        repository: "mosaic".to_string(),
        path: "packages/core/package.json".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "No package.json found at luxass/mosaic/packages/core/package.json"
    );
}

#[test]
fn test_violation_display() {
    let violation = Violation::new("/npm/name", "1 is not of type \"string\"");
    assert_eq!(violation.to_string(), "/npm/name: 1 is not of type \"string\"");
}

#[test]
fn test_diagnostic_codes() {
    let code = |error: &Error| error.code().map(|c| c.to_string());

    assert_eq!(
        code(&Error::configuration("x")).as_deref(),
        Some("mosaic::configuration")
    );
    assert_eq!(
        code(&Error::validation("mosaic config", vec![])).as_deref(),
        Some("mosaic::validation")
    );
    assert_eq!(
        code(&Error::upstream("github", "x")).as_deref(),
        Some("mosaic::upstream_unavailable")
    );
    assert!(Error::missing_field("name", "x").help().is_some());
}

#[test]
fn test_kind_serialization() {
    assert_eq!(
        serde_json::to_value(ErrorKind::UpstreamUnavailable).unwrap_or_default(),
        serde_json::json!("upstream_unavailable")
    );
}
