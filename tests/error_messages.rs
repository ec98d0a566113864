//! Tests to ensure error messages are actionable and consistent
//!
//! Configuration errors name the offending option and what is accepted.
//! Submission errors shown to the user are short and stable.

#![allow(clippy::field_reassign_with_default)]

use gpu_thermal_dashboard::error_handling::SubmitError;
use gpu_thermal_dashboard::Config;

#[test]
fn test_config_validation_errors_are_descriptive() {
    let mut config = Config::default();
    config.max_concurrent_lookups = 0;
    let e = config.validate().unwrap_err();
    assert_eq!(e.field, "max_concurrent_lookups");
    assert!(e.message.contains("greater than 0"), "Error should mention valid range");

    config = Config::default();
    config.timeout_seconds = 0;
    let e = config.validate().unwrap_err();
    assert_eq!(e.field, "timeout_seconds");

    config = Config::default();
    config.dns_timeout_seconds = 0;
    let e = config.validate().unwrap_err();
    assert_eq!(e.field, "dns_timeout_seconds");

    config = Config::default();
    config.site = "   ".into();
    let e = config.validate().unwrap_err();
    assert_eq!(e.field, "site");
}

#[test]
fn test_base_url_errors_show_accepted_schemes() {
    let mut config = Config::default();
    config.base_url = "ftp://monitor:5000".into();
    let e = config.validate().unwrap_err();
    assert_eq!(e.field, "base_url");
    assert!(e.message.contains("http or https"));
    assert_eq!(
        e.to_string(),
        "invalid base_url: unsupported scheme 'ftp', expected http or https"
    );

    config.base_url = "monitor".into();
    let e = config.validate().unwrap_err();
    assert!(e.message.contains("'monitor' is not a valid URL"));
}

#[test]
fn test_submit_error_user_messages() {
    let rejected = SubmitError::Rejected {
        message: Some("  Invalid site  ".into()),
    };
    assert_eq!(rejected.user_message(), "Invalid site");
    assert_eq!(
        rejected.to_string(),
        "analysis rejected by backend:   Invalid site  "
    );

    let blank = SubmitError::Rejected {
        message: Some(String::new()),
    };
    assert_eq!(blank.user_message(), "Analysis failed");

    let decode = SubmitError::from(serde_json::from_str::<serde_json::Value>("<html>").unwrap_err());
    assert_eq!(decode.user_message(), "Network error occurred");
    assert!(!decode.is_rejection());
}
