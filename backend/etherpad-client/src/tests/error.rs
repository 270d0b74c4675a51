// Unit tests for EtherpadError classification and messages

use crate::api::ApiCode;
use crate::error::{ConfigError, EtherpadError};

use common::ErrorLocation;
use models::{ApiVersion, ErrorKind};

use std::panic::Location;

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

fn api_error(code: ApiCode, message: &str) -> EtherpadError {
    EtherpadError::Api {
        code,
        message: message.to_string(),
        location: here(),
    }
}

/// **VALUE**: Verifies that an unknown pad or author becomes `NotFound`.
///
/// **WHY THIS MATTERS**: Callers branch on "does not exist" to tell a typo in a
/// pad id apart from a broken server. The API signals both as code 1.
///
/// **BUG THIS CATCHES**: Would catch the message being lost in the conversion,
/// or every code-1 error being reported as missing.
#[test]
fn given_wrong_parameters_for_missing_pad_when_into_not_found_then_becomes_not_found() {
    // GIVEN: The API's answer for an unknown pad
    let error = api_error(ApiCode::WrongParameters, "padID does not exist");

    // WHEN: Reclassifying
    let error = error.into_not_found();

    // THEN: NotFound carrying the API's message
    assert_eq!(error.kind(), ErrorKind::NotFound);
    assert_eq!(error.message(), "padID does not exist");
}

#[test]
fn given_other_api_errors_when_into_not_found_then_unchanged() {
    let wrong_key = api_error(ApiCode::InvalidApiKey, "no or wrong API Key").into_not_found();
    let bad_rev = api_error(ApiCode::WrongParameters, "rev is higher than the head revision")
        .into_not_found();

    assert_eq!(wrong_key.kind(), ErrorKind::Api);
    assert_eq!(bad_rev.kind(), ErrorKind::Api);
}

#[test]
fn given_version_error_when_message_then_names_required_and_configured_versions() {
    let error = EtherpadError::Version {
        method: "createDiffHTML",
        required: ApiVersion::new(1, 2, 7),
        configured: ApiVersion::new(1, 2, 1),
        location: here(),
    };

    assert_eq!(error.kind(), ErrorKind::Version);
    assert_eq!(
        error.message(),
        "Etherpad API version 1.2.7 or later is required for createDiffHTML, you have: 1.2.1"
    );
    assert!(error.to_string().starts_with("Version Error: createDiffHTML requires"));
}

#[test]
fn given_config_error_when_wrapped_then_kind_and_location_pass_through() {
    let location = here();
    let error = EtherpadError::from(ConfigError::ValidationError {
        location,
        reason: String::from("A valid url must be specified."),
    });

    assert_eq!(error.kind(), ErrorKind::Config);
    assert_eq!(error.location(), location);
    assert_eq!(error.message(), "A valid url must be specified.");
}

/// **VALUE**: Verifies that a failure to build the HTTP client is a configuration error.
///
/// **BUG THIS CATCHES**: Would catch the builder failure being converted through
/// the request-time `reqwest::Error` path and logged as a transport error.
#[test]
fn given_http_client_error_when_wrapped_then_reported_as_config() {
    let error = EtherpadError::from(ConfigError::HttpClientError {
        location: here(),
        reason: String::from("builder error"),
    });

    assert_eq!(error.kind(), ErrorKind::Config);
    assert_eq!(error.message(), "builder error");
    assert!(error.to_string().starts_with("Config HTTP Client Error: builder error"));
}

#[test]
fn given_malformed_json_when_converted_then_is_parse_error() {
    let json_error = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();

    let error = EtherpadError::from(json_error);

    assert_eq!(error.kind(), ErrorKind::Parse);
}

#[test]
fn given_parse_helper_when_called_then_records_call_site() {
    let line = line!() + 1;
    let error = EtherpadError::parse("bad markup");

    assert_eq!(error.kind(), ErrorKind::Parse);
    assert_eq!(error.location().line, line);
    assert!(error.to_string().starts_with("Parse Error: bad markup ["));
}
