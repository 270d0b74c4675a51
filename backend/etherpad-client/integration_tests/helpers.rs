//! Test helpers for stubbing the Etherpad HTTP API with wiremock.
//!
//! Every stub matches `GET /api/{version}/{method}` plus the test API key,
//! so a request missing the key falls through to wiremock's 404.

use etherpad_client::{ApiVersion, ClientConfig, EtherpadClient, ErrorMode};

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key-0123";

pub fn api_path(api_method: &str) -> String {
    format!("/api/{}/{api_method}", ApiVersion::DEFAULT)
}

/// Matcher for an authenticated GET of `api_method`.
pub fn api_get(api_method: &str) -> MockBuilder {
    Mock::given(method("GET"))
        .and(path(api_path(api_method)))
        .and(query_param("apikey", TEST_API_KEY))
}

pub fn ok_envelope(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "ok", "data": data}))
}

pub fn error_envelope(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": code, "message": message, "data": null}))
}

pub fn config_for(server: &MockServer, mode: ErrorMode) -> ClientConfig {
    ClientConfig::new(server.uri(), TEST_API_KEY).with_error_mode(mode)
}

pub fn client_for(server: &MockServer, mode: ErrorMode) -> EtherpadClient {
    EtherpadClient::new(config_for(server, mode)).expect("test config should be valid")
}
