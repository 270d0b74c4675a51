//! Request layer behavior: version gate, envelope handling, error modes.

use crate::helpers::{TEST_API_KEY, api_get, client_for, config_for, error_envelope, ok_envelope};

use common::HttpStatusCode;
use etherpad_client::{
    ApiCode, ApiMethod, ApiVersion, ClientConfig, ErrorKind, ErrorMode, EtherpadClient,
    EtherpadError,
};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{any, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies that the version gate fails before any request is sent.
///
/// **WHY THIS MATTERS**: Old servers answer unknown methods with confusing
/// errors. The client must refuse locally and name the version it needs.
///
/// **BUG THIS CATCHES**: Would catch a check placed after `send()`, which the
/// zero-call expectation on the stub server turns into a failure on drop.
#[tokio::test]
async fn given_old_api_version_when_calling_newer_method_then_fails_without_request() {
    // GIVEN: A server that must not be called and a client configured for 1.2.1
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let config = config_for(&server, ErrorMode::Raise).with_api_version(ApiVersion::new(1, 2, 1));
    let mut client = EtherpadClient::new(config).expect("valid config");

    // WHEN: Requesting the diff, which needs 1.2.7
    let result = client.classify_contributions("pad", &["a.x"]).await;

    // THEN: Version error naming both versions, and it is logged
    match result {
        Err(EtherpadError::Version {
            method,
            required,
            configured,
            ..
        }) => {
            assert_eq!(method, "createDiffHTML");
            assert_eq!(required, ApiVersion::new(1, 2, 7));
            assert_eq!(configured, ApiVersion::new(1, 2, 1));
        }
        other => panic!("Expected version error, got {other:?}"),
    }
    assert_eq!(client.error_log().len(), 1);
    assert_eq!(client.error_log()[0].kind, ErrorKind::Version);
}

#[tokio::test]
async fn given_version_equal_to_minimum_when_calling_then_request_is_sent() {
    let server = MockServer::start().await;
    Mock::given(any())
        .and(query_param("authorID", "a.x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": "Ann"})))
        .expect(1)
        .mount(&server)
        .await;
    let config = ClientConfig::new(server.uri(), TEST_API_KEY)
        .with_error_mode(ErrorMode::Raise)
        .with_api_version(ApiVersion::new(1, 1, 0));
    let mut client = EtherpadClient::new(config).expect("valid config");

    let name = client.get_author_name("a.x").await.expect("call should pass the gate");

    assert_eq!(name.as_deref(), Some("Ann"));
}

#[tokio::test]
async fn given_success_envelope_when_call_then_returns_data_and_sends_api_key() {
    // GIVEN: A stub that only answers authenticated requests with the pad param
    let server = MockServer::start().await;
    api_get("getText")
        .and(query_param("padID", "notes"))
        .respond_with(ok_envelope(json!({"text": "hello\n"})))
        .expect(1)
        .mount(&server)
        .await;
    let mut client = client_for(&server, ErrorMode::Raise);

    // WHEN: Calling the method directly
    let response = client
        .call(ApiMethod::GetText, &[("padID", "notes")])
        .await
        .expect("call should succeed")
        .expect("raise mode never yields the sentinel");

    // THEN: The envelope data is handed back
    assert_eq!(response.code, ApiCode::Ok);
    assert_eq!(response.data["text"], "hello\n");
    assert!(client.error_log().is_empty());
}

#[tokio::test]
async fn given_http_500_when_calling_then_returns_transport_error_with_status() {
    let server = MockServer::start().await;
    api_get("getText")
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let mut client = client_for(&server, ErrorMode::Raise);

    let result = client.get_text("notes").await;

    match result {
        Err(EtherpadError::Transport { status, .. }) => {
            assert_eq!(status, Some(HttpStatusCode(500)));
        }
        other => panic!("Expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_non_json_body_when_calling_then_returns_parse_error() {
    let server = MockServer::start().await;
    api_get("getText")
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    let mut client = client_for(&server, ErrorMode::Raise);

    let result = client.get_text("notes").await;

    assert!(matches!(result, Err(EtherpadError::Parse { .. })), "got {result:?}");
}

#[tokio::test]
async fn given_wrong_api_key_when_calling_then_returns_api_error() {
    let server = MockServer::start().await;
    api_get("getText")
        .respond_with(error_envelope(4, "no or wrong API Key"))
        .mount(&server)
        .await;
    let mut client = client_for(&server, ErrorMode::Raise);

    let result = client.get_text("notes").await;

    match result {
        Err(EtherpadError::Api { code, message, .. }) => {
            assert_eq!(code, ApiCode::InvalidApiKey);
            assert_eq!(message, "no or wrong API Key");
        }
        other => panic!("Expected API error, got {other:?}"),
    }
}

/// **VALUE**: Verifies collect mode returns the empty sentinel and logs the reason.
///
/// **WHY THIS MATTERS**: Batch callers rely on silent degradation and inspect the
/// log afterwards. Losing the log entry would hide every failure.
///
/// **BUG THIS CATCHES**: Would catch collect mode returning the error anyway, or
/// returning a sentinel without recording what went wrong.
#[tokio::test]
async fn given_collect_mode_when_call_fails_then_returns_sentinel_and_logs() {
    // GIVEN: A server that fails every text request
    let server = MockServer::start().await;
    api_get("getText")
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let mut client = client_for(&server, ErrorMode::Collect);

    // WHEN: Calling through both the raw and the typed entry points
    let raw = client
        .call(ApiMethod::GetText, &[("padID", "notes")])
        .await
        .expect("collect mode never raises");
    let text = client.get_text("notes").await.expect("collect mode never raises");

    // THEN: Sentinels returned, one log entry per failure
    assert!(raw.is_none());
    assert_eq!(text, "");
    assert_eq!(client.error_log().len(), 2);
    assert!(client.error_log().iter().all(|entry| entry.kind == ErrorKind::Transport));
    assert!(client.error_log()[0].message.contains("502"));

    client.clear_error_log();
    assert!(client.error_log().is_empty());
}

#[tokio::test]
async fn given_two_clients_when_one_fails_then_other_log_is_untouched() {
    let server = MockServer::start().await;
    api_get("getText")
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let mut failing = client_for(&server, ErrorMode::Collect);
    let quiet = client_for(&server, ErrorMode::Collect);

    failing.get_text("notes").await.expect("collect mode never raises");

    assert_eq!(failing.error_log().len(), 1);
    assert!(quiet.error_log().is_empty());
}

/// **VALUE**: Verifies a slow server is cut off and the key stays out of the error.
///
/// **BUG THIS CATCHES**: Would catch a client built without a timeout, or a
/// transport error whose message embeds the request URL with `apikey=...`.
#[tokio::test]
async fn given_slow_server_when_calling_then_times_out_without_leaking_key() {
    // GIVEN: A response delayed past the client timeout
    let server = MockServer::start().await;
    api_get("getText")
        .respond_with(ok_envelope(json!({"text": "late"})).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    let config = config_for(&server, ErrorMode::Raise).with_timeout(Duration::from_secs(1));
    let mut client = EtherpadClient::new(config).expect("valid config");

    // WHEN: Calling
    let result = client.get_text("notes").await;

    // THEN: Transport error that mentions the timeout but not the key
    match result {
        Err(error @ EtherpadError::Transport { .. }) => {
            let rendered = error.to_string();
            assert!(rendered.contains("timed out"), "unexpected message: {rendered}");
            assert!(!rendered.contains(TEST_API_KEY), "key leaked: {rendered}");
        }
        other => panic!("Expected transport error, got {other:?}"),
    }
}

#[test]
fn given_invalid_config_when_creating_client_then_config_error_in_any_mode() {
    for mode in [ErrorMode::Raise, ErrorMode::Collect] {
        let config = ClientConfig::new("", TEST_API_KEY).with_error_mode(mode);

        let result = EtherpadClient::new(config);

        match result {
            Err(error) => assert_eq!(error.kind(), ErrorKind::Config),
            Ok(_) => panic!("Expected config error in {mode:?} mode"),
        }
    }
}

#[tokio::test]
async fn given_client_when_inspected_then_exposes_configured_settings() {
    let server = MockServer::start().await;
    let config = config_for(&server, ErrorMode::Raise).with_api_version(ApiVersion::new(1, 2, 7));

    let client = EtherpadClient::new(config).expect("valid config");

    assert_eq!(client.api_version(), ApiVersion::new(1, 2, 7));
    assert_eq!(client.error_mode(), ErrorMode::Raise);
    assert_eq!(client.config().base_url, server.uri());
}
