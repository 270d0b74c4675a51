//! Diff operations against stubbed `createDiffHTML` answers.

use crate::helpers::{api_get, client_for, error_envelope, ok_envelope};

use etherpad_client::{ErrorKind, ErrorMode, EtherpadError};

use serde_json::json;
use wiremock::MockServer;
use wiremock::matchers::query_param;

const PAD: &str = "g.abcdefghijk";

async fn mount_diff(server: &MockServer, html: &str, authors: serde_json::Value) {
    api_get("createDiffHTML")
        .and(query_param("padID", PAD))
        .and(query_param("startRev", "0"))
        .respond_with(ok_envelope(json!({"html": html, "authors": authors})))
        .mount(server)
        .await;
}

/// **VALUE**: Verifies the full path from API answer to per-author buckets.
///
/// **BUG THIS CATCHES**: Would catch the diff being requested without
/// `startRev=0`, which the stub does not answer, or the escaped markup
/// reaching the parser unnormalized.
#[tokio::test]
async fn given_diff_with_nested_span_when_classify_contributions_then_nested_text_is_deleted() {
    // GIVEN: Escaped markup with a style block, as the server sends it
    let server = MockServer::start().await;
    mount_diff(
        &server,
        "<style>\n.authora_123 {}\n</style>\n<span class=\\\"author_a_123\\\">hello<span>bye</span></span>",
        json!(["a.123"]),
    )
    .await;
    let mut client = client_for(&server, ErrorMode::Raise);

    // WHEN: Classifying
    let contributions = client
        .classify_contributions(PAD, &["a.123"])
        .await
        .expect("classification should succeed");

    // THEN: The nested run is the deletion
    assert_eq!(contributions.deleted_by("a.123"), ["bye"]);
    assert!(contributions.inserted_by("a.123").is_empty());
}

#[tokio::test]
async fn given_diff_when_extract_contributions_then_document_keeps_listed_authors() {
    let server = MockServer::start().await;
    mount_diff(
        &server,
        r#"<span class="authora_x">hi</span>"#,
        json!(["a.x", "", null, "a.y"]),
    )
    .await;
    let mut client = client_for(&server, ErrorMode::Raise);

    let document = client.extract_contributions(PAD).await.expect("diff");

    assert_eq!(document.authors(), ["a.x", "a.y"]);
    assert_eq!(document.to_html(), r#"<span class="authora_x">hi</span>"#);
}

#[tokio::test]
async fn given_diff_when_render_anonymized_html_then_classes_follow_author_order() {
    let server = MockServer::start().await;
    mount_diff(
        &server,
        r#"<span class="authora_1">a</span><span class="authora_10">b</span>"#,
        json!(["a.1", "a.10"]),
    )
    .await;
    let mut client = client_for(&server, ErrorMode::Raise);

    let html = client
        .render_anonymized_html(PAD, &["a.10", "a.1"])
        .await
        .expect("render");

    assert_eq!(html, r#"<span class="author2">a</span><span class="author1">b</span>"#);
}

#[tokio::test]
async fn given_diff_when_get_edits_by_author_then_returns_runs_in_order() {
    let server = MockServer::start().await;
    mount_diff(
        &server,
        r#"<p><span class="authora_x">one</span><span class="authora_y">two</span><span class="authora_x">three</span></p>"#,
        json!(["a.x", "a.y"]),
    )
    .await;
    let mut client = client_for(&server, ErrorMode::Raise);

    let edits = client.get_edits_by_author(PAD, "a.x").await.expect("edits");

    assert_eq!(edits, vec!["one", "three"]);
}

#[tokio::test]
async fn given_unknown_pad_when_get_edits_by_author_then_not_found() {
    let server = MockServer::start().await;
    api_get("createDiffHTML")
        .respond_with(error_envelope(1, "padID does not exist"))
        .mount(&server)
        .await;
    let mut client = client_for(&server, ErrorMode::Raise);

    let result = client.get_edits_by_author(PAD, "a.x").await;

    match result {
        Err(EtherpadError::NotFound { message, .. }) => assert_eq!(message, "padID does not exist"),
        other => panic!("Expected not found error, got {other:?}"),
    }
}

/// **VALUE**: Verifies unparseable markup degrades to empty buckets in collect mode.
///
/// **BUG THIS CATCHES**: Would catch a parser panic on truncated markup, or a
/// collect-mode failure that is neither returned nor logged.
#[tokio::test]
async fn given_truncated_markup_in_collect_mode_when_classify_then_empty_and_parse_logged() {
    // GIVEN: Markup cut off inside a tag
    let server = MockServer::start().await;
    mount_diff(&server, r#"<span class="authora_x">hi</span><span class="#, json!(["a.x"])).await;
    let mut client = client_for(&server, ErrorMode::Collect);

    // WHEN: Classifying
    let contributions = client
        .classify_contributions(PAD, &["a.x"])
        .await
        .expect("collect mode never raises");

    // THEN: Empty result, parse failure logged
    assert!(contributions.inserted.is_empty());
    assert!(contributions.deleted.is_empty());
    assert_eq!(client.error_log().len(), 1);
    assert_eq!(client.error_log()[0].kind, ErrorKind::Parse);
}
