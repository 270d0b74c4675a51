//! Pad operations: authors, names, text, and the multi-author listing.

use crate::helpers::{api_get, client_for, error_envelope, ok_envelope};

use etherpad_client::{ErrorKind, ErrorMode, EtherpadError};

use serde_json::json;
use wiremock::MockServer;
use wiremock::matchers::query_param;

const GROUP_PAD: &str = "g.abcdefghijk";
const SOLO_PAD: &str = "g.zzzzzzzzzzz";
const LONG_PAD: &str = "g.abcdefghijkl";

async fn mount_authors(server: &MockServer, pad_id: &str, authors: serde_json::Value) {
    api_get("listAuthorsOfPad")
        .and(query_param("padID", pad_id))
        .respond_with(ok_envelope(json!({"authorIDs": authors})))
        .mount(server)
        .await;
}

async fn mount_author_name(server: &MockServer, author_id: &str, name: serde_json::Value) {
    api_get("getAuthorName")
        .and(query_param("authorID", author_id))
        .respond_with(ok_envelope(name))
        .mount(server)
        .await;
}

/// **VALUE**: Verifies a pad with no authors yields an empty list, not an error.
///
/// **BUG THIS CATCHES**: Would catch empty `authorIDs` being treated as a
/// failed lookup and logged, which would flag every fresh pad.
#[tokio::test]
async fn given_pad_without_authors_when_list_authors_then_returns_empty() {
    // GIVEN: A pad nobody has written in
    let server = MockServer::start().await;
    mount_authors(&server, "fresh", json!([])).await;
    let mut client = client_for(&server, ErrorMode::Raise);

    // WHEN: Listing authors
    let authors = client.list_authors("fresh").await.expect("empty pad is not an error");

    // THEN: Empty, and nothing logged
    assert!(authors.is_empty());
    assert!(client.error_log().is_empty());
}

#[tokio::test]
async fn given_repeated_and_blank_author_ids_when_list_authors_then_distinct_in_order() {
    let server = MockServer::start().await;
    mount_authors(&server, "notes", json!(["a.two", "", "a.one", "a.two"])).await;
    let mut client = client_for(&server, ErrorMode::Raise);

    let authors = client.list_authors("notes").await.expect("list should succeed");

    assert_eq!(authors, vec!["a.two", "a.one"]);
}

/// **VALUE**: Verifies that an unknown pad surfaces the API's message in raise mode.
///
/// **WHY THIS MATTERS**: In raise mode the failed call's data must be absent, not
/// silently defaulted, so callers cannot mistake a typo for an empty pad.
///
/// **BUG THIS CATCHES**: Would catch raise mode returning `Ok(vec![])` for a
/// code-1 answer, or the message being replaced by a generic one.
#[tokio::test]
async fn given_unknown_pad_in_raise_mode_when_list_authors_then_not_found_with_api_message() {
    // GIVEN: The API rejects the pad id
    let server = MockServer::start().await;
    api_get("listAuthorsOfPad")
        .respond_with(error_envelope(1, "padID does not exist"))
        .mount(&server)
        .await;
    let mut client = client_for(&server, ErrorMode::Raise);

    // WHEN: Listing authors
    let result = client.list_authors("nope").await;

    // THEN: NotFound with the API's message, recorded in the log
    match result {
        Err(EtherpadError::NotFound { message, .. }) => assert_eq!(message, "padID does not exist"),
        other => panic!("Expected not found error, got {other:?}"),
    }
    assert_eq!(client.error_log().len(), 1);
    assert_eq!(client.error_log()[0].kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn given_unknown_pad_in_collect_mode_when_list_authors_then_empty_and_logged() {
    let server = MockServer::start().await;
    api_get("listAuthorsOfPad")
        .respond_with(error_envelope(1, "padID does not exist"))
        .mount(&server)
        .await;
    let mut client = client_for(&server, ErrorMode::Collect);

    let authors = client.list_authors("nope").await.expect("collect mode never raises");

    assert!(authors.is_empty());
    let entry = &client.error_log()[0];
    assert_eq!(entry.kind, ErrorKind::NotFound);
    assert_eq!(entry.message, "padID does not exist");
}

#[tokio::test]
async fn given_author_name_shapes_when_get_author_name_then_each_is_understood() {
    // GIVEN: Bare string, wrapped object and null answers
    let server = MockServer::start().await;
    mount_author_name(&server, "a.bare", json!("Ann")).await;
    mount_author_name(&server, "a.wrapped", json!({"authorName": "Bob"})).await;
    mount_author_name(&server, "a.anon", json!(null)).await;
    let mut client = client_for(&server, ErrorMode::Raise);

    // WHEN / THEN: Names resolve, a missing name is None
    assert_eq!(client.get_author_name("a.bare").await.expect("name").as_deref(), Some("Ann"));
    assert_eq!(client.get_author_name("a.wrapped").await.expect("name").as_deref(), Some("Bob"));
    assert_eq!(client.get_author_name("a.anon").await.expect("name"), None);
}

#[tokio::test]
async fn given_unknown_author_when_get_author_name_then_not_found() {
    let server = MockServer::start().await;
    api_get("getAuthorName")
        .respond_with(error_envelope(1, "authorID does not exist"))
        .mount(&server)
        .await;
    let mut client = client_for(&server, ErrorMode::Raise);

    let result = client.get_author_name("a.ghost").await;

    assert!(matches!(result, Err(EtherpadError::NotFound { .. })), "got {result:?}");
}

#[tokio::test]
async fn given_pad_when_get_text_and_last_edited_then_returns_values() {
    let server = MockServer::start().await;
    api_get("getText")
        .and(query_param("padID", "notes"))
        .respond_with(ok_envelope(json!({"text": "Welcome to Etherpad!\n"})))
        .mount(&server)
        .await;
    api_get("getLastEdited")
        .and(query_param("padID", "notes"))
        .respond_with(ok_envelope(json!({"lastEdited": 1_553_600_000_123_u64})))
        .mount(&server)
        .await;
    let mut client = client_for(&server, ErrorMode::Raise);

    let text = client.get_text("notes").await.expect("text");
    let last_edited = client.get_last_edited("notes").await.expect("timestamp");

    assert_eq!(text, "Welcome to Etherpad!\n");
    assert_eq!(last_edited, 1_553_600_000_123);
}

/// **VALUE**: Verifies both filters of the multi-author listing.
///
/// **WHY THIS MATTERS**: Only generated group pads with real collaboration are
/// of interest. Personal pads and solo pads would skew any report built on this.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one pad id length check, a
/// `> 2` author threshold, or author lookups for pads that are filtered out.
#[tokio::test]
async fn given_mixed_pads_when_list_pads_with_multiple_authors_then_only_group_pads_with_two_authors() {
    // GIVEN: A group pad with two authors, a solo group pad, and pads of other lengths
    let server = MockServer::start().await;
    api_get("listAllPads")
        .respond_with(ok_envelope(json!({"padIDs": [GROUP_PAD, SOLO_PAD, LONG_PAD, "notes"]})))
        .expect(1)
        .mount(&server)
        .await;
    mount_authors(&server, GROUP_PAD, json!(["a.ann", "a.bob", "a.ann"])).await;
    mount_authors(&server, SOLO_PAD, json!(["a.ann"])).await;
    api_get("listAuthorsOfPad")
        .and(query_param("padID", LONG_PAD))
        .respond_with(ok_envelope(json!({"authorIDs": ["a.x", "a.y"]})))
        .expect(0)
        .mount(&server)
        .await;
    api_get("getLastEdited")
        .and(query_param("padID", GROUP_PAD))
        .respond_with(ok_envelope(json!({"lastEdited": 42})))
        .expect(1)
        .mount(&server)
        .await;
    mount_author_name(&server, "a.ann", json!("Ann")).await;
    mount_author_name(&server, "a.bob", json!(null)).await;
    let mut client = client_for(&server, ErrorMode::Raise);

    // WHEN: Listing
    let pads = client
        .list_pads_with_multiple_authors()
        .await
        .expect("listing should succeed");

    // THEN: Only the collaborative group pad, with names resolved
    assert_eq!(pads.len(), 1);
    let summary = &pads[0];
    assert_eq!(summary.pad_id, GROUP_PAD);
    assert_eq!(summary.last_edited, 42);
    assert_eq!(summary.authors.len(), 2);
    assert_eq!(summary.authors["a.ann"], "Ann");
    assert_eq!(summary.authors["a.bob"], "");
}

/// **VALUE**: Verifies the listing keeps scanning past a failed lookup in collect mode.
///
/// **BUG THIS CATCHES**: Would catch an early return on the first failed pad,
/// which would make one deleted pad hide every other result.
#[tokio::test]
async fn given_collect_mode_and_failing_pad_when_listing_then_other_pads_are_kept() {
    // GIVEN: Two group pads, the first of which cannot be read
    let server = MockServer::start().await;
    api_get("listAllPads")
        .respond_with(ok_envelope(json!({"padIDs": [SOLO_PAD, GROUP_PAD]})))
        .mount(&server)
        .await;
    api_get("listAuthorsOfPad")
        .and(query_param("padID", SOLO_PAD))
        .respond_with(error_envelope(2, "internal error"))
        .mount(&server)
        .await;
    mount_authors(&server, GROUP_PAD, json!(["a.ann", "a.bob"])).await;
    api_get("getLastEdited")
        .respond_with(ok_envelope(json!({"lastEdited": 7})))
        .mount(&server)
        .await;
    mount_author_name(&server, "a.ann", json!("Ann")).await;
    api_get("getAuthorName")
        .and(query_param("authorID", "a.bob"))
        .respond_with(error_envelope(1, "authorID does not exist"))
        .mount(&server)
        .await;
    let mut client = client_for(&server, ErrorMode::Collect);

    // WHEN: Listing
    let pads = client
        .list_pads_with_multiple_authors()
        .await
        .expect("collect mode never raises");

    // THEN: The readable pad is listed and both failures are logged
    assert_eq!(pads.len(), 1);
    assert_eq!(pads[0].pad_id, GROUP_PAD);
    assert_eq!(pads[0].authors["a.bob"], "");
    let kinds: Vec<ErrorKind> = client.error_log().iter().map(|entry| entry.kind).collect();
    assert_eq!(kinds, vec![ErrorKind::Api, ErrorKind::NotFound]);
}

#[tokio::test]
async fn given_raise_mode_and_failing_pad_when_listing_then_aborts() {
    let server = MockServer::start().await;
    api_get("listAllPads")
        .respond_with(ok_envelope(json!({"padIDs": [GROUP_PAD]})))
        .mount(&server)
        .await;
    api_get("listAuthorsOfPad")
        .respond_with(error_envelope(2, "internal error"))
        .mount(&server)
        .await;
    let mut client = client_for(&server, ErrorMode::Raise);

    let result = client.list_pads_with_multiple_authors().await;

    assert!(matches!(result, Err(EtherpadError::Api { .. })), "got {result:?}");
}
