// Unit tests for author attribution over diff markup

mod entities;
mod tree;

use crate::diff::{DiffDocument, author_class_tokens, normalize_markup};

fn document(html: &str) -> DiffDocument {
    DiffDocument::parse(html, Vec::new()).expect("markup should parse")
}

#[test]
fn given_author_id_with_dots_when_author_class_tokens_then_dots_become_underscores() {
    assert_eq!(
        author_class_tokens("a.x1.y2"),
        [String::from("authora_x1_y2"), String::from("author_a_x1_y2")]
    );
}

#[test]
fn given_escaped_quotes_and_whitespace_when_normalize_markup_then_both_are_removed() {
    let raw = "<span class=\\\"authora_x\\\">\r\n\tline\n</span>";

    assert_eq!(normalize_markup(raw), "<span class=\"authora_x\">line</span>");
}

/// **VALUE**: Verifies the nested-span convention on the canonical example.
///
/// **WHY THIS MATTERS**: The diff renderer nests deleted text inside the author's
/// span. The outer text is context, only the nested run is the deletion.
///
/// **BUG THIS CATCHES**: Would catch classification that reports the outer
/// "hello" as an insertion, or takes the deleted text from the outer span.
#[test]
fn given_span_with_nested_span_when_classify_then_nested_text_is_deleted() {
    // GIVEN: An author span wrapping a nested span
    let doc = document(r#"<span class="author_a_123">hello<span>bye</span></span>"#);

    // WHEN: Classifying for that author
    let contributions = doc.classify(&["a.123"]);

    // THEN: Only the nested text is attributed, as a deletion
    assert_eq!(contributions.deleted_by("a.123"), ["bye"]);
    assert!(contributions.inserted_by("a.123").is_empty());
}

#[test]
fn given_plain_author_spans_when_classify_then_text_is_inserted() {
    let doc = document(
        r#"<p><span class="authora_x">one</span> and <span class="authora_x"><b>two</b></span></p>"#,
    );

    let contributions = doc.classify(&["a.x"]);

    assert_eq!(contributions.inserted_by("a.x"), ["one", "two"]);
    assert!(contributions.deleted_by("a.x").is_empty());
}

/// **VALUE**: Verifies that no text run lands in both buckets for the same author.
///
/// **BUG THIS CATCHES**: Would catch a walk that descends into a matched span and
/// visits the nested span again, reporting deleted text as inserted too.
#[test]
fn given_mixed_spans_when_classify_then_no_run_is_both_inserted_and_deleted() {
    // GIVEN: Insertions and a deletion by the same author, nested spans also tagged
    let doc = document(concat!(
        r#"<span class="authora_x">kept</span>"#,
        r#"<span class="authora_x">ctx<span class="authora_x">gone</span></span>"#,
        r#"<span class="authora_y">other</span>"#,
    ));

    // WHEN: Classifying both authors
    let contributions = doc.classify(&["a.x", "a.y"]);

    // THEN: Buckets are disjoint per author
    assert_eq!(contributions.inserted_by("a.x"), ["kept"]);
    assert_eq!(contributions.deleted_by("a.x"), ["gone"]);
    assert_eq!(contributions.inserted_by("a.y"), ["other"]);
    for author in ["a.x", "a.y"] {
        for run in contributions.inserted_by(author) {
            assert!(!contributions.deleted_by(author).contains(run));
        }
    }
}

#[test]
fn given_author_without_spans_when_classify_then_author_has_empty_buckets() {
    let doc = document(r#"<span class="authora_x">text</span>"#);

    let contributions = doc.classify(&["a.nobody"]);

    assert!(contributions.inserted.contains_key("a.nobody"));
    assert!(contributions.deleted.contains_key("a.nobody"));
    assert!(contributions.inserted_by("a.nobody").is_empty());
    assert!(!contributions.inserted.contains_key("a.x"));
}

#[test]
fn given_empty_spans_when_classify_then_empty_runs_are_skipped() {
    let doc = document(r#"<span class="authora_x"></span><span class="authora_x"><span></span></span>"#);

    let contributions = doc.classify(&["a.x"]);

    assert!(contributions.inserted_by("a.x").is_empty());
    assert!(contributions.deleted_by("a.x").is_empty());
}

/// **VALUE**: Verifies the dot-to-underscore round trip for author ids.
///
/// **BUG THIS CATCHES**: Would catch matching on the raw id, which can never
/// equal a class token because the renderer strips the dots.
#[test]
fn given_author_id_with_dots_when_edits_by_author_then_finds_normalized_class() {
    let doc = document(concat!(
        r#"<span class="authora_b_c">first</span>"#,
        r#"<span class="authora_bc">not mine</span>"#,
        r#"<span class="bold authora_b_c">second<span>removed</span></span>"#,
    ));

    let edits = doc.edits_by_author("a.b.c");

    assert_eq!(edits, vec!["first", "second", "removed"]);
}

/// **VALUE**: Verifies that an author's deleted text counts as one of their edits.
///
/// **WHY THIS MATTERS**: A deletion is rendered as a span nested inside the
/// author's span, with no text of its own at the outer level. Edits and
/// classification must agree on which runs belong to the author.
///
/// **BUG THIS CATCHES**: Would catch collecting only direct text children,
/// which drops every pure deletion from the edit list.
#[test]
fn given_tagged_span_holding_only_nested_span_when_edits_by_author_then_nested_run_is_included() {
    // GIVEN: One inserted run and one pure deletion by the same author
    let doc = document(concat!(
        r#"<span class="authora_x">kept</span>"#,
        r#"<span class="authora_x"><span class="removed">gone</span></span>"#,
    ));

    // WHEN: Listing edits and classifying
    let edits = doc.edits_by_author("a.x");
    let contributions = doc.classify(&["a.x"]);

    // THEN: Both runs are edits, and the nested one is the deletion
    assert_eq!(edits, vec!["kept", "gone"]);
    assert_eq!(contributions.deleted_by("a.x"), ["gone"]);
}

#[test]
fn given_lone_less_than_inside_span_when_edits_by_author_then_run_stays_whole() {
    let doc = document(r#"<span class="authora_x">x<3</span>"#);

    assert_eq!(doc.edits_by_author("a.x"), vec!["x<3"]);
}

#[test]
fn given_div_with_author_class_when_edits_by_author_then_only_spans_count() {
    let doc = document(r#"<div class="authora_x">block</div><span class="authora_x">inline</span>"#);

    assert_eq!(doc.edits_by_author("a.x"), vec!["inline"]);
}

#[test]
fn given_character_references_when_edits_by_author_then_text_is_decoded() {
    let doc = document(r#"<span class="authora_x">fish &amp; chips&#33;</span>"#);

    assert_eq!(doc.edits_by_author("a.x"), vec!["fish & chips!"]);
    assert!(doc.to_html().contains("fish &amp; chips&#33;"));
}

/// **VALUE**: Verifies token-exact relabeling when one author id is a prefix of another.
///
/// **WHY THIS MATTERS**: Positional labels are how anonymized exports stay
/// comparable. Substring replacement would merge `a.1` and `a.10` into one author.
///
/// **BUG THIS CATCHES**: Would catch `str::replace` on the serialized markup,
/// which rewrites `authora_10` to `author10` through the `authora_1` prefix.
#[test]
fn given_prefix_author_ids_when_anonymize_then_each_token_is_relabeled_exactly() {
    // GIVEN: Two authors whose classes share a prefix
    let doc = document(concat!(
        r#"<span class="authora_10">ten</span>"#,
        r#"<span class="authora_1">one</span>"#,
    ));

    // WHEN: Anonymizing with a.1 first
    let html = doc.anonymize(&["a.1", "a.10"]);

    // THEN: Each span gets its own label
    assert_eq!(
        html,
        r#"<span class="author2">ten</span><span class="author1">one</span>"#
    );
}

#[test]
fn given_multiple_classes_when_anonymize_then_other_tokens_are_kept() {
    let doc = document(r#"<span class="b authora_x i" title="authora_x">t</span>"#);

    let html = doc.anonymize(&["a.x"]);

    assert_eq!(html, r#"<span class="b author1 i" title="authora_x">t</span>"#);
}

#[test]
fn given_author_listed_twice_when_anonymize_then_first_position_wins() {
    let doc = document(r#"<span class="authora_x">t</span><span class="authora_y">u</span>"#);

    let html = doc.anonymize(&["a.x", "a.y", "a.x"]);

    assert_eq!(html, r#"<span class="author1">t</span><span class="author2">u</span>"#);
}

/// **VALUE**: Verifies anonymization is idempotent on its own output.
///
/// **BUG THIS CATCHES**: Would catch a serializer that reorders attributes or
/// re-escapes text, so a second pass over exported markup changes it again.
#[test]
fn given_anonymized_output_when_anonymized_with_no_authors_then_unchanged() {
    // GIVEN: Anonymized markup with comments, void elements and entities
    let doc = document(concat!(
        r#"<!-- rev 0 --><p class='x'>a&lt;b<br><img src="i.png"/></p>"#,
        r#"<span class="authora_x">t</span> 1 < 2"#,
    ));
    let first = doc.anonymize(&["a.x"]);

    // WHEN: Parsing the output and anonymizing with an empty order
    let second = document(&first).anonymize::<&str>(&[]);

    // THEN: Unchanged
    assert_eq!(second, first);
}

#[test]
fn given_style_elements_when_parsed_then_they_are_removed() {
    let doc = document(concat!(
        r#"<style>.authora_x { color: red; }</style>"#,
        r#"<div><STYLE type="text/css">span > b {}</STYLE><span class="authora_x">hi</span></div>"#,
    ));

    assert_eq!(doc.to_html(), r#"<div><span class="authora_x">hi</span></div>"#);
    assert_eq!(doc.edits_by_author("a.x"), vec!["hi"]);
}

#[test]
fn given_authors_when_parsed_then_document_keeps_them() {
    let doc = DiffDocument::parse("<p>x</p>", vec![String::from("a.x")]).expect("parse");

    assert_eq!(doc.authors(), ["a.x"]);
    assert!(!doc.is_empty());
    assert!(document("").is_empty());
}

#[test]
fn given_truncated_tag_when_parsed_then_returns_parse_error() {
    let result = DiffDocument::parse(r#"<span class="authora_x">hi</span><span class=""#, Vec::new());

    assert!(
        matches!(result, Err(crate::EtherpadError::Parse { .. })),
        "got {result:?}"
    );
}
