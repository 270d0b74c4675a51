use crate::diff::tree::{MAX_DEPTH, Node, parse_fragment, remove_elements, to_html};
use crate::error::EtherpadError;

fn round_trip(source: &str) -> String {
    to_html(&parse_fragment(source).expect("markup should parse"))
}

#[test]
fn given_nested_markup_when_parsed_then_builds_element_tree() {
    let nodes = parse_fragment(r#"<p id=intro>Hi <b>there</b></p>tail"#).expect("parse");

    assert_eq!(nodes.len(), 2);
    let Node::Element(paragraph) = &nodes[0] else {
        panic!("Expected element, got {:?}", nodes[0]);
    };
    assert_eq!(paragraph.name, "p");
    assert_eq!(paragraph.attribute("id"), Some("intro"));
    assert_eq!(paragraph.text_content(), "Hi there");
    assert_eq!(paragraph.text_runs(), vec!["Hi ", "there"]);
    assert_eq!(nodes[1], Node::Text(String::from("tail")));
}

#[test]
fn given_mixed_case_names_when_parsed_then_names_are_lowercased() {
    let nodes = parse_fragment(r#"<SPAN CLASS="Authora_X">t</Span>"#).expect("parse");

    let Node::Element(span) = &nodes[0] else {
        panic!("Expected element");
    };
    assert_eq!(span.name, "span");
    assert!(span.has_class("Authora_X"));
    assert!(!span.has_class("authora_x"));
}

#[test]
fn given_valueless_and_single_quoted_attributes_when_serialized_then_values_are_kept() {
    assert_eq!(
        round_trip(r#"<input disabled value='say "hi"'>"#),
        r#"<input disabled value='say "hi"'>"#
    );
}

/// **VALUE**: Verifies lenient recovery from unclosed and stray tags.
///
/// **WHY THIS MATTERS**: Diff markup is generated from pad content and is not
/// guaranteed to be well formed. Rejecting it would make whole pads unreadable.
///
/// **BUG THIS CATCHES**: Would catch a builder that drops the children of
/// elements still open at the end of input.
#[test]
fn given_unclosed_and_stray_tags_when_parsed_then_tree_is_repaired() {
    assert_eq!(
        round_trip(r#"<ul><li>one<li>two"#),
        r#"<ul><li>one<li>two</li></li></ul>"#
    );
    assert_eq!(round_trip("a</b>c"), "ac");
    assert_eq!(round_trip("<p><i>x</p>y"), "<p><i>x</i></p>y");
}

#[test]
fn given_void_and_self_closing_elements_when_parsed_then_they_take_no_children() {
    let nodes = parse_fragment(r#"a<br>b<span/>c"#).expect("parse");

    assert_eq!(nodes.len(), 5);
    assert_eq!(to_html(&nodes), "a<br>b<span/>c");
}

#[test]
fn given_comments_and_declarations_when_parsed_then_kept_verbatim() {
    let source = "<!DOCTYPE html><!-- a <b> --><p>x</p>";

    let nodes = parse_fragment(source).expect("parse");

    assert_eq!(nodes[0], Node::Declaration(String::from("<!DOCTYPE html>")));
    assert_eq!(nodes[1], Node::Comment(String::from(" a <b> ")));
    assert_eq!(to_html(&nodes), source);
}

#[test]
fn given_script_body_with_markup_when_parsed_then_body_is_raw_text() {
    let nodes = parse_fragment("<script>if (a < b) { x = '<span>'; }</script>z").expect("parse");

    let Node::Element(script) = &nodes[0] else {
        panic!("Expected element");
    };
    assert_eq!(
        script.children,
        vec![Node::Text(String::from("if (a < b) { x = '<span>'; }"))]
    );
    assert_eq!(nodes[1], Node::Text(String::from("z")));
}

#[test]
fn given_lone_less_than_when_parsed_then_it_is_text() {
    assert_eq!(round_trip("1 < 2 <= 3"), "1 < 2 <= 3");
}

#[test]
fn given_lone_less_than_between_text_when_parsed_then_one_text_node() {
    let nodes = parse_fragment("<b>x<3</b>").expect("parse");

    let Node::Element(bold) = &nodes[0] else {
        panic!("Expected element");
    };
    assert_eq!(bold.children, vec![Node::Text(String::from("x<3"))]);
}

#[test]
fn given_text_around_removed_element_when_remove_elements_then_text_is_joined() {
    let mut nodes = parse_fragment("<p>be<style>x</style>fore</p>").expect("parse");

    remove_elements(&mut nodes, "style");

    let Node::Element(paragraph) = &nodes[0] else {
        panic!("Expected element");
    };
    assert_eq!(paragraph.text_runs(), vec!["before"]);
}

/// **VALUE**: Verifies that pathologically deep markup is rejected as a parse error.
///
/// **WHY THIS MATTERS**: Every walk over the tree, dropping it included,
/// recurses once per nesting level. A deep enough document would overflow
/// the stack instead of failing.
///
/// **BUG THIS CATCHES**: Would catch the depth limit being removed or applied
/// to siblings rather than to nesting.
#[test]
fn given_nesting_beyond_limit_when_parsed_then_returns_parse_error() {
    // GIVEN: Markup one level deeper than allowed, and markup exactly at the limit
    let too_deep = "<span>".repeat(MAX_DEPTH + 1);
    let at_limit = format!("{}x{}", "<span>".repeat(MAX_DEPTH), "</span>".repeat(MAX_DEPTH));

    // WHEN: Parsing both
    let rejected = parse_fragment(&too_deep);
    let accepted = parse_fragment(&at_limit);

    // THEN: Only the deeper one fails
    match rejected {
        Err(EtherpadError::Parse { message, .. }) => assert!(message.contains("nested deeper")),
        other => panic!("Expected parse error, got {other:?}"),
    }
    assert_eq!(to_html(&accepted.expect("markup at the limit should parse")), at_limit);
}

#[test]
fn given_many_siblings_when_parsed_then_depth_limit_does_not_apply() {
    let siblings = "<span>x</span>".repeat(MAX_DEPTH * 2);

    let nodes = parse_fragment(&siblings).expect("siblings are not nesting");

    assert_eq!(nodes.len(), MAX_DEPTH * 2);
}

#[test]
fn given_nested_elements_when_remove_elements_then_removed_at_every_depth() {
    let mut nodes = parse_fragment("<style>a</style><div><style>b</style>keep</div>").expect("parse");

    remove_elements(&mut nodes, "style");

    assert_eq!(to_html(&nodes), "<div>keep</div>");
}

#[test]
fn given_outer_span_when_outermost_descendants_then_skips_spans_inside_matches() {
    let nodes =
        parse_fragment("<span><b><span>1<span>2</span></span></b><span>3</span></span>").expect("parse");
    let Node::Element(outer) = &nodes[0] else {
        panic!("Expected element");
    };

    let found: Vec<String> = outer
        .outermost_descendants("span")
        .into_iter()
        .map(|span| span.text_content())
        .collect();

    assert_eq!(found, vec!["12", "3"]);
}

#[test]
fn given_truncated_markup_when_parsed_then_returns_parse_error() {
    for source in [
        "<p>fine</p><span",
        "<p>fine</p></span",
        "<!-- never closed",
        "<style>body {}",
    ] {
        let result = parse_fragment(source);
        assert!(
            matches!(result, Err(EtherpadError::Parse { .. })),
            "{source:?} gave {result:?}"
        );
    }
}
