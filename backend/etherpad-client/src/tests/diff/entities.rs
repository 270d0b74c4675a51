use crate::diff::entities::decode;

use std::borrow::Cow;

#[test]
fn given_text_without_references_when_decode_then_borrows_input() {
    assert!(matches!(decode("plain text"), Cow::Borrowed("plain text")));
}

#[test]
fn given_named_references_when_decode_then_replaced() {
    assert_eq!(
        decode("&lt;b&gt; &amp; &quot;q&quot; &apos;a&apos;&nbsp;!"),
        "<b> & \"q\" 'a'\u{a0}!"
    );
}

#[test]
fn given_numeric_references_when_decode_then_replaced() {
    assert_eq!(decode("&#39;&#x41;&#X42;&#8364;"), "'AB\u{20ac}");
}

/// **BUG THIS CATCHES**: Would catch decoding that drops or mangles references
/// it does not know, or panics on a code point outside the Unicode range.
#[test]
fn given_unknown_or_invalid_references_when_decode_then_kept_verbatim() {
    assert_eq!(decode("&copy; &#xD800; &#1114112; & ;"), "&copy; &#xD800; &#1114112; & ;");
}
