//! Tokenizer for Etherpad diff markup using logos.
//!
//! Tags are lexed whole; attributes are split out of the tag slice later.
//! Raw-text element bodies (`<style>`, `<script>`) are consumed by the tree
//! builder through [`Lexer::remainder`] and [`Lexer::bump`].

use logos::{Lexer, Logos};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlToken {
    #[regex(r#"<[a-zA-Z][a-zA-Z0-9:_-]*([^>"']|"[^"]*"|'[^']*')*>"#)]
    StartTag,

    #[regex(r"</[a-zA-Z][a-zA-Z0-9:_-]*[^>]*>")]
    EndTag,

    #[token("<!--", comment_body)]
    Comment,

    #[regex(r"<![a-zA-Z][^>]*>")]
    #[regex(r"<\?[^>]*>")]
    Declaration,

    #[regex(r"[^<]+")]
    Text,

    // A `<` that does not open markup.
    #[token("<")]
    Lt,
}

/// Extends a `<!--` match through the closing `-->`; fails when unterminated.
fn comment_body(lex: &mut Lexer<HtmlToken>) -> bool {
    match lex.remainder().find("-->") {
        Some(end) => {
            lex.bump(end + 3);
            true
        }
        None => false,
    }
}

/// Lower-cased tag name of a start or end tag slice.
pub fn tag_name(slice: &str) -> String {
    slice
        .trim_start_matches('<')
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '-'))
        .collect::<String>()
        .to_ascii_lowercase()
}
