//! Node tree for diff markup.
//!
//! Parsing is lenient in the way browser-less HTML parsers are: unclosed
//! elements are closed at the end of their parent or of the input, and end
//! tags with no open element are dropped. Only truncated markup (a tag,
//! comment or raw-text body that never ends) is an error.

use crate::diff::entities;
use crate::diff::lexer::{HtmlToken, tag_name};
use crate::error::EtherpadError;

use std::fmt::Write as _;

use log::trace;
use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Deepest element nesting accepted. Tree walks recurse once per level.
pub const MAX_DEPTH: usize = 512;

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("valid attribute pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Text exactly as written, character references undecoded.
    Text(String),
    Comment(String),
    /// `<!DOCTYPE ...>` or `<?...>`, kept verbatim.
    Declaration(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    self_closing: bool,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .and_then(|attribute| attribute.value.as_deref())
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut String> {
        self.attributes
            .iter_mut()
            .find(|attribute| attribute.name == name)
            .and_then(|attribute| attribute.value.as_mut())
    }

    /// Whitespace-separated tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.classes().any(|class| class == token)
    }

    /// Decoded text of every descendant text node, in document order.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }

    /// Decoded text of each descendant text node, in document order.
    pub fn text_runs(&self) -> Vec<String> {
        let mut runs = Vec::new();
        collect_runs(&self.children, &mut runs);
        runs
    }

    /// Outermost descendant elements named `name`, not descending into matches.
    pub fn outermost_descendants(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_outermost(&self.children, name, &mut found);
        found
    }
}

fn collect_text(nodes: &[Node], text: &mut String) {
    for node in nodes {
        match node {
            Node::Text(raw) => text.push_str(&entities::decode(raw)),
            Node::Element(element) => collect_text(&element.children, text),
            Node::Comment(_) | Node::Declaration(_) => {}
        }
    }
}

fn collect_runs(nodes: &[Node], runs: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::Text(raw) => runs.push(entities::decode(raw).into_owned()),
            Node::Element(element) => collect_runs(&element.children, runs),
            Node::Comment(_) | Node::Declaration(_) => {}
        }
    }
}

fn collect_outermost<'a>(nodes: &'a [Node], name: &str, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(element) = node {
            if element.name == name {
                found.push(element);
            } else {
                collect_outermost(&element.children, name, found);
            }
        }
    }
}

/// Parses a markup fragment into its top-level nodes.
///
/// # Errors
///
/// Returns [`EtherpadError::Parse`] for an unterminated tag, comment or
/// raw-text element, or for elements nested deeper than [`MAX_DEPTH`].
pub fn parse_fragment(source: &str) -> Result<Vec<Node>, EtherpadError> {
    let mut lexer = HtmlToken::lexer(source);
    let mut open: Vec<Element> = Vec::new();
    let mut roots: Vec<Node> = Vec::new();

    while let Some(token) = lexer.next() {
        let offset = lexer.span().start;
        let slice = lexer.slice();

        let node = match token {
            Ok(HtmlToken::Text) => Node::Text(slice.to_string()),
            Ok(HtmlToken::Lt) => {
                let opens_markup = lexer
                    .remainder()
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic() || c == '/');
                if opens_markup {
                    return Err(EtherpadError::parse(format!(
                        "unterminated tag at byte {offset}"
                    )));
                }
                Node::Text(slice.to_string())
            }
            Ok(HtmlToken::Comment) => {
                Node::Comment(slice["<!--".len()..slice.len() - "-->".len()].to_string())
            }
            Ok(HtmlToken::Declaration) => Node::Declaration(slice.to_string()),
            Ok(HtmlToken::EndTag) => {
                close_element(&mut open, &mut roots, &tag_name(slice));
                continue;
            }
            Ok(HtmlToken::StartTag) => {
                let mut element = parse_start_tag(slice);

                if element.self_closing || VOID_ELEMENTS.contains(&element.name.as_str()) {
                    Node::Element(element)
                } else if RAW_TEXT_ELEMENTS.contains(&element.name.as_str()) {
                    let remainder = lexer.remainder();
                    let closing = format!("</{}", element.name);
                    let body_len = remainder
                        .to_ascii_lowercase()
                        .find(&closing)
                        .ok_or_else(|| {
                            EtherpadError::parse(format!(
                                "unterminated <{}> at byte {offset}",
                                element.name
                            ))
                        })?;
                    let tag_len = remainder[body_len..].find('>').ok_or_else(|| {
                        EtherpadError::parse(format!(
                            "unterminated </{}> at byte {offset}",
                            element.name
                        ))
                    })? + 1;

                    let body = &remainder[..body_len];
                    if !body.is_empty() {
                        element.children.push(Node::Text(body.to_string()));
                    }
                    lexer.bump(body_len + tag_len);
                    Node::Element(element)
                } else {
                    if open.len() >= MAX_DEPTH {
                        return Err(EtherpadError::parse(format!(
                            "elements nested deeper than {MAX_DEPTH} at byte {offset}"
                        )));
                    }
                    open.push(element);
                    continue;
                }
            }
            Err(()) => {
                return Err(EtherpadError::parse(format!(
                    "unterminated markup at byte {offset}"
                )));
            }
        };

        append(&mut open, &mut roots, node);
    }

    close_all(&mut open, &mut roots, 0);
    Ok(roots)
}

fn parse_start_tag(slice: &str) -> Element {
    let name = tag_name(slice);
    let inner = slice[1..slice.len() - 1].trim_end();
    let self_closing = inner.ends_with('/');
    let inner = inner.trim_end_matches('/');
    let attributes_source = &inner[name.len().min(inner.len())..];

    let attributes = ATTRIBUTE
        .captures_iter(attributes_source)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|value| value.as_str().to_string());
            Some(Attribute { name, value })
        })
        .collect();

    Element {
        name,
        attributes,
        children: Vec::new(),
        self_closing,
    }
}

fn append(open: &mut [Element], roots: &mut Vec<Node>, node: Node) {
    let siblings = match open.last_mut() {
        Some(parent) => &mut parent.children,
        None => roots,
    };
    push_merging_text(siblings, node);
}

/// Pushes `node`, extending the last sibling instead when both are text.
fn push_merging_text(siblings: &mut Vec<Node>, node: Node) {
    if let (Node::Text(text), Some(Node::Text(previous))) = (&node, siblings.last_mut()) {
        previous.push_str(text);
        return;
    }
    siblings.push(node);
}

fn close_element(open: &mut Vec<Element>, roots: &mut Vec<Node>, name: &str) {
    match open.iter().rposition(|element| element.name == name) {
        Some(index) => close_all(open, roots, index),
        None => trace!("Dropping stray </{name}>"),
    }
}

/// Closes every open element from `index` up, nesting each into its parent.
fn close_all(open: &mut Vec<Element>, roots: &mut Vec<Node>, index: usize) {
    let mut closing = open.split_off(index);
    while let Some(element) = closing.pop() {
        match closing.last_mut() {
            Some(parent) => parent.children.push(Node::Element(element)),
            None => append(open, roots, Node::Element(element)),
        }
    }
}

/// Removes every element named `name`, with its subtree. Text on either
/// side of a removed element becomes one text node.
pub fn remove_elements(nodes: &mut Vec<Node>, name: &str) {
    if nodes
        .iter()
        .any(|node| matches!(node, Node::Element(element) if element.name == name))
    {
        let kept = std::mem::take(nodes);
        for node in kept {
            if !matches!(&node, Node::Element(element) if element.name == name) {
                push_merging_text(nodes, node);
            }
        }
    }

    for node in nodes.iter_mut() {
        if let Node::Element(element) = node {
            remove_elements(&mut element.children, name);
        }
    }
}

/// Applies `visit` to every element, parents before children.
pub fn for_each_element_mut<F>(nodes: &mut [Node], visit: &mut F)
where
    F: FnMut(&mut Element),
{
    for node in nodes {
        if let Node::Element(element) = node {
            visit(element);
            for_each_element_mut(&mut element.children, visit);
        }
    }
}

pub fn to_html(nodes: &[Node]) -> String {
    let mut html = String::new();
    write_nodes(nodes, &mut html);
    html
}

fn write_nodes(nodes: &[Node], html: &mut String) {
    for node in nodes {
        match node {
            Node::Text(raw) => html.push_str(raw),
            Node::Comment(body) => {
                let _ = write!(html, "<!--{body}-->");
            }
            Node::Declaration(raw) => html.push_str(raw),
            Node::Element(element) => write_element(element, html),
        }
    }
}

fn write_element(element: &Element, html: &mut String) {
    html.push('<');
    html.push_str(&element.name);

    for attribute in &element.attributes {
        html.push(' ');
        html.push_str(&attribute.name);
        if let Some(value) = &attribute.value {
            let quote = if value.contains('"') { '\'' } else { '"' };
            let _ = write!(html, "={quote}{value}{quote}");
        }
    }

    if element.self_closing {
        html.push_str("/>");
        return;
    }
    html.push('>');

    if VOID_ELEMENTS.contains(&element.name.as_str()) {
        return;
    }

    write_nodes(&element.children, html);
    let _ = write!(html, "</{}>", element.name);
}
