//! Author attribution over Etherpad's `createDiffHTML` markup.
//!
//! The diff renderer wraps each author's text in a `<span>` whose class is
//! derived from the author id (`a.xyz` becomes `authora_xyz`). Deleted text is
//! rendered as a span nested inside the author's span, so a tagged span with
//! a nested span is a deletion and one without is an insertion.

pub mod entities;
pub mod lexer;
pub mod tree;

use crate::error::EtherpadError;

use tree::{Element, Node};

use models::{ContributionKind, ContributionSpan, Contributions};

use std::collections::HashMap;

use log::{debug, trace};

const AUTHOR_CLASS_PREFIX: &str = "author";
const SPAN: &str = "span";
const STYLE: &str = "style";

/// Class tokens the diff renderer may have generated for `author_id`.
///
/// Dots are not valid in class names, so they become underscores; the token
/// is either glued to the prefix (`authora_xyz`) or separated from it
/// (`author_a_xyz`).
pub fn author_class_tokens(author_id: &str) -> [String; 2] {
    let normalized = author_id.replace('.', "_");
    [
        format!("{AUTHOR_CLASS_PREFIX}{normalized}"),
        format!("{AUTHOR_CLASS_PREFIX}_{normalized}"),
    ]
}

/// Strips the whitespace and escaping the API layers add to the HTML payload.
pub fn normalize_markup(raw: &str) -> String {
    raw.replace("\\\"", "\"")
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
        .collect()
}

/// Parsed diff markup for one pad, with `<style>` elements removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffDocument {
    nodes: Vec<Node>,
    authors: Vec<String>,
}

impl DiffDocument {
    /// Normalizes and parses `raw_html`.
    ///
    /// `authors` is the author list returned alongside the markup; it is
    /// kept for callers and does not affect parsing.
    ///
    /// # Errors
    ///
    /// Returns [`EtherpadError::Parse`] if the markup cannot be built into a tree.
    pub fn parse(raw_html: &str, authors: Vec<String>) -> Result<Self, EtherpadError> {
        let normalized = normalize_markup(raw_html);
        let mut nodes = tree::parse_fragment(&normalized)?;
        tree::remove_elements(&mut nodes, STYLE);

        debug!(
            "Parsed diff markup: {} bytes, {} top-level nodes, {} authors",
            normalized.len(),
            nodes.len(),
            authors.len()
        );

        Ok(Self { nodes, authors })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Authors the server listed for the diff.
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn to_html(&self) -> String {
        tree::to_html(&self.nodes)
    }

    /// Serializes the document with author class tokens replaced by
    /// `author1`, `author2`, ... in `author_order` order.
    ///
    /// Replacement is per class token, so `authora_1` never rewrites part of
    /// `authora_10`. An author listed twice keeps its first position.
    pub fn anonymize<S: AsRef<str>>(&self, author_order: &[S]) -> String {
        let mut labels: HashMap<String, String> = HashMap::new();
        for (position, author) in author_order.iter().enumerate() {
            let label = format!("{AUTHOR_CLASS_PREFIX}{}", position + 1);
            for token in author_class_tokens(author.as_ref()) {
                labels.entry(token).or_insert_with(|| label.clone());
            }
        }

        if labels.is_empty() {
            return self.to_html();
        }

        let mut nodes = self.nodes.clone();
        tree::for_each_element_mut(&mut nodes, &mut |element: &mut Element| {
            let Some(class) = element.attribute_mut("class") else {
                return;
            };

            if !class.split_whitespace().any(|token| labels.contains_key(token)) {
                return;
            }

            let relabeled = class
                .split_whitespace()
                .map(|token| labels.get(token).map_or(token, String::as_str))
                .collect::<Vec<_>>()
                .join(" ");
            *class = relabeled;
        });

        tree::to_html(&nodes)
    }

    /// Text runs inside every span tagged with the author's class, in
    /// document order. Runs of nested spans, which hold the author's
    /// deletions, are included.
    pub fn edits_by_author(&self, author_id: &str) -> Vec<String> {
        let tokens = author_class_tokens(author_id);
        let mut edits = Vec::new();
        visit_tagged_spans(&self.nodes, &tokens, &mut |span| {
            edits.extend(span.text_runs().into_iter().filter(|run| !run.is_empty()));
        });
        edits
    }

    /// Every inserted or deleted run attributed to one of `authors`.
    ///
    /// A tagged span is not searched for further tagged spans, so each text
    /// node contributes to at most one run per author.
    pub fn contribution_spans<S: AsRef<str>>(&self, authors: &[S]) -> Vec<ContributionSpan> {
        let mut spans = Vec::new();
        for author in authors {
            let author_id = author.as_ref();
            let tokens = author_class_tokens(author_id);
            collect_contributions(&self.nodes, author_id, &tokens, &mut spans);
        }
        spans
    }

    /// Inserted and deleted text per author, following the nested-span convention.
    pub fn classify<S: AsRef<str>>(&self, authors: &[S]) -> Contributions {
        Contributions::from_spans(authors, self.contribution_spans(authors))
    }
}

fn is_tagged(element: &Element, tokens: &[String; 2]) -> bool {
    element.name == SPAN && tokens.iter().any(|token| element.has_class(token))
}

/// Visits the outermost spans tagged with `tokens`.
fn visit_tagged_spans<'a, F>(nodes: &'a [Node], tokens: &[String; 2], visit: &mut F)
where
    F: FnMut(&'a Element),
{
    for node in nodes {
        if let Node::Element(element) = node {
            if is_tagged(element, tokens) {
                visit(element);
            } else {
                visit_tagged_spans(&element.children, tokens, visit);
            }
        }
    }
}

fn collect_contributions(
    nodes: &[Node],
    author_id: &str,
    tokens: &[String; 2],
    spans: &mut Vec<ContributionSpan>,
) {
    for node in nodes {
        let Node::Element(element) = node else {
            continue;
        };

        if !is_tagged(element, tokens) {
            collect_contributions(&element.children, author_id, tokens, spans);
            continue;
        }

        let nested = element.outermost_descendants(SPAN);
        if nested.is_empty() {
            let text = element.text_content();
            if !text.is_empty() {
                trace!("{author_id} inserted {} chars", text.chars().count());
                spans.push(ContributionSpan::new(author_id, text, ContributionKind::Inserted));
            }
            continue;
        }

        for deleted in nested {
            let text = deleted.text_content();
            if !text.is_empty() {
                trace!("{author_id} deleted {} chars", text.chars().count());
                spans.push(ContributionSpan::new(author_id, text, ContributionKind::Deleted));
            }
        }
    }
}
