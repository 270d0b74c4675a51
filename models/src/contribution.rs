//! Per-author text attribution derived from diff markup.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContributionKind {
    Inserted,
    Deleted,
}

/// A run of text attributed to one author.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContributionSpan {
    pub author_id: String,
    pub text: String,
    pub kind: ContributionKind,
}

impl ContributionSpan {
    pub fn new(author_id: impl Into<String>, text: impl Into<String>, kind: ContributionKind) -> Self {
        Self {
            author_id: author_id.into(),
            text: text.into(),
            kind,
        }
    }
}

/// Inserted and deleted text, bucketed by author id.
///
/// Every author the buckets were built for has an entry in both maps, even
/// when it is empty.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Contributions {
    pub inserted: BTreeMap<String, Vec<String>>,
    pub deleted: BTreeMap<String, Vec<String>>,
}

impl Contributions {
    pub fn from_spans<A, I>(authors: A, spans: I) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        I: IntoIterator<Item = ContributionSpan>,
    {
        let mut contributions = Self::default();
        for author in authors {
            let author = author.as_ref();
            contributions.inserted.entry(author.to_string()).or_default();
            contributions.deleted.entry(author.to_string()).or_default();
        }

        for span in spans {
            let bucket = match span.kind {
                ContributionKind::Inserted => &mut contributions.inserted,
                ContributionKind::Deleted => &mut contributions.deleted,
            };
            bucket.entry(span.author_id).or_default().push(span.text);
        }

        contributions
    }

    pub fn inserted_by(&self, author_id: &str) -> &[String] {
        self.inserted.get(author_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn deleted_by(&self, author_id: &str) -> &[String] {
        self.deleted.get(author_id).map(Vec::as_slice).unwrap_or_default()
    }
}
