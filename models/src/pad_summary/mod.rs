pub mod builder;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A pad edited by more than one author, with every author's display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PadSummary {
    pub pad_id: String,
    /// Milliseconds since the Unix epoch, as reported by `getLastEdited`.
    pub last_edited: u64,
    /// Author id to display name. Authors without a name map to an empty string.
    pub authors: BTreeMap<String, String>,
}
