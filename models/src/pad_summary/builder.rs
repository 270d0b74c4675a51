use crate::error::model_error::ModelError;
use crate::{ErrorLocation, PadSummary};

use std::collections::BTreeMap;
use std::panic::Location;

/// Minimum number of distinct authors for a pad to be summarized.
pub const MIN_AUTHORS: usize = 2;

/// Builder for creating validated PadSummary instances.
#[derive(Debug, Default)]
pub struct PadSummaryBuilder {
    pad_id: Option<String>,
    last_edited: Option<u64>,
    authors: BTreeMap<String, String>,
}

impl PadSummaryBuilder {
    pub fn with_pad_id(mut self, pad_id: impl Into<String>) -> Self {
        self.pad_id = Some(pad_id.into());
        self
    }

    pub fn with_last_edited(mut self, last_edited: u64) -> Self {
        self.last_edited = Some(last_edited);
        self
    }

    /// Adds an author; a repeated id overwrites the earlier name.
    pub fn with_author(mut self, author_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.authors.insert(author_id.into(), name.into());
        self
    }

    /// Build the PadSummary with validation.
    #[track_caller]
    pub fn build(self) -> Result<PadSummary, ModelError> {
        let pad_id = self.pad_id.ok_or_else(|| ModelError::Validation {
            message: String::from("Pad ID is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if pad_id.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Pad ID cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let last_edited = self.last_edited.ok_or_else(|| ModelError::Validation {
            message: String::from("Last edited timestamp is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if self.authors.len() < MIN_AUTHORS {
            return Err(ModelError::Validation {
                message: format!(
                    "Pad {pad_id} has {} author(s), at least {MIN_AUTHORS} required",
                    self.authors.len()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(empty) = self.authors.keys().find(|id| id.is_empty()) {
            return Err(ModelError::Validation {
                message: format!("Pad {pad_id} lists an empty author id {empty:?}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(PadSummary {
            pad_id,
            last_edited,
            authors: self.authors,
        })
    }
}
