use crate::api::{ApiMethod, ApiResponse};
use crate::client::{AUTHOR_ID_PARAM, EtherpadClient, PAD_ID_PARAM};
use crate::error::EtherpadError;

use models::pad_summary::builder::MIN_AUTHORS;
use models::{PadSummary, PadSummaryBuilder};

use log::{debug, info, trace};
use serde_json::Value;

/// Length of the generated pad ids the multi-author listing considers.
pub const GROUP_PAD_ID_LEN: usize = 13;

const AUTHOR_IDS_FIELD: &str = "authorIDs";
const AUTHOR_NAME_FIELD: &str = "authorName";
const TEXT_FIELD: &str = "text";
const PAD_IDS_FIELD: &str = "padIDs";
const LAST_EDITED_FIELD: &str = "lastEdited";

impl EtherpadClient {
    /// Distinct author ids of a pad, in the order the server lists them.
    ///
    /// A pad nobody has written in yet has no authors; that is an empty
    /// list, not an error.
    pub async fn list_authors(&mut self, pad_id: &str) -> Result<Vec<String>, EtherpadError> {
        let result = self.fetch_authors(pad_id).await;
        self.settle(result)
    }

    /// Display name of an author, or `None` when the author never set one.
    pub async fn get_author_name(
        &mut self,
        author_id: &str,
    ) -> Result<Option<String>, EtherpadError> {
        let result = self.fetch_author_name(author_id).await;
        self.settle(result)
    }

    /// Current plain-text body of a pad.
    pub async fn get_text(&mut self, pad_id: &str) -> Result<String, EtherpadError> {
        let result = self.fetch_text(pad_id).await;
        self.settle(result)
    }

    pub async fn list_all_pads(&mut self) -> Result<Vec<String>, EtherpadError> {
        let result = self.fetch_all_pads().await;
        self.settle(result)
    }

    /// Last edit of a pad in milliseconds since the Unix epoch.
    pub async fn get_last_edited(&mut self, pad_id: &str) -> Result<u64, EtherpadError> {
        let result = self.fetch_last_edited(pad_id).await;
        self.settle(result)
    }

    /// Every group pad with at least two authors, with author display names.
    ///
    /// Issues one `listAuthorsOfPad` per group pad, then one `getLastEdited`
    /// and one `getAuthorName` per author for each retained pad, all in
    /// sequence. Expect this to be slow on servers with many pads.
    ///
    /// In collect mode a failing lookup is logged and skipped: a pad whose
    /// authors cannot be listed is left out, and an author whose name
    /// cannot be resolved maps to an empty name.
    pub async fn list_pads_with_multiple_authors(
        &mut self,
    ) -> Result<Vec<PadSummary>, EtherpadError> {
        let pad_ids = self.list_all_pads().await?;
        let mut summaries = Vec::new();

        for pad_id in &pad_ids {
            if pad_id.chars().count() != GROUP_PAD_ID_LEN {
                trace!("Skipping pad {pad_id:?}: not a group pad id");
                continue;
            }

            let authors = self.list_authors(pad_id).await?;
            if authors.len() < MIN_AUTHORS {
                trace!("Skipping pad {pad_id}: {} author(s)", authors.len());
                continue;
            }

            let last_edited = self.get_last_edited(pad_id).await?;

            let mut builder = PadSummaryBuilder::default()
                .with_pad_id(pad_id.as_str())
                .with_last_edited(last_edited);
            for author_id in &authors {
                let name = self.get_author_name(author_id).await?.unwrap_or_default();
                builder = builder.with_author(author_id.as_str(), name);
            }

            let built = builder.build().map(Some).map_err(EtherpadError::from);
            if let Some(summary) = self.settle(built)? {
                summaries.push(summary);
            }
        }

        info!(
            "{} of {} pads have {MIN_AUTHORS} or more authors",
            summaries.len(),
            pad_ids.len()
        );
        Ok(summaries)
    }

    async fn fetch_authors(&self, pad_id: &str) -> Result<Vec<String>, EtherpadError> {
        let response = self
            .request(ApiMethod::ListAuthorsOfPad, &[(PAD_ID_PARAM, pad_id)])
            .await
            .map_err(EtherpadError::into_not_found)?;

        let listed: Vec<String> = response.field(AUTHOR_IDS_FIELD)?;

        let mut authors: Vec<String> = Vec::with_capacity(listed.len());
        for author_id in listed {
            if !author_id.is_empty() && !authors.contains(&author_id) {
                authors.push(author_id);
            }
        }

        debug!("Pad {pad_id} has {} author(s)", authors.len());
        Ok(authors)
    }

    async fn fetch_author_name(&self, author_id: &str) -> Result<Option<String>, EtherpadError> {
        let response = self
            .request(ApiMethod::GetAuthorName, &[(AUTHOR_ID_PARAM, author_id)])
            .await
            .map_err(EtherpadError::into_not_found)?;

        author_name(&response)
    }

    async fn fetch_text(&self, pad_id: &str) -> Result<String, EtherpadError> {
        self.request(ApiMethod::GetText, &[(PAD_ID_PARAM, pad_id)])
            .await
            .map_err(EtherpadError::into_not_found)?
            .field(TEXT_FIELD)
    }

    async fn fetch_all_pads(&self) -> Result<Vec<String>, EtherpadError> {
        self.request(ApiMethod::ListAllPads, &[])
            .await?
            .field(PAD_IDS_FIELD)
    }

    async fn fetch_last_edited(&self, pad_id: &str) -> Result<u64, EtherpadError> {
        self.request(ApiMethod::GetLastEdited, &[(PAD_ID_PARAM, pad_id)])
            .await
            .map_err(EtherpadError::into_not_found)?
            .field(LAST_EDITED_FIELD)
    }
}

/// Etherpad has answered `getAuthorName` both with the bare name and with
/// `{"authorName": ...}`; a null name means none was set.
#[track_caller]
fn author_name(response: &ApiResponse) -> Result<Option<String>, EtherpadError> {
    let value = match &response.data {
        Value::Object(fields) => fields.get(AUTHOR_NAME_FIELD).unwrap_or(&Value::Null),
        other => other,
    };

    match value {
        Value::Null => Ok(None),
        Value::String(name) => Ok(Some(name.clone())),
        other => Err(EtherpadError::parse(format!(
            "getAuthorName returned {other} instead of a name"
        ))),
    }
}
