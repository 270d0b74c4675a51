use crate::api::ApiMethod;
use crate::client::{EtherpadClient, PAD_ID_PARAM};
use crate::diff::DiffDocument;
use crate::error::EtherpadError;

use models::Contributions;

use serde_json::Value;

const START_REV_PARAM: &str = "startRev";
/// Diff from the first revision, i.e. the pad's whole history.
const FULL_HISTORY_REV: &str = "0";

const HTML_FIELD: &str = "html";
const AUTHORS_FIELD: &str = "authors";

impl EtherpadClient {
    /// Fetches and parses the full-history diff markup of a pad.
    pub async fn extract_contributions(
        &mut self,
        pad_id: &str,
    ) -> Result<DiffDocument, EtherpadError> {
        let result = self.fetch_diff(pad_id).await;
        self.settle(result)
    }

    /// Diff markup with author classes replaced by `author1`, `author2`, ...
    /// following `author_order`.
    pub async fn render_anonymized_html<S: AsRef<str>>(
        &mut self,
        pad_id: &str,
        author_order: &[S],
    ) -> Result<String, EtherpadError> {
        let result = self
            .fetch_diff(pad_id)
            .await
            .map(|document| document.anonymize(author_order));
        self.settle(result)
    }

    /// Text runs inside spans tagged with `author_id`, in document order.
    pub async fn get_edits_by_author(
        &mut self,
        pad_id: &str,
        author_id: &str,
    ) -> Result<Vec<String>, EtherpadError> {
        let result = self
            .fetch_diff(pad_id)
            .await
            .map(|document| document.edits_by_author(author_id));
        self.settle(result)
    }

    /// Inserted and deleted text of each of `authors`.
    pub async fn classify_contributions<S: AsRef<str>>(
        &mut self,
        pad_id: &str,
        authors: &[S],
    ) -> Result<Contributions, EtherpadError> {
        let result = self
            .fetch_diff(pad_id)
            .await
            .map(|document| document.classify(authors));
        self.settle(result)
    }

    async fn fetch_diff(&self, pad_id: &str) -> Result<DiffDocument, EtherpadError> {
        let response = self
            .request(
                ApiMethod::CreateDiffHtml,
                &[(PAD_ID_PARAM, pad_id), (START_REV_PARAM, FULL_HISTORY_REV)],
            )
            .await
            .map_err(EtherpadError::into_not_found)?;

        let html: String = response.field(HTML_FIELD)?;

        let authors = match response.data.get(AUTHORS_FIELD) {
            None | Some(Value::Null) => Vec::new(),
            Some(_) => response
                .field::<Vec<Option<String>>>(AUTHORS_FIELD)?
                .into_iter()
                .flatten()
                .filter(|author| !author.is_empty())
                .collect(),
        };

        DiffDocument::parse(&html, authors)
    }
}
