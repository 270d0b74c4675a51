//! The Etherpad API client.
//!
//! Every public operation settles its result the same way: a failure
//! is appended to the instance's error log and then either returned
//! (`ErrorMode::Raise`) or replaced by the empty value of the operation's
//! return type (`ErrorMode::Collect`).

mod diff;
mod pads;

pub use pads::GROUP_PAD_ID_LEN;

use crate::api::{ApiMethod, ApiResponse};
use crate::config::ClientConfig;
use crate::error::{ConfigError, EtherpadError};

use common::{ErrorLocation, HttpStatusCode};
use models::{ApiVersion, ErrorLogEntry, ErrorMode};

use std::panic::Location;

use log::{debug, error, info, warn};
use reqwest::Client;
use url::Url;

const API_PATH: &str = "api";
const API_KEY_PARAM: &str = "apikey";

pub(crate) const PAD_ID_PARAM: &str = "padID";
pub(crate) const AUTHOR_ID_PARAM: &str = "authorID";

pub struct EtherpadClient {
    config: ClientConfig,
    base_url: Url,
    http: Client,
    log: Vec<ErrorLogEntry>,
}

impl EtherpadClient {
    /// Validates `config` and builds the HTTP client.
    ///
    /// Configuration problems are always returned, whatever the error mode:
    /// without a client there is no log to collect into.
    pub fn new(config: ClientConfig) -> Result<Self, EtherpadError> {
        let base_url = config.validate()?;
        let http = build_http(&config)?;

        info!(
            "Etherpad client for {base_url} (API {}, {:?} mode, {}s timeout)",
            config.api_version, config.error_mode, config.timeout_secs
        );

        Ok(Self {
            config,
            base_url,
            http,
            log: Vec::new(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api_version(&self) -> ApiVersion {
        self.config.api_version
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.config.error_mode
    }

    /// Errors recorded by this client, oldest first.
    pub fn error_log(&self) -> &[ErrorLogEntry] {
        &self.log
    }

    pub fn clear_error_log(&mut self) {
        self.log.clear();
    }

    /// Calls `method` with `params` and returns the successful envelope.
    ///
    /// In collect mode a failed call yields `Ok(None)`; the reason is in
    /// [`EtherpadClient::error_log`].
    pub async fn call(
        &mut self,
        method: ApiMethod,
        params: &[(&str, &str)],
    ) -> Result<Option<ApiResponse>, EtherpadError> {
        let result = self.request(method, params).await.map(Some);
        self.settle(result)
    }

    /// Issues one request without recording failures.
    async fn request(
        &self,
        method: ApiMethod,
        params: &[(&str, &str)],
    ) -> Result<ApiResponse, EtherpadError> {
        self.check_version(method)?;

        let url = self.base_url.join(&format!(
            "{API_PATH}/{}/{}",
            self.config.api_version,
            method.name()
        ))?;

        debug!("GET {url} {params:?}");

        let response = self
            .http
            .get(url)
            .query(params)
            .query(&[(API_KEY_PARAM, self.config.api_key.as_str())])
            .send()
            .await?;

        let status = HttpStatusCode::from(response.status().as_u16());
        if !status.is_ok() {
            return Err(EtherpadError::Transport {
                message: format!("{method} answered with HTTP {status}"),
                status: Some(status),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body = response.text().await?;
        let envelope: ApiResponse = serde_json::from_str(&body)?;

        debug!("{method} returned {}", envelope.code);
        envelope.into_success()
    }

    /// Fails without touching the network when `method` is newer than the
    /// configured API version.
    #[track_caller]
    fn check_version(&self, method: ApiMethod) -> Result<(), EtherpadError> {
        let required = method.min_version();
        if self.config.api_version.satisfies(&required) {
            return Ok(());
        }

        Err(EtherpadError::Version {
            method: method.name(),
            required,
            configured: self.config.api_version,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Records a failed result and applies the error mode.
    fn settle<T: Default>(&mut self, result: Result<T, EtherpadError>) -> Result<T, EtherpadError> {
        let error = match result {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        self.record(&error);

        match self.config.error_mode {
            ErrorMode::Raise => Err(error),
            ErrorMode::Collect => Ok(T::default()),
        }
    }

    fn record(&mut self, failure: &EtherpadError) {
        match self.config.error_mode {
            ErrorMode::Raise => error!("{failure}"),
            ErrorMode::Collect => warn!("{failure}"),
        }

        self.log.push(ErrorLogEntry::new(
            failure.location(),
            failure.message(),
            failure.kind(),
        ));
    }
}

/// Builds the HTTP client. A failure here is a construction problem, so it
/// is reported as configuration.
#[track_caller]
pub(crate) fn build_http(config: &ClientConfig) -> Result<Client, ConfigError> {
    let location = ErrorLocation::from(Location::caller());

    Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| ConfigError::HttpClientError {
            location,
            reason: e.without_url().to_string(),
        })
}
