use crate::error::config::ConfigError;

use common::{ErrorLocation, RedactedApiKey};
use models::{ApiVersion, ErrorMode};

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;
use url::Url;

const CONFIG_FILE_NAME: &str = "etherpad.toml";
const CONFIG_DIR_NAME: &str = "etherpad-client";
const DEFAULT_SCHEME_PREFIX: &str = "http://";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_URL: &str = "ETHERPAD_URL";
pub const ENV_API_KEY: &str = "ETHERPAD_API_KEY";
pub const ENV_API_VERSION: &str = "ETHERPAD_API_VERSION";
pub const ENV_ERROR_MODE: &str = "ETHERPAD_ERROR_MODE";

/// Connection settings for one Etherpad server.
///
/// Immutable once handed to [`crate::EtherpadClient::new`].
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(rename = "url")]
    pub base_url: String,

    pub api_key: RedactedApiKey,

    #[serde(default)]
    pub api_version: ApiVersion,

    #[serde(default)]
    pub error_mode: ErrorMode,

    /// Per-request timeout; a timed out call is a transport error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<RedactedApiKey>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_version: ApiVersion::default(),
            error_mode: ErrorMode::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load config from {config_dir}/etherpad.toml.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, malformed
    /// or fails [`ClientConfig::validate`].
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            })?;

        let config: ClientConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            })?;

        config.validate()?;

        info!(
            "Config loaded from {} (API {}, {:?} mode)",
            config_path.display(),
            config.api_version,
            config.error_mode
        );
        Ok(config)
    }

    /// Build config from the process environment, after loading `.env` if present.
    ///
    /// Reads `ETHERPAD_URL`, `ETHERPAD_API_KEY` and the optional
    /// `ETHERPAD_API_VERSION` / `ETHERPAD_ERROR_MODE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded .env from: {:?}", path),
            Err(e) => debug!("No .env loaded: {e}"),
        }

        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingVariable {
                    location: ErrorLocation::from(Location::caller()),
                    name,
                })
        };

        let mut config = Self::new(required(ENV_URL)?, required(ENV_API_KEY)?);

        if let Some(raw) = lookup(ENV_API_VERSION) {
            config.api_version =
                raw.parse::<ApiVersion>()
                    .map_err(|e| ConfigError::ValidationError {
                        location: ErrorLocation::from(Location::caller()),
                        reason: format!("{ENV_API_VERSION}: {e}"),
                    })?;
        }

        if let Some(raw) = lookup(ENV_ERROR_MODE) {
            config.error_mode = parse_error_mode(&raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and resolve the API base URL.
    ///
    /// A URL without a scheme is treated as `http://`. The returned URL
    /// always ends in `/` so endpoint paths join beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    #[track_caller]
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let location = ErrorLocation::from(Location::caller());

        let raw = self.base_url.trim();
        if raw.is_empty() {
            return Err(ConfigError::ValidationError {
                location,
                reason: String::from("A valid url must be specified."),
            });
        }

        if self.api_key.is_empty() {
            return Err(ConfigError::ValidationError {
                location,
                reason: String::from("A valid API key must be specified."),
            });
        }

        let with_scheme = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("{DEFAULT_SCHEME_PREFIX}{raw}")
        };

        let mut url = Url::parse(&with_scheme).map_err(|e| ConfigError::ValidationError {
            location,
            reason: format!("Invalid URL {raw:?}: {e}"),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                location,
                reason: format!("Unsupported URL scheme {:?}", url.scheme()),
            });
        }

        if url.host_str().is_none() {
            return Err(ConfigError::ValidationError {
                location,
                reason: format!("URL {raw:?} has no host"),
            });
        }

        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}

#[track_caller]
fn parse_error_mode(raw: &str) -> Result<ErrorMode, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "raise" => Ok(ErrorMode::Raise),
        "collect" => Ok(ErrorMode::Collect),
        other => Err(ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("{ENV_ERROR_MODE}: expected \"raise\" or \"collect\", got {other:?}"),
        }),
    }
}

/// Platform config directory for this client, e.g. `~/.config/etherpad-client`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}
