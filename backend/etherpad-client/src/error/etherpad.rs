use crate::api::ApiCode;
use crate::error::config::ConfigError;

use common::{ErrorLocation, HttpStatusCode};
use models::{ApiVersion, ErrorKind, ModelError};

use std::panic::Location;

use thiserror::Error as ThisError;

/// Phrase Etherpad uses when a pad or author id is unknown.
const MISSING_RESOURCE_PHRASE: &str = "does not exist";

#[derive(Debug, ThisError)]
pub enum EtherpadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(
        "Version Error: {method} requires API version {required} or later, configured {configured} {location}"
    )]
    Version {
        method: &'static str,
        required: ApiVersion,
        configured: ApiVersion,
        location: ErrorLocation,
    },

    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        status: Option<HttpStatusCode>,
        location: ErrorLocation,
    },

    #[error("Parse Error: {message} {location}")]
    Parse {
        message: String,
        location: ErrorLocation,
    },

    #[error("API Error: {message} ({code}) {location}")]
    Api {
        code: ApiCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Not Found Error: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },
}

impl EtherpadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EtherpadError::Config(_) => ErrorKind::Config,
            EtherpadError::Version { .. } => ErrorKind::Version,
            EtherpadError::Transport { .. } => ErrorKind::Transport,
            EtherpadError::Parse { .. } => ErrorKind::Parse,
            EtherpadError::Api { .. } => ErrorKind::Api,
            EtherpadError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// Where the error was raised.
    pub fn location(&self) -> ErrorLocation {
        match self {
            EtherpadError::Config(error) => error.location(),
            EtherpadError::Version { location, .. }
            | EtherpadError::Transport { location, .. }
            | EtherpadError::Parse { location, .. }
            | EtherpadError::Api { location, .. }
            | EtherpadError::NotFound { location, .. } => *location,
        }
    }

    /// Description without the kind prefix or location suffix.
    pub fn message(&self) -> String {
        match self {
            EtherpadError::Config(error) => error.reason(),
            EtherpadError::Version {
                method,
                required,
                configured,
                ..
            } => format!(
                "Etherpad API version {required} or later is required for {method}, you have: {configured}"
            ),
            EtherpadError::Transport { message, .. }
            | EtherpadError::Parse { message, .. }
            | EtherpadError::Api { message, .. }
            | EtherpadError::NotFound { message, .. } => message.clone(),
        }
    }

    /// Reclassifies an API rejection of an unknown pad or author as `NotFound`.
    ///
    /// Etherpad reports both as code 1 (wrong parameters) with a
    /// "padID does not exist" style message; other rejections pass through.
    pub fn into_not_found(self) -> Self {
        match self {
            EtherpadError::Api {
                code: ApiCode::WrongParameters,
                message,
                location,
            } if message.contains(MISSING_RESOURCE_PHRASE) => {
                EtherpadError::NotFound { message, location }
            }
            other => other,
        }
    }

    #[track_caller]
    pub fn parse(message: impl Into<String>) -> Self {
        EtherpadError::Parse {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for EtherpadError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        EtherpadError::Config(ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("invalid endpoint URL: {error}"),
        })
    }
}

impl From<reqwest::Error> for EtherpadError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        let status = error.status().map(|status| HttpStatusCode::from(status.as_u16()));
        let timed_out = error.is_timeout();
        // The request URL carries the API key as a query parameter.
        let error = error.without_url();

        let message = if timed_out {
            format!("request timed out: {error}")
        } else {
            error.to_string()
        };

        EtherpadError::Transport {
            message,
            status,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for EtherpadError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        EtherpadError::Parse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

// Model validation only fails on inconsistent API data.
impl From<ModelError> for EtherpadError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        let message = match error {
            ModelError::Validation { message, .. } => message,
            other => other.to_string(),
        };

        EtherpadError::Parse {
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
