use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Parse Error: {path}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Missing Variable Error: {name} is not set {location}")]
    MissingVariable {
        location: ErrorLocation,
        name: &'static str,
    },

    #[error("Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Config HTTP Client Error: {reason} {location}")]
    HttpClientError {
        location: ErrorLocation,
        reason: String,
    },
}

impl ConfigError {
    pub fn location(&self) -> ErrorLocation {
        match self {
            ConfigError::ReadError { location, .. }
            | ConfigError::ParseError { location, .. }
            | ConfigError::MissingVariable { location, .. }
            | ConfigError::ValidationError { location, .. }
            | ConfigError::HttpClientError { location, .. } => *location,
        }
    }

    /// Description without the location suffix.
    pub fn reason(&self) -> String {
        match self {
            ConfigError::ReadError { path, source, .. } => {
                format!("{}: {source}", path.display())
            }
            ConfigError::ParseError { path, reason, .. } => {
                format!("{}: {reason}", path.display())
            }
            ConfigError::MissingVariable { name, .. } => format!("{name} is not set"),
            ConfigError::ValidationError { reason, .. }
            | ConfigError::HttpClientError { reason, .. } => reason.clone(),
        }
    }
}
