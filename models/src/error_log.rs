//! Error log entries recorded by a client instance.

use crate::ErrorLocation;

use std::fmt;
use std::time::SystemTime;

use humantime::format_rfc3339_seconds;
use serde::{Deserialize, Serialize};

/// What a client does after recording an error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    /// Return the error to the caller, aborting the operation.
    Raise,
    /// Return an empty value of the operation's result type and keep going.
    #[default]
    Collect,
}

/// Category of a recorded error.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Version,
    Transport,
    Parse,
    Api,
    NotFound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Config => "config",
            ErrorKind::Version => "version",
            ErrorKind::Transport => "transport",
            ErrorKind::Parse => "parse",
            ErrorKind::Api => "api",
            ErrorKind::NotFound => "not-found",
        };
        f.write_str(name)
    }
}

/// One recorded failure. Lives as long as the client that recorded it.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorLogEntry {
    pub timestamp: SystemTime,
    pub origin: ErrorLocation,
    pub message: String,
    pub kind: ErrorKind,
}

impl ErrorLogEntry {
    pub fn new(origin: ErrorLocation, message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            timestamp: SystemTime::now(),
            origin,
            message: message.into(),
            kind,
        }
    }
}

impl fmt::Display for ErrorLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}:{}] {}",
            format_rfc3339_seconds(self.timestamp),
            self.kind,
            self.origin.file_name(),
            self.origin.line,
            self.message
        )
    }
}
