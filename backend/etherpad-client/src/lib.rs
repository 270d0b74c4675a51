//! Client for the Etherpad HTTP API.
//!
//! Reads pad text, author lists and author names, and attributes the text in
//! a pad's diff markup to the authors who inserted or deleted it.

pub mod api;
pub mod client;
pub mod config;
pub mod diff;
pub mod error;
pub mod logger;

#[cfg(test)]
mod tests;

pub use api::{ApiCode, ApiMethod, ApiResponse};
pub use client::EtherpadClient;
pub use config::ClientConfig;
pub use diff::DiffDocument;
pub use error::{ConfigError, EtherpadError, LoggerError};

pub use models::{
    ApiVersion, ContributionKind, ContributionSpan, Contributions, ErrorKind, ErrorLogEntry,
    ErrorMode, PadSummary,
};
