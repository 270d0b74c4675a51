//! Domain models for the Etherpad client.
//!
//! Pure data structures describing what the Etherpad API hands back and what
//! the diff parser derives from it. Models have no I/O - they're just data
//! that can be passed between layers.

pub mod contribution;
pub mod error;
pub mod error_log;
pub mod pad_summary;
pub mod version;

#[cfg(test)]
mod tests;

pub use common::ErrorLocation;
pub use contribution::{ContributionKind, ContributionSpan, Contributions};
pub use error::model_error::ModelError;
pub use error_log::{ErrorKind, ErrorLogEntry, ErrorMode};
pub use pad_summary::PadSummary;
pub use pad_summary::builder::PadSummaryBuilder;
pub use version::ApiVersion;
