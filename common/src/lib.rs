//! Shared primitives for the Etherpad client workspace.
//!
//! ## Architecture
//!
//! - **common** (this crate): error locations, secret handling, status codes
//! - **models**: Pure data structures (versions, contributions, pad summaries)
//! - **etherpad-client**: HTTP request layer, version gate and diff parser
//!
//! Nothing in here performs I/O.

pub mod error;
pub mod http_status;
pub mod redacted_key;


pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_key::RedactedApiKey;
