//! Wire vocabulary of the Etherpad HTTP API.
//!
//! Every call is `GET {base}/api/{version}/{method}?...&apikey=...` and every
//! answer is a JSON envelope `{code, message, data}` with `code == 0` on success.

pub mod method;
pub mod response;

pub use method::ApiMethod;
pub use response::{ApiCode, ApiResponse};
