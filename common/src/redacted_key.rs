//! Etherpad API key handling with redacted Debug output.
//!
//! Etherpad authenticates every call with an `apikey` query parameter, so the
//! key ends up in request URLs. This wrapper keeps it out of logs, error
//! messages and serialized config dumps.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use serde::{Deserialize, Deserializer};
use zeroize::Zeroize;

/// An API key that never exposes its value in logs or debug output.
#[derive(Clone)]
pub struct RedactedApiKey {
    inner: String,
}

impl RedactedApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { inner: key.into() }
    }

    /// The raw key, for the `apikey` query parameter only.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Key length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl fmt::Debug for RedactedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedApiKey([REDACTED], {} chars)", self.inner.len())
    }
}

impl fmt::Display for RedactedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED API KEY]")
    }
}

impl Drop for RedactedApiKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl From<String> for RedactedApiKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<&str> for RedactedApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

// Config files carry the key, so reading is allowed.
impl<'de> Deserialize<'de> for RedactedApiKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

// Writing it back out is not.
impl serde::Serialize for RedactedApiKey {
    #[track_caller]
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from("RedactedApiKey cannot be serialized - use as_str() explicitly"),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
