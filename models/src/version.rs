//! Etherpad HTTP API versions.

use crate::{ErrorLocation, ModelError};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Version of the Etherpad HTTP API, as it appears in `/api/{version}/...`.
///
/// Ordering is numeric per component, major first. Pre-release and build
/// suffixes are not part of Etherpad's API versioning and are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ApiVersion {
    /// Latest API version shipped with Etherpad 1.8, used when none is configured.
    pub const DEFAULT: Self = Self::new(1, 2, 12);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// True when a server speaking `self` offers methods introduced in `minimum`.
    pub fn satisfies(&self, minimum: &ApiVersion) -> bool {
        self >= minimum
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ApiVersion {
    type Err = ModelError;

    /// Accepts `major.minor` or `major.minor.patch`; a missing patch is zero.
    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let location = ErrorLocation::from(Location::caller());
        let fail = |reason: &str| ModelError::VersionParse {
            input: s.to_string(),
            reason: reason.to_string(),
            location,
        };

        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(fail("expected major.minor[.patch]"));
        }

        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(fail("components must be unsigned integers"));
            }
            *slot = part
                .parse()
                .map_err(|_| fail("component does not fit in 32 bits"))?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl Serialize for ApiVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
