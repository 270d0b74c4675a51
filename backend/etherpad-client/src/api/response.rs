use crate::error::EtherpadError;

use common::ErrorLocation;

use std::fmt;
use std::panic::Location;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Envelope status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCode {
    Ok,
    WrongParameters,
    InternalError,
    NoSuchFunction,
    InvalidApiKey,
    Other(i64),
}

impl ApiCode {
    pub fn as_i64(&self) -> i64 {
        match self {
            ApiCode::Ok => 0,
            ApiCode::WrongParameters => 1,
            ApiCode::InternalError => 2,
            ApiCode::NoSuchFunction => 3,
            ApiCode::InvalidApiKey => 4,
            ApiCode::Other(code) => *code,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ApiCode::Ok)
    }
}

impl From<i64> for ApiCode {
    fn from(code: i64) -> Self {
        match code {
            0 => ApiCode::Ok,
            1 => ApiCode::WrongParameters,
            2 => ApiCode::InternalError,
            3 => ApiCode::NoSuchFunction,
            4 => ApiCode::InvalidApiKey,
            other => ApiCode::Other(other),
        }
    }
}

impl<'de> Deserialize<'de> for ApiCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(deserializer).map(ApiCode::from)
    }
}

impl fmt::Display for ApiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ApiCode::Ok => "ok",
            ApiCode::WrongParameters => "wrong parameters",
            ApiCode::InternalError => "internal error",
            ApiCode::NoSuchFunction => "no such function",
            ApiCode::InvalidApiKey => "no or wrong API key",
            ApiCode::Other(_) => "unknown code",
        };
        write!(f, "code {}: {label}", self.as_i64())
    }
}

/// A decoded `{code, message, data}` envelope.
///
/// The request layer only hands out envelopes whose code is `Ok`; anything
/// else becomes `EtherpadError::Api` before callers see `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub code: ApiCode,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl ApiResponse {
    /// Turns a non-zero code into `EtherpadError::Api`.
    #[track_caller]
    pub fn into_success(self) -> Result<Self, EtherpadError> {
        if self.code.is_ok() {
            return Ok(self);
        }

        Err(EtherpadError::Api {
            code: self.code,
            message: self
                .message
                .unwrap_or_else(|| String::from("no message")),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Deserializes `data[key]`.
    #[track_caller]
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Result<T, EtherpadError> {
        let location = ErrorLocation::from(Location::caller());

        let value = self.data.get(key).ok_or_else(|| EtherpadError::Parse {
            message: format!("response data has no {key:?} field"),
            location,
        })?;

        T::deserialize(value).map_err(|e| EtherpadError::Parse {
            message: format!("response field {key:?}: {e}"),
            location,
        })
    }
}
