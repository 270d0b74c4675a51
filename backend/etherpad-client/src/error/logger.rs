use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum LoggerError {
    #[error("Logger Setup Error: {message} {location}")]
    Setup {
        message: String,
        location: ErrorLocation,
    },
}
