//! Error types for the fitlog_core library.

use serde::Serialize;
use std::fmt;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric field of a workout block
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Sets,
    Reps,
    Weight,
    Duration,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Sets => "sets",
            Field::Reps => "reps",
            Field::Weight => "weight",
            Field::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// Core error type for fitlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The submitted log contained no workout blocks
    #[error("no valid workouts found")]
    EmptyInput,

    /// A block violates the five-line grammar
    #[error("workout {ordinal} is malformed: {reason}")]
    MalformedBlock { ordinal: usize, reason: String },

    /// A numeric field in a block could not be parsed
    #[error("workout {ordinal} has an invalid {field} value")]
    InvalidNumeric { ordinal: usize, field: Field },

    /// Unknown owner at read time
    #[error("owner not found: {0}")]
    NotFound(String),

    /// A caller-supplied argument is unusable
    #[error("{0}")]
    InvalidArgument(String),

    /// The entry store failed or timed out
    #[error("entry store unavailable: {0}")]
    StoreUnavailable(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap an adapter failure as `StoreUnavailable`
    pub fn store(err: impl fmt::Display) -> Self {
        Error::StoreUnavailable(err.to_string())
    }

    pub fn status_kind(&self) -> StatusKind {
        match self {
            Error::EmptyInput
            | Error::MalformedBlock { .. }
            | Error::InvalidNumeric { .. }
            | Error::InvalidArgument(_) => StatusKind::BadRequest,
            Error::NotFound(_) => StatusKind::NotFound,
            Error::StoreUnavailable(_) => StatusKind::Unavailable,
            _ => StatusKind::Internal,
        }
    }
}

/// Coarse classification of an error for callers that render it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    BadRequest,
    NotFound,
    Unavailable,
    Internal,
}

/// Structured error shape handed to presentation
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub status_kind: StatusKind,
    pub message: String,
}

impl From<&Error> for ErrorReport {
    fn from(err: &Error) -> Self {
        ErrorReport {
            status_kind: err.status_kind(),
            message: err.to_string(),
        }
    }
}
