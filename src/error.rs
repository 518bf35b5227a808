//! Errors raised by the record model itself.

use thiserror::Error;

/// Errors that can occur while building, serializing, or parsing an [`ErrorRecord`].
///
/// [`ErrorRecord`]: crate::ErrorRecord
#[derive(Debug, Error)]
pub enum RecordError {
    /// The builder was finished without an error to capture.
    #[error("cannot capture an error record without an error")]
    MissingError,

    /// Structured text could not be parsed back into a record.
    #[error("malformed error record: {0}")]
    Malformed(#[source] serde_json::Error),

    /// A record could not be written out.
    #[error("failed to serialize error record: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Configuration was invalid or installed twice.
    #[error("invalid capture configuration: {0}")]
    Config(String),
}

/// Result alias for record operations.
pub type RecordResult<T> = Result<T, RecordError>;
