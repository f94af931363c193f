//! Error types for the AHA design-rule checker.
//!
//! Only failures that stop a run entirely live here: the graph document could
//! not be read or could not be parsed at all, or the report could not be
//! written. Rule violations are not errors; they are [`Issue`](crate::drc::Issue)
//! values carried by a successful report.

use thiserror::Error;

/// Result type alias using [`DrcError`].
pub type Result<T> = std::result::Result<T, DrcError>;

/// Unified error type for all DRC operations.
#[derive(Error, Debug)]
pub enum DrcError {
    // ============ Input Errors ============
    /// Error reading the graph file
    #[error("Failed to read graph file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error reading the graph from a stream (e.g. stdin)
    #[error("Failed to read graph input: {source}")]
    InputReadError {
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not have the expected shape
    #[error("{source}")]
    ParseError {
        #[from]
        source: serde_json::Error,
    },

    /// The document parsed but is structurally unusable
    #[error("Invalid graph document: {message}")]
    InvalidDocument { message: String },

    // ============ Output Errors ============
    /// Error serializing or writing the report
    #[error("Report output error: {message}")]
    OutputError { message: String },
}

impl DrcError {
    /// Create an invalid document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::OutputError {
            message: message.into(),
        }
    }
}
