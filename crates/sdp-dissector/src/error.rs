//! Error types for the SDP dissector
//!
//! Dissection itself never fails: every anomaly in the input is reported as an
//! ordinary record. [`LineError`] names *why* a line was rejected and travels
//! inside [`MalformedLine`](crate::types::MalformedLine). The crate-level
//! [`Error`] only covers the fallible edges around the parser (UTF-8 views,
//! display configuration and JSON export).

use thiserror::Error;

/// A type alias for handling `Result`s with `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Reason a line could not be read as `<tag>=<value>`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineError {
    /// The line holds fewer than two bytes, so it cannot contain even `x=`
    #[error("line too short: {len} byte(s), need at least 2")]
    TooShort {
        /// Length of the line content, terminator excluded
        len: usize,
    },

    /// The second byte of the line is not `=`
    #[error("missing '=' separator, found {found:#04x}")]
    MissingSeparator {
        /// The byte found where the separator was expected
        found: u8,
    },
}

/// Errors that can occur around SDP dissection
#[derive(Error, Debug)]
pub enum Error {
    /// A field value was requested as text but is not valid UTF-8
    #[error("Field value is not valid UTF-8 at byte offset {offset}")]
    InvalidUtf8 {
        /// Offset of the value within the input buffer
        offset: usize,
        /// Underlying decoding error
        #[source]
        source: std::str::Utf8Error,
    },

    /// Invalid display configuration
    #[error("Invalid display configuration: {0}")]
    Config(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(details: impl Into<String>) -> Self {
        Self::Config(details.into())
    }
}
