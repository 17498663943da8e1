//! Normalization error type.
//!
//! [`ParseError`] is produced when a raw event that was classified as some
//! [`EventKind`] cannot be converted into that kind's typed record. It is a
//! deterministic function of the input: callers must not retry it.

use thiserror::Error;

use crate::EventKind;

/// A required field was absent, or a present field had the wrong shape.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The raw mapping does not satisfy the record layout of `kind`.
    ///
    /// `source` carries the serde message, which names the offending field.
    #[error("malformed {kind} event: {source}")]
    Malformed {
        /// Kind the event was being normalized as.
        kind: EventKind,
        /// Underlying decoding failure.
        source: serde_json::Error,
    },

    /// A field declared as base64 text did not decode.
    #[error("invalid base64 payload: {source}")]
    InvalidBase64 {
        /// Underlying decoding failure.
        source: base64::DecodeError,
    },
}

impl ParseError {
    /// Returns the event kind being normalized, when known.
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            ParseError::Malformed { kind, .. } => Some(*kind),
            ParseError::InvalidBase64 { .. } => None,
        }
    }
}
