//! Error types for sltail-core.
//!
//! Rendering knows exactly two failure kinds. Everything else (a payload that
//! is not an array, too few or too many values) degrades silently.

use thiserror::Error;

/// An unrecognized character appeared inside a verb sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed format template: unexpected {found:?} inside verb at byte {offset}")]
pub struct MalformedTemplate {
    /// The offending character.
    pub found: char,
    /// Byte offset of `found` within the original template.
    pub offset: usize,
}

/// The serialized payload could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("payload decode failed at byte {offset}: {reason}")]
pub struct PayloadDecodeError {
    pub offset: usize,
    pub reason: String,
}

impl PayloadDecodeError {
    pub fn new(offset: usize, reason: impl Into<String>) -> Self {
        Self { offset, reason: reason.into() }
    }
}

/// Failure of a single render call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error(transparent)]
    MalformedTemplate(#[from] MalformedTemplate),

    #[error(transparent)]
    PayloadDecode(#[from] PayloadDecodeError),
}
