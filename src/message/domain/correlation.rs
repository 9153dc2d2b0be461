//! Correlation identifiers with two legal wire encodings.
//!
//! A correlation identifier is logically a single value, but the wire format
//! accepts either an opaque byte sequence or text. Only one encoding is
//! authoritative at a time; reading the other encoding is a format error
//! rather than an implicit conversion, because some providers cannot
//! round-trip a converted value faithfully.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A correlation identifier in one of its two wire encodings.
///
/// # Examples
///
/// ```
/// use courier::message::domain::CorrelationId;
///
/// let id = CorrelationId::Bytes(vec![0x01, 0x02]);
/// assert!(id.try_bytes().is_ok());
/// assert!(id.try_text().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "encoding", content = "value", rename_all = "snake_case")]
pub enum CorrelationId {
    /// An opaque byte-sequence encoding.
    Bytes(Vec<u8>),
    /// A textual encoding.
    Text(String),
}

impl CorrelationId {
    /// Returns the encoding tag of this identifier.
    #[must_use]
    pub const fn encoding(&self) -> CorrelationEncoding {
        match self {
            Self::Bytes(_) => CorrelationEncoding::Bytes,
            Self::Text(_) => CorrelationEncoding::Text,
        }
    }

    /// Reads the identifier in its byte encoding.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingMismatch`] if the stored encoding is textual.
    pub fn try_bytes(&self) -> Result<&[u8], EncodingMismatch> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            Self::Text(_) => Err(EncodingMismatch {
                stored: CorrelationEncoding::Text,
                requested: CorrelationEncoding::Bytes,
            }),
        }
    }

    /// Reads the identifier in its textual encoding.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingMismatch`] if the stored encoding is an opaque byte
    /// sequence.
    pub fn try_text(&self) -> Result<&str, EncodingMismatch> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Bytes(_) => Err(EncodingMismatch {
                stored: CorrelationEncoding::Bytes,
                requested: CorrelationEncoding::Text,
            }),
        }
    }
}

/// The encoding tag of a correlation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationEncoding {
    /// Opaque byte sequence.
    Bytes,
    /// Text.
    Text,
}

impl fmt::Display for CorrelationEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes => f.write_str("bytes"),
            Self::Text => f.write_str("text"),
        }
    }
}

/// A correlation identifier read in the wrong encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("correlation identifier is {stored}-encoded; cannot read it as {requested}")]
pub struct EncodingMismatch {
    /// The encoding the identifier is stored in.
    pub stored: CorrelationEncoding,
    /// The encoding the caller asked for.
    pub requested: CorrelationEncoding,
}
