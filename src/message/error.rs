//! Error taxonomy for the message facade.
//!
//! Uses `thiserror` for ergonomic error handling with typed variants that can
//! be inspected by callers. All checks are performed eagerly before any
//! mutation, so a surfaced error never leaves a partial write behind.

use crate::message::domain::{EncodingMismatch, InvalidDeliveryMode, InvalidPriority, TypeMismatch};
use crate::message::ports::transport::TransportError;
use thiserror::Error;

/// Errors surfaced by envelope and property operations.
#[derive(Debug, Clone, Error)]
pub enum MessageError {
    /// A write was attempted while the body or property set is read-only.
    #[error("message is not writable: {0}")]
    NotWritable(String),

    /// A read accessor only meaningful on received messages was called on a
    /// message under construction.
    #[error("message is not readable: only valid on received messages")]
    NotReadable,

    /// The property name is malformed, reserved, or provider-internal.
    #[error(transparent)]
    InvalidName(#[from] InvalidNameError),

    /// A coercion outside the widening matrix, or a correlation-identifier
    /// encoding mismatch.
    #[error("message format error: {0}")]
    Format(String),

    /// A foreign or otherwise incompatible destination was supplied.
    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    /// An explicit message identifier without the required prefix.
    #[error("message ID must start with ID:")]
    InvalidMessageId,

    /// A body-stream operation on a message type without a streamable body.
    #[error("streaming is only valid for bytes and stream messages")]
    NotStreamCapable,

    /// A transport failure during acknowledgement or body streaming, wrapped
    /// and re-surfaced rather than suppressed.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
}

impl MessageError {
    /// Creates a not-writable error with context.
    #[must_use]
    pub fn not_writable(context: impl Into<String>) -> Self {
        Self::NotWritable(context.into())
    }

    /// Creates a format error.
    #[must_use]
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Creates an invalid-destination error.
    #[must_use]
    pub fn invalid_destination(message: impl Into<String>) -> Self {
        Self::InvalidDestination(message.into())
    }
}

impl From<TypeMismatch> for MessageError {
    fn from(err: TypeMismatch) -> Self {
        Self::Format(err.to_string())
    }
}

impl From<EncodingMismatch> for MessageError {
    fn from(err: EncodingMismatch) -> Self {
        Self::Format(err.to_string())
    }
}

impl From<InvalidDeliveryMode> for MessageError {
    fn from(err: InvalidDeliveryMode) -> Self {
        Self::Format(err.to_string())
    }
}

impl From<InvalidPriority> for MessageError {
    fn from(err: InvalidPriority) -> Self {
        Self::Format(err.to_string())
    }
}

/// Reasons a candidate property name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidNameError {
    /// The name is empty.
    #[error("the name of a property must not be an empty string")]
    Empty,

    /// The name violates the identifier grammar.
    #[error("the property name '{0}' is not a valid identifier")]
    NotAnIdentifier(String),

    /// The name collides with a reserved word of the selector grammar.
    #[error("the property name '{0}' is reserved due to selector syntax")]
    Reserved(String),

    /// The name carries the provider-internal prefix.
    #[error("the property name '{name}' is illegal since it starts with {prefix}")]
    ForbiddenPrefix {
        /// The rejected name.
        name: String,
        /// The provider-internal prefix.
        prefix: &'static str,
    },
}

/// An unrecognised message-type discriminator at dispatch time.
///
/// This is fatal rather than recoverable: an unknown discriminator indicates
/// a wire or version incompatibility, not a per-call mistake, so it is kept
/// out of [`MessageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid message type {0}")]
pub struct DispatchError(pub u8);
