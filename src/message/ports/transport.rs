//! Transport ports: the underlying generic message and its session.
//!
//! The facade never encodes or decodes the wire format itself; everything it
//! knows about a message on the wire goes through [`CoreMessage`], and
//! everything it asks of the connection goes through [`Session`]. The facade
//! is a synchronous value object, so both ports are synchronous.

use crate::message::domain::PropertyValue;
use std::io::{Read, Write};
use thiserror::Error;
use uuid::Uuid;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors raised by the transport collaborators.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Individual acknowledgement of a message failed.
    #[error("acknowledge failed: {0}")]
    Acknowledge(String),

    /// Committing the session failed.
    #[error("commit failed: {0}")]
    Commit(String),

    /// A body stream operation failed.
    #[error("body stream failure: {0}")]
    Stream(String),
}

impl TransportError {
    /// Creates an acknowledge error.
    #[must_use]
    pub fn acknowledge(message: impl Into<String>) -> Self {
        Self::Acknowledge(message.into())
    }

    /// Creates a commit error.
    #[must_use]
    pub fn commit(message: impl Into<String>) -> Self {
        Self::Commit(message.into())
    }

    /// Creates a stream error.
    #[must_use]
    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream(message.into())
    }
}

/// Port over the transport's generic message representation.
///
/// The facade reads and writes headers and properties through this trait and
/// treats the body as opaque: body access is limited to size queries, reader
/// reset, and out-of-band streaming.
///
/// # Implementation Notes
///
/// Implementations own the wire representation. Property storage is
/// overwrite-on-set with case-sensitive keys; `property_names` returns every
/// stored key, including internal headers (the facade filters those).
pub trait CoreMessage {
    /// Returns the numeric message-type discriminator.
    fn discriminator(&self) -> u8;

    /// Returns the durability flag.
    fn is_durable(&self) -> bool;

    /// Sets the durability flag.
    fn set_durable(&mut self, durable: bool);

    /// Returns the send timestamp in epoch milliseconds.
    fn timestamp(&self) -> i64;

    /// Sets the send timestamp in epoch milliseconds.
    fn set_timestamp(&mut self, timestamp: i64);

    /// Returns the expiration time in epoch milliseconds (0 = never).
    fn expiration(&self) -> i64;

    /// Sets the expiration time in epoch milliseconds.
    fn set_expiration(&mut self, expiration: i64);

    /// Returns the priority.
    fn priority(&self) -> u8;

    /// Sets the priority.
    fn set_priority(&mut self, priority: u8);

    /// Returns the monotonic delivery counter (1 on first delivery).
    fn delivery_count(&self) -> i32;

    /// Sets the delivery counter.
    fn set_delivery_count(&mut self, count: i32);

    /// Returns the transport-assigned unique identifier, if any.
    fn user_id(&self) -> Option<Uuid>;

    /// Sets or clears the transport-assigned unique identifier.
    fn set_user_id(&mut self, user_id: Option<Uuid>);

    /// Returns the address this message was routed to, if any.
    fn address(&self) -> Option<String>;

    /// Looks up a property by exact, case-sensitive name.
    fn property(&self, name: &str) -> Option<PropertyValue>;

    /// Stores a property, overwriting any previous value under that name.
    fn put_property(&mut self, name: &str, value: PropertyValue);

    /// Removes a property, returning the previous value if present.
    fn remove_property(&mut self, name: &str) -> Option<PropertyValue>;

    /// Returns `true` if a property is stored under `name`.
    fn contains_property(&self, name: &str) -> bool;

    /// Returns every stored property name, internal headers included.
    fn property_names(&self) -> Vec<String>;

    /// Returns the body size in bytes.
    fn body_size(&self) -> usize;

    /// Resets the body reader index (called before send and before receive).
    fn reset_body(&mut self);

    /// Attaches an input stream supplying the body at send time.
    fn set_body_input(&mut self, input: Box<dyn Read + Send>);

    /// Attaches an output stream receiving the body as it arrives.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Stream`] if the transport rejects the
    /// stream.
    fn set_body_output(&mut self, output: Box<dyn Write + Send>) -> TransportResult<()>;

    /// Writes the complete body to `output`, blocking until done.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Stream`] if the body cannot be written.
    fn save_body_to(&mut self, output: &mut dyn Write) -> TransportResult<()>;

    /// Blocks until the out-of-band body transfer completes or the timeout
    /// elapses. Zero and negative timeout semantics are the transport's.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Stream`] if the transfer fails.
    fn wait_body_completion(&mut self, timeout_ms: i64) -> TransportResult<bool>;

    /// Acknowledges this message individually rather than as part of a
    /// cumulative batch.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Acknowledge`] if the transport refuses.
    fn individual_acknowledge(&mut self) -> TransportResult<()>;
}

/// Port over the owning transport session.
///
/// The facade uses the session for exactly two things: creating fresh
/// underlying messages and committing acknowledgement batches. It never
/// manages the session's lifecycle.
pub trait Session: Send + Sync {
    /// The message representation this session produces.
    type Message: CoreMessage;

    /// Creates a fresh underlying message.
    fn create_message(
        &self,
        discriminator: u8,
        durable: bool,
        expiration: i64,
        timestamp: i64,
        priority: u8,
    ) -> Self::Message;

    /// Commits the current acknowledgement batch.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Commit`] if the transport refuses.
    fn commit(&self) -> TransportResult<()>;
}
