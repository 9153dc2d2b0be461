//! Port over messages built by other facade implementations.
//!
//! A foreign message honours the same client-facing contract as this crate's
//! envelope but stores its data elsewhere. The importer reads it exclusively
//! through this trait, so every imported value passes through the normal
//! typed setters and their validation.

use crate::message::domain::{Destination, PropertyValue};
use crate::message::error::MessageError;

#[cfg(test)]
use mockall::automock;

/// The getter half of the facade contract, as offered by a foreign message.
#[cfg_attr(test, automock)]
pub trait ForeignMessage {
    /// Returns the send timestamp in epoch milliseconds.
    fn timestamp(&self) -> i64;

    /// Returns the correlation identifier in its byte encoding.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the source stores the identifier
    /// as text — the importer treats that as the signal to fall back to the
    /// textual encoding.
    fn correlation_id_bytes(&self) -> Result<Option<Vec<u8>>, MessageError>;

    /// Returns the correlation identifier in its textual encoding.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the source stores the identifier
    /// as an opaque byte sequence.
    fn correlation_id_text(&self) -> Result<Option<String>, MessageError>;

    /// Returns the reply-to destination.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidDestination`] if the source's
    /// destination type cannot be represented as an address.
    fn reply_to(&self) -> Result<Option<Destination>, MessageError>;

    /// Returns the destination this message was sent to.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidDestination`] if the source's
    /// destination type cannot be represented as an address.
    fn destination(&self) -> Result<Option<Destination>, MessageError>;

    /// Returns the delivery-mode wire code.
    fn delivery_mode_code(&self) -> i32;

    /// Returns the expiration time in epoch milliseconds.
    fn expiration(&self) -> i64;

    /// Returns the priority.
    fn priority(&self) -> i32;

    /// Returns the free-text message classification, if any.
    fn classification(&self) -> Option<String>;

    /// Returns the names of all user properties on the source message.
    fn property_names(&self) -> Vec<String>;

    /// Looks up a property as a generic scalar value.
    fn object_property(&self, name: &str) -> Option<PropertyValue>;
}
