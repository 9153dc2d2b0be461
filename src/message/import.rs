//! Import protocol for messages built by other facade implementations.
//!
//! Importing replays every envelope field and property of the source message
//! through the normal typed setters, so imported values face exactly the
//! same validation as local writes. The correlation identifier is negotiated
//! bytes-first: the byte encoding is attempted, and the textual encoding is
//! the fallback when the source reports the value as not byte-representable.

use crate::message::envelope::{MessageEnvelope, MessageResult};
use crate::message::ports::foreign::ForeignMessage;
use crate::message::ports::transport::{CoreMessage, Session};
use mockable::Clock;

/// Deployment-configurable import behaviour.
///
/// Replaces the original's ambient process-wide flag with explicit
/// constructor-time configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Whether the byte encoding of a correlation identifier is attempted.
    ///
    /// Some providers convert between byte and textual correlation
    /// identifiers automatically, which makes the byte encoding impossible
    /// to round-trip faithfully; disabling this takes the text-only path.
    pub support_bytes_correlation_id: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            support_bytes_correlation_id: true,
        }
    }
}

impl<M: CoreMessage> MessageEnvelope<M> {
    /// Imports a foreign message into a fresh outbound envelope.
    ///
    /// Copies timestamp, correlation identifier, reply-to destination,
    /// destination, delivery mode, expiration, priority, and classification
    /// through the typed setters, then each source property through the
    /// generic object setter. Every imported value is validated
    /// independently; the first failure aborts the import.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidDestination`] for a source destination
    /// that cannot be represented, [`MessageError::Format`] for an illegal
    /// delivery mode or priority, or [`MessageError::InvalidName`] for a
    /// source property whose name fails validation.
    ///
    /// [`MessageError::InvalidDestination`]: crate::message::error::MessageError::InvalidDestination
    /// [`MessageError::Format`]: crate::message::error::MessageError::Format
    /// [`MessageError::InvalidName`]: crate::message::error::MessageError::InvalidName
    pub fn from_foreign<S>(
        foreign: &dyn ForeignMessage,
        session: &S,
        clock: &impl Clock,
        options: ImportOptions,
    ) -> MessageResult<Self>
    where
        S: Session<Message = M> + ?Sized,
    {
        let mut envelope = Self::outbound(session, clock);

        envelope.set_timestamp(foreign.timestamp());
        envelope.import_correlation_id(foreign, options)?;
        envelope.set_reply_to(foreign.reply_to()?);
        envelope.set_destination(foreign.destination()?);
        envelope.set_delivery_mode_code(foreign.delivery_mode_code())?;
        envelope.set_expiration(foreign.expiration());
        envelope.set_priority(foreign.priority())?;
        if let Some(classification) = foreign.classification() {
            envelope.set_classification(classification);
        }

        for name in foreign.property_names() {
            if let Some(value) = foreign.object_property(&name) {
                envelope.set_object_property(&name, value)?;
            }
        }

        Ok(envelope)
    }

    fn import_correlation_id(
        &mut self,
        foreign: &dyn ForeignMessage,
        options: ImportOptions,
    ) -> MessageResult<()> {
        if !options.support_bytes_correlation_id {
            if let Some(text) = foreign.correlation_id_text()? {
                self.set_correlation_id_text(Some(&text));
            }
            return Ok(());
        }

        match foreign.correlation_id_bytes() {
            Ok(Some(bytes)) => self.set_correlation_id_bytes(Some(&bytes)),
            Ok(None) => {}
            // The source reports the identifier as text-encoded.
            Err(_) => {
                if let Some(text) = foreign.correlation_id_text()? {
                    self.set_correlation_id_text(Some(&text));
                }
            }
        }
        Ok(())
    }
}
