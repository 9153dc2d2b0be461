//! Construction of typed facade subtypes from received messages.
//!
//! Every message on the wire carries a numeric type discriminator. Dispatch
//! is an exhaustive match over the six known discriminators; anything else is
//! a wire or version incompatibility and fails fatally rather than falling
//! back to a default subtype.

use crate::message::envelope::MessageEnvelope;
use crate::message::error::DispatchError;
use crate::message::ports::transport::{CoreMessage, Session};
use mockable::Clock;
use std::sync::Arc;

/// Discriminator of the default, opaque-body message.
pub const DEFAULT_TYPE: u8 = 0;

/// Discriminator of the structured-object message.
pub const OBJECT_TYPE: u8 = 2;

/// Discriminator of the text message.
pub const TEXT_TYPE: u8 = 3;

/// Discriminator of the binary-body message.
pub const BYTES_TYPE: u8 = 4;

/// Discriminator of the map-of-properties message.
pub const MAP_TYPE: u8 = 5;

/// Discriminator of the sequential-stream message.
pub const STREAM_TYPE: u8 = 6;

/// A received message wrapped in the facade subtype its discriminator names.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use courier::message::adapters::memory::{InMemoryCoreMessage, InMemorySession};
/// use courier::message::dispatch::{self, MAP_TYPE, TypedMessage};
///
/// let session = Arc::new(InMemorySession::new());
/// let delivered = InMemoryCoreMessage::received(MAP_TYPE);
///
/// let typed = dispatch::dispatch(delivered, session).expect("known discriminator");
/// assert!(matches!(typed, TypedMessage::Map(_)));
/// ```
pub enum TypedMessage<M: CoreMessage> {
    /// Default message with an opaque body.
    Default(MessageEnvelope<M>),
    /// Structured-object body.
    Object(ObjectMessage<M>),
    /// Text body.
    Text(TextMessage<M>),
    /// Binary body.
    Bytes(BytesMessage<M>),
    /// Map-of-properties body.
    Map(MapMessage<M>),
    /// Sequential-stream body.
    Stream(StreamMessage<M>),
}

impl<M: CoreMessage> TypedMessage<M> {
    /// Returns the discriminator of the wrapped subtype.
    #[must_use]
    pub const fn discriminator(&self) -> u8 {
        match self {
            Self::Default(_) => DEFAULT_TYPE,
            Self::Object(_) => OBJECT_TYPE,
            Self::Text(_) => TEXT_TYPE,
            Self::Bytes(_) => BYTES_TYPE,
            Self::Map(_) => MAP_TYPE,
            Self::Stream(_) => STREAM_TYPE,
        }
    }

    /// Returns the shared envelope of whichever subtype was constructed.
    #[must_use]
    pub const fn envelope(&self) -> &MessageEnvelope<M> {
        match self {
            Self::Default(envelope) => envelope,
            Self::Object(message) => message.envelope(),
            Self::Text(message) => message.envelope(),
            Self::Bytes(message) => message.envelope(),
            Self::Map(message) => message.envelope(),
            Self::Stream(message) => message.envelope(),
        }
    }

    /// Returns the shared envelope mutably.
    pub const fn envelope_mut(&mut self) -> &mut MessageEnvelope<M> {
        match self {
            Self::Default(envelope) => envelope,
            Self::Object(message) => message.envelope_mut(),
            Self::Text(message) => message.envelope_mut(),
            Self::Bytes(message) => message.envelope_mut(),
            Self::Map(message) => message.envelope_mut(),
            Self::Stream(message) => message.envelope_mut(),
        }
    }
}

/// Constructs the typed subtype named by a received message's discriminator.
///
/// # Errors
///
/// Returns [`DispatchError`] for an unrecognised discriminator. Callers must
/// treat this as a protocol-version mismatch, not a per-call failure.
pub fn dispatch<M: CoreMessage>(
    message: M,
    session: Arc<dyn Session<Message = M>>,
) -> Result<TypedMessage<M>, DispatchError> {
    let discriminator = message.discriminator();
    let envelope = MessageEnvelope::received(message, session);
    match discriminator {
        DEFAULT_TYPE => Ok(TypedMessage::Default(envelope)),
        OBJECT_TYPE => Ok(TypedMessage::Object(ObjectMessage { envelope })),
        TEXT_TYPE => Ok(TypedMessage::Text(TextMessage { envelope })),
        BYTES_TYPE => Ok(TypedMessage::Bytes(BytesMessage { envelope })),
        MAP_TYPE => Ok(TypedMessage::Map(MapMessage { envelope })),
        STREAM_TYPE => Ok(TypedMessage::Stream(StreamMessage { envelope })),
        unknown => Err(DispatchError(unknown)),
    }
}

/// A message carrying a structured, serialised object body.
///
/// The body encoding belongs to the subtype; only the shared envelope
/// behaviour lives here.
pub struct ObjectMessage<M: CoreMessage> {
    envelope: MessageEnvelope<M>,
}

impl<M: CoreMessage> ObjectMessage<M> {
    /// The discriminator carried by this subtype on the wire.
    pub const TYPE: u8 = OBJECT_TYPE;

    /// Creates a fresh outbound object message.
    pub fn outbound<S>(session: &S, clock: &impl Clock) -> Self
    where
        S: Session<Message = M> + ?Sized,
    {
        Self {
            envelope: MessageEnvelope::outbound_with_discriminator(Self::TYPE, session, clock),
        }
    }

    /// Returns the shared envelope.
    #[must_use]
    pub const fn envelope(&self) -> &MessageEnvelope<M> {
        &self.envelope
    }

    /// Returns the shared envelope mutably.
    pub const fn envelope_mut(&mut self) -> &mut MessageEnvelope<M> {
        &mut self.envelope
    }

    /// Unwraps into the shared envelope.
    #[must_use]
    pub fn into_envelope(self) -> MessageEnvelope<M> {
        self.envelope
    }
}

/// A message carrying a text body.
pub struct TextMessage<M: CoreMessage> {
    envelope: MessageEnvelope<M>,
}

impl<M: CoreMessage> TextMessage<M> {
    /// The discriminator carried by this subtype on the wire.
    pub const TYPE: u8 = TEXT_TYPE;

    /// Creates a fresh outbound text message.
    pub fn outbound<S>(session: &S, clock: &impl Clock) -> Self
    where
        S: Session<Message = M> + ?Sized,
    {
        Self {
            envelope: MessageEnvelope::outbound_with_discriminator(Self::TYPE, session, clock),
        }
    }

    /// Returns the shared envelope.
    #[must_use]
    pub const fn envelope(&self) -> &MessageEnvelope<M> {
        &self.envelope
    }

    /// Returns the shared envelope mutably.
    pub const fn envelope_mut(&mut self) -> &mut MessageEnvelope<M> {
        &mut self.envelope
    }

    /// Unwraps into the shared envelope.
    #[must_use]
    pub fn into_envelope(self) -> MessageEnvelope<M> {
        self.envelope
    }
}

/// A message carrying an opaque binary body, streamable out-of-band.
pub struct BytesMessage<M: CoreMessage> {
    envelope: MessageEnvelope<M>,
}

impl<M: CoreMessage> BytesMessage<M> {
    /// The discriminator carried by this subtype on the wire.
    pub const TYPE: u8 = BYTES_TYPE;

    /// Creates a fresh outbound bytes message.
    pub fn outbound<S>(session: &S, clock: &impl Clock) -> Self
    where
        S: Session<Message = M> + ?Sized,
    {
        Self {
            envelope: MessageEnvelope::outbound_with_discriminator(Self::TYPE, session, clock),
        }
    }

    /// Returns the shared envelope.
    #[must_use]
    pub const fn envelope(&self) -> &MessageEnvelope<M> {
        &self.envelope
    }

    /// Returns the shared envelope mutably.
    pub const fn envelope_mut(&mut self) -> &mut MessageEnvelope<M> {
        &mut self.envelope
    }

    /// Unwraps into the shared envelope.
    #[must_use]
    pub fn into_envelope(self) -> MessageEnvelope<M> {
        self.envelope
    }
}

/// A message carrying a map of named scalar values as its body.
pub struct MapMessage<M: CoreMessage> {
    envelope: MessageEnvelope<M>,
}

impl<M: CoreMessage> MapMessage<M> {
    /// The discriminator carried by this subtype on the wire.
    pub const TYPE: u8 = MAP_TYPE;

    /// Creates a fresh outbound map message.
    pub fn outbound<S>(session: &S, clock: &impl Clock) -> Self
    where
        S: Session<Message = M> + ?Sized,
    {
        Self {
            envelope: MessageEnvelope::outbound_with_discriminator(Self::TYPE, session, clock),
        }
    }

    /// Returns the shared envelope.
    #[must_use]
    pub const fn envelope(&self) -> &MessageEnvelope<M> {
        &self.envelope
    }

    /// Returns the shared envelope mutably.
    pub const fn envelope_mut(&mut self) -> &mut MessageEnvelope<M> {
        &mut self.envelope
    }

    /// Unwraps into the shared envelope.
    #[must_use]
    pub fn into_envelope(self) -> MessageEnvelope<M> {
        self.envelope
    }
}

/// A message carrying a sequential stream of scalar values as its body.
pub struct StreamMessage<M: CoreMessage> {
    envelope: MessageEnvelope<M>,
}

impl<M: CoreMessage> StreamMessage<M> {
    /// The discriminator carried by this subtype on the wire.
    pub const TYPE: u8 = STREAM_TYPE;

    /// Creates a fresh outbound stream message.
    pub fn outbound<S>(session: &S, clock: &impl Clock) -> Self
    where
        S: Session<Message = M> + ?Sized,
    {
        Self {
            envelope: MessageEnvelope::outbound_with_discriminator(Self::TYPE, session, clock),
        }
    }

    /// Returns the shared envelope.
    #[must_use]
    pub const fn envelope(&self) -> &MessageEnvelope<M> {
        &self.envelope
    }

    /// Returns the shared envelope mutably.
    pub const fn envelope_mut(&mut self) -> &mut MessageEnvelope<M> {
        &mut self.envelope
    }

    /// Unwraps into the shared envelope.
    #[must_use]
    pub fn into_envelope(self) -> MessageEnvelope<M> {
        self.envelope
    }
}
