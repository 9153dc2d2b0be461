//! The typed message envelope wrapping one underlying transport message.
//!
//! Every read and write on the facade flows through here: identifier
//! validation and the read-only state machine gate the writes, the widening
//! coercion matrix governs the reads, and the handful of derived fields
//! (message id, destinations, correlation id, classification) are resolved
//! lazily and cached until an explicit setter overwrites them.

use crate::message::dispatch::{BYTES_TYPE, DEFAULT_TYPE, STREAM_TYPE};
use crate::message::domain::headers;
use crate::message::domain::{
    CorrelationId, DeliveryMode, Destination, IdentifierRules, Priority, PropertyValue,
};
use crate::message::error::MessageError;
use crate::message::ports::transport::{CoreMessage, Session};
use mockable::Clock;
use std::io::{Read, Write};
use std::sync::Arc;

/// Result type for envelope operations.
pub type MessageResult<T> = Result<T, MessageError>;

/// A strongly-typed message facade over one underlying transport message.
///
/// The envelope owns exactly one [`CoreMessage`] and, for received messages,
/// a reference to the originating session used only for acknowledgement.
///
/// # Invariants
///
/// - A message is either prior to send (body and properties writable) or
///   received (both read-only) — never partially so, except after an
///   explicit [`clear_body`](Self::clear_body) or
///   [`clear_properties`](Self::clear_properties).
/// - Property writes preserve the concrete scalar type given; reads apply
///   the widening-only coercion matrix.
/// - Cached derived fields are computed at most once per underlying value
///   and invalidated only by their explicit setter.
///
/// # Examples
///
/// ```
/// use courier::message::adapters::memory::InMemorySession;
/// use courier::message::envelope::MessageEnvelope;
/// use mockable::DefaultClock;
///
/// let session = InMemorySession::new();
/// let mut message = MessageEnvelope::outbound(&session, &DefaultClock);
///
/// message.set_short_property("retries", 3).expect("valid property");
/// assert_eq!(message.int_property("retries").expect("short widens to int"), 3);
/// assert!(message.string_property("retries").expect("text read").is_some());
/// ```
pub struct MessageEnvelope<M: CoreMessage> {
    /// The underlying transport message.
    message: M,

    /// Originating session, present only on received messages.
    session: Option<Arc<dyn Session<Message = M>>>,

    body_read_only: bool,
    properties_read_only: bool,

    rules: IdentifierRules,

    // Lazily cached derived fields.
    message_id: Option<String>,
    destination: Option<Destination>,
    reply_to: Option<Destination>,
    correlation_text: Option<String>,
    classification: Option<String>,

    individual_ack: bool,
}

impl<M: CoreMessage> MessageEnvelope<M> {
    /// Creates a fresh outbound message with the default discriminator.
    ///
    /// The underlying message is created durable, with no expiration, the
    /// default priority, and the clock's current time as its timestamp. Body
    /// and properties start writable.
    pub fn outbound<S>(session: &S, clock: &impl Clock) -> Self
    where
        S: Session<Message = M> + ?Sized,
    {
        Self::outbound_with_discriminator(DEFAULT_TYPE, session, clock)
    }

    /// Creates a fresh outbound message with an explicit discriminator.
    pub fn outbound_with_discriminator<S>(
        discriminator: u8,
        session: &S,
        clock: &impl Clock,
    ) -> Self
    where
        S: Session<Message = M> + ?Sized,
    {
        let message = session.create_message(
            discriminator,
            true,
            0,
            clock.utc().timestamp_millis(),
            Priority::DEFAULT.get(),
        );
        Self::wrap(message, None, false)
    }

    /// Wraps a message delivered by the transport.
    ///
    /// Received messages start with a read-only body and read-only
    /// properties; the session reference is kept for acknowledgement only.
    #[must_use]
    pub fn received(message: M, session: Arc<dyn Session<Message = M>>) -> Self {
        Self::wrap(message, Some(session), true)
    }

    fn wrap(message: M, session: Option<Arc<dyn Session<Message = M>>>, read_only: bool) -> Self {
        Self {
            message,
            session,
            body_read_only: read_only,
            properties_read_only: read_only,
            rules: IdentifierRules::new(),
            message_id: None,
            destination: None,
            reply_to: None,
            correlation_text: None,
            classification: None,
            individual_ack: false,
        }
    }

    /// Replaces the identifier validation rules.
    #[must_use]
    pub fn with_identifier_rules(mut self, rules: IdentifierRules) -> Self {
        self.rules = rules;
        self
    }

    // ------------------------------------------------------------------
    // Envelope fields
    // ------------------------------------------------------------------

    /// Returns the textual message identifier, deriving and caching it from
    /// the transport-assigned unique value on first read.
    pub fn message_id(&mut self) -> Option<String> {
        if self.message_id.is_none() {
            self.message_id = self
                .message
                .user_id()
                .map(|uid| format!("{}{uid}", headers::MESSAGE_ID_PREFIX));
        }
        self.message_id.clone()
    }

    /// Overrides the message identifier.
    ///
    /// Clears the transport-assigned unique value so the override is
    /// authoritative.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidMessageId`] if the identifier does not
    /// start with `ID:`.
    pub fn set_message_id(&mut self, message_id: Option<String>) -> MessageResult<()> {
        if let Some(id) = &message_id
            && !id.starts_with(headers::MESSAGE_ID_PREFIX)
        {
            return Err(MessageError::InvalidMessageId);
        }
        self.message.set_user_id(None);
        self.message_id = message_id;
        Ok(())
    }

    /// Overrides the cached message identifier without validation.
    ///
    /// Used by the sender after the transport assigns the real identifier.
    pub fn reset_message_id(&mut self, message_id: impl Into<String>) {
        self.message_id = Some(message_id.into());
    }

    /// Returns the send timestamp in epoch milliseconds.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.message.timestamp()
    }

    /// Sets the send timestamp in epoch milliseconds.
    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.message.set_timestamp(timestamp);
    }

    /// Returns the expiration time in epoch milliseconds (0 = never).
    #[must_use]
    pub fn expiration(&self) -> i64 {
        self.message.expiration()
    }

    /// Sets the expiration time in epoch milliseconds.
    pub fn set_expiration(&mut self, expiration: i64) {
        self.message.set_expiration(expiration);
    }

    /// Returns the message priority.
    #[must_use]
    pub fn priority(&self) -> u8 {
        self.message.priority()
    }

    /// Sets the message priority.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if `priority` is outside the
    /// inclusive range 0 to 9; the underlying message is left untouched.
    pub fn set_priority(&mut self, priority: i32) -> MessageResult<()> {
        let priority = Priority::new(priority)?;
        self.message.set_priority(priority.get());
        Ok(())
    }

    /// Returns the delivery mode derived from the durability flag.
    #[must_use]
    pub fn delivery_mode(&self) -> DeliveryMode {
        DeliveryMode::from_durable(self.message.is_durable())
    }

    /// Sets the delivery mode.
    pub fn set_delivery_mode(&mut self, mode: DeliveryMode) {
        self.message.set_durable(mode.is_durable());
    }

    /// Sets the delivery mode from its wire code.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] for any code other than the two
    /// legal values.
    pub fn set_delivery_mode_code(&mut self, code: i32) -> MessageResult<()> {
        self.set_delivery_mode(DeliveryMode::from_code(code)?);
        Ok(())
    }

    /// Returns `true` if the transport has delivered this message more than
    /// once. Derived from the monotonic delivery counter, never stored.
    #[must_use]
    pub fn redelivered(&self) -> bool {
        self.message.delivery_count() > 1
    }

    /// Adjusts the delivery counter to reflect the given redelivery state.
    ///
    /// Clearing the flag resets the counter to 1. Setting it bumps the
    /// counter to 2 unless it already records a redelivery.
    pub fn set_redelivered(&mut self, redelivered: bool) {
        if redelivered {
            if self.message.delivery_count() <= 1 {
                self.message.set_delivery_count(2);
            }
        } else {
            self.message.set_delivery_count(1);
        }
    }

    /// Returns the free-text message classification, caching it on first
    /// read.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the stored header is not textual.
    pub fn classification(&mut self) -> MessageResult<Option<String>> {
        if self.classification.is_none()
            && let Some(value) = self.message.property(headers::HDR_TYPE)
        {
            self.classification = Some(value.as_text()?);
        }
        Ok(self.classification.clone())
    }

    /// Sets the free-text message classification.
    pub fn set_classification(&mut self, classification: impl Into<String>) {
        let classification = classification.into();
        self.message.put_property(
            headers::HDR_TYPE,
            PropertyValue::Text(classification.clone()),
        );
        self.classification = Some(classification);
    }

    /// Returns the reply-to destination, resolving and caching it from the
    /// stored address on first read.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the stored header is not textual.
    pub fn reply_to(&mut self) -> MessageResult<Option<Destination>> {
        if self.reply_to.is_none()
            && let Some(value) = self.message.property(headers::HDR_REPLY_TO)
        {
            self.reply_to = Some(Destination::from_address(value.as_text()?));
        }
        Ok(self.reply_to.clone())
    }

    /// Sets or clears the reply-to destination.
    pub fn set_reply_to(&mut self, destination: Option<Destination>) {
        match &destination {
            Some(dest) => self.message.put_property(
                headers::HDR_REPLY_TO,
                PropertyValue::Text(dest.address().to_owned()),
            ),
            None => {
                self.message.remove_property(headers::HDR_REPLY_TO);
            }
        }
        self.reply_to = destination;
    }

    /// Returns the destination this message was routed to, resolving and
    /// caching it from the transport address on first read.
    pub fn destination(&mut self) -> Option<Destination> {
        if self.destination.is_none() {
            self.destination = self.message.address().map(Destination::from_address);
        }
        self.destination.clone()
    }

    /// Overrides the cached destination.
    pub fn set_destination(&mut self, destination: Option<Destination>) {
        self.destination = destination;
    }

    /// Returns the scheduled delivery time in epoch milliseconds.
    ///
    /// Defaults to 0 (immediate) when the header is absent or unreadable.
    #[must_use]
    pub fn delivery_time(&self) -> i64 {
        self.message
            .property(headers::HDR_SCHEDULED_DELIVERY_TIME)
            .and_then(|value| value.as_long().ok())
            .unwrap_or(0)
    }

    /// Schedules delivery at the given epoch-millisecond timestamp.
    pub fn set_delivery_time(&mut self, delivery_time: i64) {
        self.message.put_property(
            headers::HDR_SCHEDULED_DELIVERY_TIME,
            PropertyValue::Long(delivery_time),
        );
    }

    // ------------------------------------------------------------------
    // Correlation identifier
    // ------------------------------------------------------------------

    /// Stores the correlation identifier in its byte encoding, or clears it.
    pub fn set_correlation_id_bytes(&mut self, correlation_id: Option<&[u8]>) {
        match correlation_id {
            Some(bytes) => self.message.put_property(
                headers::HDR_CORRELATION_ID,
                PropertyValue::Bytes(bytes.to_vec()),
            ),
            None => {
                self.message.remove_property(headers::HDR_CORRELATION_ID);
            }
        }
        self.correlation_text = None;
    }

    /// Stores the correlation identifier in its textual encoding, or clears
    /// it.
    pub fn set_correlation_id_text(&mut self, correlation_id: Option<&str>) {
        match correlation_id {
            Some(text) => self.message.put_property(
                headers::HDR_CORRELATION_ID,
                PropertyValue::Text(text.to_owned()),
            ),
            None => {
                self.message.remove_property(headers::HDR_CORRELATION_ID);
            }
        }
        self.correlation_text = correlation_id.map(ToOwned::to_owned);
    }

    /// Reads the correlation identifier in its byte encoding.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the stored encoding is textual.
    pub fn correlation_id_bytes(&self) -> MessageResult<Option<Vec<u8>>> {
        self.stored_correlation()
            .map(|id| {
                id.try_bytes()
                    .map(<[u8]>::to_vec)
                    .map_err(MessageError::from)
            })
            .transpose()
    }

    /// Reads the correlation identifier in its textual encoding, caching the
    /// text on first read.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the stored encoding is an opaque
    /// byte sequence.
    pub fn correlation_id_text(&mut self) -> MessageResult<Option<String>> {
        if let Some(text) = &self.correlation_text {
            return Ok(Some(text.clone()));
        }
        let Some(id) = self.stored_correlation() else {
            return Ok(None);
        };
        let text = id.try_text()?.to_owned();
        self.correlation_text = Some(text.clone());
        Ok(Some(text))
    }

    fn stored_correlation(&self) -> Option<CorrelationId> {
        match self.message.property(headers::HDR_CORRELATION_ID) {
            Some(PropertyValue::Bytes(bytes)) => Some(CorrelationId::Bytes(bytes)),
            Some(PropertyValue::Text(text)) => Some(CorrelationId::Text(text)),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Property store bridge
    // ------------------------------------------------------------------

    /// Returns `true` if a property exists under `name`, counting the
    /// synthetic delivery-count property and the aliased group id.
    #[must_use]
    pub fn property_exists(&self, name: &str) -> bool {
        self.message.contains_property(name)
            || name == headers::JMSX_DELIVERY_COUNT
            || (name == headers::JMSX_GROUP_ID
                && self.message.contains_property(headers::HDR_GROUP_ID))
    }

    /// Returns the stored user property names.
    ///
    /// Internal headers and synthetic fields are not enumerated.
    #[must_use]
    pub fn property_names(&self) -> Vec<String> {
        self.message
            .property_names()
            .into_iter()
            .filter(|name| !name.starts_with(headers::INTERNAL_HEADER_PREFIX))
            .collect()
    }

    /// Purges the user property store and makes properties writable again,
    /// regardless of prior state. Envelope headers survive.
    pub fn clear_properties(&mut self) {
        for name in self.message.property_names() {
            if !name.starts_with(headers::INTERNAL_HEADER_PREFIX) {
                self.message.remove_property(&name);
            }
        }
        self.properties_read_only = false;
    }

    /// Reads a property as a boolean.
    ///
    /// An absent property reads as `false`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the stored value is not a
    /// boolean.
    pub fn boolean_property(&self, name: &str) -> MessageResult<bool> {
        match self.message.property(name) {
            Some(value) => Ok(value.as_bool()?),
            None => Ok(false),
        }
    }

    /// Reads a property as a byte.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the property is absent or the
    /// stored value is not a byte.
    pub fn byte_property(&self, name: &str) -> MessageResult<i8> {
        Ok(self.required_property(name)?.as_byte()?)
    }

    /// Reads a property as a short, widening from byte.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the property is absent or outside
    /// the widening matrix.
    pub fn short_property(&self, name: &str) -> MessageResult<i16> {
        Ok(self.required_property(name)?.as_short()?)
    }

    /// Reads a property as an int, widening from byte or short.
    ///
    /// The synthetic delivery-count property is answered from the transport
    /// delivery counter.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the property is absent or outside
    /// the widening matrix.
    pub fn int_property(&self, name: &str) -> MessageResult<i32> {
        if name == headers::JMSX_DELIVERY_COUNT {
            return Ok(self.message.delivery_count());
        }
        Ok(self.required_property(name)?.as_int()?)
    }

    /// Reads a property as a long, widening from any narrower integer.
    ///
    /// The synthetic delivery-count property is answered from the transport
    /// delivery counter.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the property is absent or outside
    /// the widening matrix.
    pub fn long_property(&self, name: &str) -> MessageResult<i64> {
        if name == headers::JMSX_DELIVERY_COUNT {
            return Ok(i64::from(self.message.delivery_count()));
        }
        Ok(self.required_property(name)?.as_long()?)
    }

    /// Reads a property as a float.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the property is absent or the
    /// stored value is not a float.
    pub fn float_property(&self, name: &str) -> MessageResult<f32> {
        Ok(self.required_property(name)?.as_float()?)
    }

    /// Reads a property as a double, widening from float.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the property is absent or outside
    /// the widening matrix.
    pub fn double_property(&self, name: &str) -> MessageResult<f64> {
        Ok(self.required_property(name)?.as_double()?)
    }

    /// Reads a property as text. Any scalar except opaque binary has a
    /// textual rendering; an absent property reads as `None`.
    ///
    /// The synthetic delivery-count property and the aliased group id are
    /// special-cased.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Format`] if the stored value is binary.
    pub fn string_property(&self, name: &str) -> MessageResult<Option<String>> {
        if name == headers::JMSX_DELIVERY_COUNT {
            return Ok(Some(self.message.delivery_count().to_string()));
        }
        let lookup = if name == headers::JMSX_GROUP_ID {
            self.message.property(headers::HDR_GROUP_ID)
        } else {
            self.message.property(name)
        };
        match lookup {
            Some(value) => Ok(Some(value.as_text()?)),
            None => Ok(None),
        }
    }

    /// Reads a property as the stored scalar value.
    ///
    /// An absent property reads as `None`; the synthetic delivery-count
    /// property reads as its textual rendering.
    #[must_use]
    pub fn object_property(&self, name: &str) -> Option<PropertyValue> {
        if name == headers::JMSX_DELIVERY_COUNT {
            return Some(PropertyValue::Text(
                self.message.delivery_count().to_string(),
            ));
        }
        self.message.property(name)
    }

    /// Stores a boolean property.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotWritable`] if properties are read-only, or
    /// [`MessageError::InvalidName`] if the name is rejected.
    pub fn set_boolean_property(&mut self, name: &str, value: bool) -> MessageResult<()> {
        self.check_property_write(name)?;
        self.message.put_property(name, PropertyValue::Bool(value));
        Ok(())
    }

    /// Stores a byte property.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotWritable`] if properties are read-only, or
    /// [`MessageError::InvalidName`] if the name is rejected.
    pub fn set_byte_property(&mut self, name: &str, value: i8) -> MessageResult<()> {
        self.check_property_write(name)?;
        self.message.put_property(name, PropertyValue::Byte(value));
        Ok(())
    }

    /// Stores a short property.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotWritable`] if properties are read-only, or
    /// [`MessageError::InvalidName`] if the name is rejected.
    pub fn set_short_property(&mut self, name: &str, value: i16) -> MessageResult<()> {
        self.check_property_write(name)?;
        self.message.put_property(name, PropertyValue::Short(value));
        Ok(())
    }

    /// Stores an int property.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotWritable`] if properties are read-only, or
    /// [`MessageError::InvalidName`] if the name is rejected.
    pub fn set_int_property(&mut self, name: &str, value: i32) -> MessageResult<()> {
        self.check_property_write(name)?;
        self.message.put_property(name, PropertyValue::Int(value));
        Ok(())
    }

    /// Stores a long property.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotWritable`] if properties are read-only, or
    /// [`MessageError::InvalidName`] if the name is rejected.
    pub fn set_long_property(&mut self, name: &str, value: i64) -> MessageResult<()> {
        self.check_property_write(name)?;
        self.message.put_property(name, PropertyValue::Long(value));
        Ok(())
    }

    /// Stores a float property.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotWritable`] if properties are read-only, or
    /// [`MessageError::InvalidName`] if the name is rejected.
    pub fn set_float_property(&mut self, name: &str, value: f32) -> MessageResult<()> {
        self.check_property_write(name)?;
        self.message.put_property(name, PropertyValue::Float(value));
        Ok(())
    }

    /// Stores a double property.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotWritable`] if properties are read-only, or
    /// [`MessageError::InvalidName`] if the name is rejected.
    pub fn set_double_property(&mut self, name: &str, value: f64) -> MessageResult<()> {
        self.check_property_write(name)?;
        self.message.put_property(name, PropertyValue::Double(value));
        Ok(())
    }

    /// Stores a string property.
    ///
    /// The group-id name is aliased to the group-id header rather than
    /// stored as a user property.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotWritable`] if properties are read-only, or
    /// [`MessageError::InvalidName`] if the name is rejected.
    pub fn set_string_property(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> MessageResult<()> {
        self.check_property_write(name)?;
        let stored_name = if name == headers::JMSX_GROUP_ID {
            headers::HDR_GROUP_ID
        } else {
            name
        };
        self.message
            .put_property(stored_name, PropertyValue::Text(value.into()));
        Ok(())
    }

    /// Stores a property with its concrete scalar type preserved.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotWritable`] if properties are read-only, or
    /// [`MessageError::InvalidName`] if the name is rejected.
    pub fn set_object_property(&mut self, name: &str, value: PropertyValue) -> MessageResult<()> {
        self.check_property_write(name)?;
        self.message.put_property(name, value);
        Ok(())
    }

    fn required_property(&self, name: &str) -> MessageResult<PropertyValue> {
        self.message
            .property(name)
            .ok_or_else(|| MessageError::format(format!("property '{name}' is not present")))
    }

    fn check_property_write(&self, name: &str) -> MessageResult<()> {
        if self.properties_read_only {
            if name == headers::INPUT_STREAM_PROPERTY {
                return Err(MessageError::not_writable(format!(
                    "cannot set the input stream on received messages; did you mean {} or {}?",
                    headers::OUTPUT_STREAM_PROPERTY,
                    headers::SAVE_STREAM_PROPERTY,
                )));
            }
            return Err(MessageError::not_writable("properties are read-only"));
        }
        self.rules.check(name)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read-only state machine
    // ------------------------------------------------------------------

    /// Returns `true` if the body may currently be written.
    #[must_use]
    pub const fn is_body_writable(&self) -> bool {
        !self.body_read_only
    }

    /// Returns `true` if properties may currently be written.
    #[must_use]
    pub const fn are_properties_writable(&self) -> bool {
        !self.properties_read_only
    }

    /// Makes the body writable again, unconditionally.
    ///
    /// Body subtypes reset their payload on top of this shared transition.
    pub const fn clear_body(&mut self) {
        self.body_read_only = false;
    }

    /// Fails unless the body is currently writable.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotWritable`] on a received message whose
    /// body has not been cleared.
    pub fn check_body_writable(&self) -> MessageResult<()> {
        if self.body_read_only {
            return Err(MessageError::not_writable("message body is read-only"));
        }
        Ok(())
    }

    /// Fails unless the body is in its received, read-only state.
    ///
    /// Read accessors that only make sense post-receipt call this first.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotReadable`] on a message under active
    /// construction.
    pub const fn check_body_readable(&self) -> MessageResult<()> {
        if self.body_read_only {
            Ok(())
        } else {
            Err(MessageError::NotReadable)
        }
    }

    // ------------------------------------------------------------------
    // Acknowledgement
    // ------------------------------------------------------------------

    /// Requires acknowledgement to target this message specifically rather
    /// than a cumulative batch.
    pub const fn set_individual_acknowledge(&mut self) {
        self.individual_ack = true;
    }

    /// Returns `true` if individual acknowledgement has been requested.
    #[must_use]
    pub const fn is_individual_acknowledge(&self) -> bool {
        self.individual_ack
    }

    /// Acknowledges this message through the originating session.
    ///
    /// Messages without a session (outbound construction) acknowledge as a
    /// no-op. With the individual-ack flag set, the message is acknowledged
    /// individually before the session batch is committed.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Transport`] wrapping any transport failure;
    /// failures are re-surfaced, never suppressed.
    pub fn acknowledge(&mut self) -> MessageResult<()> {
        let Some(session) = self.session.clone() else {
            return Ok(());
        };
        if self.individual_ack {
            self.message.individual_acknowledge()?;
        }
        session.commit()?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Body streaming
    // ------------------------------------------------------------------

    /// Attaches an input stream supplying the body at send time.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotStreamCapable`] unless this is a bytes or
    /// stream message, or [`MessageError::NotWritable`] if the body is
    /// read-only.
    pub fn set_input_stream(&mut self, input: Box<dyn Read + Send>) -> MessageResult<()> {
        self.check_stream_capable()?;
        self.check_body_writable()?;
        self.message.set_body_input(input);
        Ok(())
    }

    /// Attaches an output stream receiving the body as it arrives.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotStreamCapable`] unless this is a bytes or
    /// stream message, [`MessageError::NotReadable`] unless the message was
    /// received, or [`MessageError::Transport`] on stream failure.
    pub fn set_output_stream(&mut self, output: Box<dyn Write + Send>) -> MessageResult<()> {
        self.check_stream_capable()?;
        self.check_body_readable()?;
        self.message.set_body_output(output)?;
        Ok(())
    }

    /// Writes the complete body to `output`, blocking until done.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotStreamCapable`] unless this is a bytes or
    /// stream message, [`MessageError::NotReadable`] unless the message was
    /// received, or [`MessageError::Transport`] on stream failure.
    pub fn save_to_output_stream(&mut self, output: &mut dyn Write) -> MessageResult<()> {
        self.check_stream_capable()?;
        self.check_body_readable()?;
        self.message.save_body_to(output)?;
        Ok(())
    }

    /// Blocks until the out-of-band body transfer completes or the timeout
    /// elapses; zero and negative timeouts are delegated to the transport.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotStreamCapable`] unless this is a bytes or
    /// stream message, or [`MessageError::Transport`] on stream failure.
    pub fn wait_completion_on_stream(&mut self, timeout_ms: i64) -> MessageResult<bool> {
        self.check_stream_capable()?;
        Ok(self.message.wait_body_completion(timeout_ms)?)
    }

    fn check_stream_capable(&self) -> MessageResult<()> {
        match self.message.discriminator() {
            BYTES_TYPE | STREAM_TYPE => Ok(()),
            _ => Err(MessageError::NotStreamCapable),
        }
    }

    // ------------------------------------------------------------------
    // Transport hooks and access
    // ------------------------------------------------------------------

    /// Resets the body reader before handing the message to the transport.
    pub fn do_before_send(&mut self) {
        self.message.reset_body();
    }

    /// Resets the body reader after the transport delivers the message.
    pub fn do_before_receive(&mut self) {
        self.message.reset_body();
    }

    /// Returns the message-type discriminator.
    #[must_use]
    pub fn discriminator(&self) -> u8 {
        self.message.discriminator()
    }

    /// Returns the underlying transport message.
    #[must_use]
    pub const fn core(&self) -> &M {
        &self.message
    }

    /// Returns the underlying transport message mutably.
    ///
    /// Body subtypes use this to manage their payload; header and property
    /// access should go through the facade.
    pub const fn core_mut(&mut self) -> &mut M {
        &mut self.message
    }

    /// Unwraps the envelope into the underlying transport message.
    #[must_use]
    pub fn into_core(self) -> M {
        self.message
    }
}
