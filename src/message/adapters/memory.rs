//! In-memory transport adapters for testing.
//!
//! Provide simple, thread-safe implementations of the transport ports,
//! suitable for unit testing without a broker. The session records its
//! commit calls and each message records whether it was individually
//! acknowledged, so tests can assert the acknowledgement sequence.

use crate::message::domain::PropertyValue;
use crate::message::ports::transport::{CoreMessage, Session, TransportError, TransportResult};
use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// In-memory implementation of [`CoreMessage`].
///
/// Property storage is a plain map with case-sensitive keys and
/// overwrite-on-set semantics; the body is a byte buffer and stream
/// operations complete eagerly.
pub struct InMemoryCoreMessage {
    discriminator: u8,
    durable: bool,
    timestamp: i64,
    expiration: i64,
    priority: u8,
    delivery_count: i32,
    user_id: Option<Uuid>,
    address: Option<String>,
    properties: HashMap<String, PropertyValue>,
    body: Vec<u8>,
    individually_acknowledged: bool,
}

impl InMemoryCoreMessage {
    /// Creates a fresh message, as the session does for outbound
    /// construction.
    #[must_use]
    pub fn new(
        discriminator: u8,
        durable: bool,
        expiration: i64,
        timestamp: i64,
        priority: u8,
    ) -> Self {
        Self {
            discriminator,
            durable,
            timestamp,
            expiration,
            priority,
            delivery_count: 0,
            user_id: None,
            address: None,
            properties: HashMap::new(),
            body: Vec::new(),
            individually_acknowledged: false,
        }
    }

    /// Creates a message in its just-delivered shape: a transport-assigned
    /// unique identifier and a delivery count of 1.
    #[must_use]
    pub fn received(discriminator: u8) -> Self {
        let mut message = Self::new(discriminator, true, 0, 0, 4);
        message.user_id = Some(Uuid::new_v4());
        message.delivery_count = 1;
        message
    }

    /// Sets the routed-to address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the delivery counter.
    #[must_use]
    pub fn with_delivery_count(mut self, count: i32) -> Self {
        self.delivery_count = count;
        self
    }

    /// Stores a property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Sets the body buffer.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the body buffer.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns `true` if this message was acknowledged individually.
    #[must_use]
    pub const fn is_individually_acknowledged(&self) -> bool {
        self.individually_acknowledged
    }
}

impl CoreMessage for InMemoryCoreMessage {
    fn discriminator(&self) -> u8 {
        self.discriminator
    }

    fn is_durable(&self) -> bool {
        self.durable
    }

    fn set_durable(&mut self, durable: bool) {
        self.durable = durable;
    }

    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn set_timestamp(&mut self, timestamp: i64) {
        self.timestamp = timestamp;
    }

    fn expiration(&self) -> i64 {
        self.expiration
    }

    fn set_expiration(&mut self, expiration: i64) {
        self.expiration = expiration;
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn set_priority(&mut self, priority: u8) {
        self.priority = priority;
    }

    fn delivery_count(&self) -> i32 {
        self.delivery_count
    }

    fn set_delivery_count(&mut self, count: i32) {
        self.delivery_count = count;
    }

    fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    fn set_user_id(&mut self, user_id: Option<Uuid>) {
        self.user_id = user_id;
    }

    fn address(&self) -> Option<String> {
        self.address.clone()
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        self.properties.get(name).cloned()
    }

    fn put_property(&mut self, name: &str, value: PropertyValue) {
        self.properties.insert(name.to_owned(), value);
    }

    fn remove_property(&mut self, name: &str) -> Option<PropertyValue> {
        self.properties.remove(name)
    }

    fn contains_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    fn property_names(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }

    fn body_size(&self) -> usize {
        self.body.len()
    }

    fn reset_body(&mut self) {
        // Reader index reset is a no-op for a plain buffer.
    }

    fn set_body_input(&mut self, mut input: Box<dyn Read + Send>) {
        self.body.clear();
        // The in-memory transport drains the stream eagerly.
        if input.read_to_end(&mut self.body).is_err() {
            self.body.clear();
        }
    }

    fn set_body_output(&mut self, mut output: Box<dyn Write + Send>) -> TransportResult<()> {
        output
            .write_all(&self.body)
            .map_err(|e| TransportError::stream(e.to_string()))
    }

    fn save_body_to(&mut self, output: &mut dyn Write) -> TransportResult<()> {
        output
            .write_all(&self.body)
            .map_err(|e| TransportError::stream(e.to_string()))
    }

    fn wait_body_completion(&mut self, _timeout_ms: i64) -> TransportResult<bool> {
        // Eager transfers are always complete.
        Ok(true)
    }

    fn individual_acknowledge(&mut self) -> TransportResult<()> {
        self.individually_acknowledged = true;
        Ok(())
    }
}

impl fmt::Debug for InMemoryCoreMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryCoreMessage")
            .field("discriminator", &self.discriminator)
            .field("durable", &self.durable)
            .field("timestamp", &self.timestamp)
            .field("expiration", &self.expiration)
            .field("priority", &self.priority)
            .field("delivery_count", &self.delivery_count)
            .field("user_id", &self.user_id)
            .field("address", &self.address)
            .field("properties", &self.properties)
            .field("body_size", &self.body.len())
            .finish()
    }
}

/// In-memory implementation of [`Session`].
///
/// Counts commits so tests can assert the acknowledgement call sequence.
#[derive(Debug, Default)]
pub struct InMemorySession {
    commits: AtomicUsize,
    created: AtomicUsize,
    fail_commit: bool,
}

impl InMemorySession {
    /// Creates a session whose commits succeed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session whose commits fail with a transport error.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            commits: AtomicUsize::new(0),
            created: AtomicUsize::new(0),
            fail_commit: true,
        }
    }

    /// Returns the number of successful commits.
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Returns the number of messages created through this session.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl Session for InMemorySession {
    type Message = InMemoryCoreMessage;

    fn create_message(
        &self,
        discriminator: u8,
        durable: bool,
        expiration: i64,
        timestamp: i64,
        priority: u8,
    ) -> Self::Message {
        self.created.fetch_add(1, Ordering::SeqCst);
        InMemoryCoreMessage::new(discriminator, durable, expiration, timestamp, priority)
    }

    fn commit(&self) -> TransportResult<()> {
        if self.fail_commit {
            return Err(TransportError::commit("session closed"));
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
