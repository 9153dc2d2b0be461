//! Typed message facade over an untyped transport property bag.
//!
//! The transport deals in generic messages: a numeric type discriminator, a
//! handful of fixed headers (durability, timestamp, expiration, priority,
//! delivery count), a string-keyed bag of scalar properties, and an opaque
//! body buffer. This module wraps one such message in a
//! [`envelope::MessageEnvelope`] that enforces the client-side contract.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure value types ([`domain::PropertyValue`],
//!   [`domain::CorrelationId`], [`domain::DeliveryMode`], identifier rules)
//! - **Ports**: Abstract trait interfaces ([`ports::transport::CoreMessage`],
//!   [`ports::transport::Session`], [`ports::foreign::ForeignMessage`])
//! - **Adapters**: Concrete implementations
//!   ([`adapters::memory::InMemoryCoreMessage`],
//!   [`adapters::memory::InMemorySession`])
//! - **Envelope**: The facade itself, gating every read and write through
//!   identifier validation, the coercion matrix, and the read-only state
//!   machine
//! - **Dispatch**: Construction of the six typed facade subtypes from a
//!   received message's discriminator
//!
//! # Example
//!
//! ```
//! use courier::message::adapters::memory::InMemorySession;
//! use courier::message::envelope::MessageEnvelope;
//! use mockable::DefaultClock;
//!
//! let session = InMemorySession::new();
//! let clock = DefaultClock;
//! let mut message = MessageEnvelope::outbound(&session, &clock);
//!
//! message.set_int_property("orderCount", 7).expect("valid property");
//! assert_eq!(message.long_property("orderCount").expect("widening"), 7);
//! ```

pub mod adapters;
pub mod dispatch;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod import;
pub mod ports;

#[cfg(test)]
mod tests;
