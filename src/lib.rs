//! Courier: a typed client-side message facade over a wire-oriented transport.
//!
//! The transport stores messages as an untyped bag of scalar properties plus
//! an opaque body buffer. This crate presents that bag through a
//! strongly-typed envelope that behaves the way a messaging client expects:
//! widening-only property coercion, identifier validation against the
//! selector grammar, a read-only state machine for received messages, and a
//! field-by-field import protocol for messages built by other providers.
//!
//! # Architecture
//!
//! Courier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure value types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the transport session and for
//!   foreign messages
//! - **Adapters**: Concrete implementations of ports (in-memory transport for
//!   testing)
//!
//! # Modules
//!
//! - [`message`]: The typed message envelope, coercion rules, and dispatch

pub mod message;
