//! Domain types for the message facade.
//!
//! This module contains pure value types with no infrastructure dependencies.
//! All types are immutable after construction and serialisable via serde.

mod correlation;
mod delivery;
mod destination;
pub mod headers;
mod identifier;
mod property;

pub use correlation::{CorrelationEncoding, CorrelationId, EncodingMismatch};
pub use delivery::{
    DeliveryMode, InvalidDeliveryMode, InvalidPriority, NON_PERSISTENT_CODE, PERSISTENT_CODE,
    Priority,
};
pub use destination::Destination;
pub use identifier::IdentifierRules;
pub use property::{PropertyKind, PropertyValue, TypeMismatch};
