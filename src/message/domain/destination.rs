//! Opaque destination values resolved from transport addresses.
//!
//! The facade never interprets an address; it resolves one into a
//! [`Destination`] exactly once and caches the result on the envelope.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An addressable destination, treated opaquely by the facade.
///
/// Two destinations are equal when their addresses are equal.
///
/// # Examples
///
/// ```
/// use courier::message::domain::Destination;
///
/// let dest = Destination::from_address("orders.incoming");
/// assert_eq!(dest.address(), "orders.incoming");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Destination {
    address: String,
}

impl Destination {
    /// Resolves an address string into a destination.
    #[must_use]
    pub fn from_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    /// Returns the address this destination was resolved from.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}
