//! Delivery mode and priority value types.
//!
//! Delivery mode is a two-valued choice mapped onto the transport's
//! durability flag. Priority is a bounded integer; out-of-range values are
//! rejected before they can reach the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire code for [`DeliveryMode::NonPersistent`].
pub const NON_PERSISTENT_CODE: i32 = 1;

/// Wire code for [`DeliveryMode::Persistent`].
pub const PERSISTENT_CODE: i32 = 2;

/// How a message survives a broker restart.
///
/// Exactly two values exist; any other numeric code is rejected at the
/// facade boundary.
///
/// # Examples
///
/// ```
/// use courier::message::domain::DeliveryMode;
///
/// assert!(DeliveryMode::Persistent.is_durable());
/// assert!(DeliveryMode::from_code(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// The message may be lost on broker failure.
    NonPersistent,
    /// The message is stored durably by the broker.
    Persistent,
}

impl DeliveryMode {
    /// Parses a wire delivery-mode code.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDeliveryMode`] for any code other than 1
    /// (non-persistent) or 2 (persistent).
    pub const fn from_code(code: i32) -> Result<Self, InvalidDeliveryMode> {
        match code {
            NON_PERSISTENT_CODE => Ok(Self::NonPersistent),
            PERSISTENT_CODE => Ok(Self::Persistent),
            other => Err(InvalidDeliveryMode(other)),
        }
    }

    /// Returns the wire code for this mode.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::NonPersistent => NON_PERSISTENT_CODE,
            Self::Persistent => PERSISTENT_CODE,
        }
    }

    /// Maps the transport durability flag to a delivery mode.
    #[must_use]
    pub const fn from_durable(durable: bool) -> Self {
        if durable {
            Self::Persistent
        } else {
            Self::NonPersistent
        }
    }

    /// Returns `true` if this mode maps to the durable flag.
    #[must_use]
    pub const fn is_durable(self) -> bool {
        matches!(self, Self::Persistent)
    }
}

/// A delivery-mode code outside the two legal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is not a valid delivery mode: must be 1 (non-persistent) or 2 (persistent)")]
pub struct InvalidDeliveryMode(pub i32);

/// A message priority in the inclusive range 0 to 9.
///
/// # Examples
///
/// ```
/// use courier::message::domain::Priority;
///
/// assert_eq!(Priority::new(9).expect("boundary is valid").get(), 9);
/// assert!(Priority::new(10).is_err());
/// assert_eq!(Priority::DEFAULT.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    /// The default priority assigned to freshly constructed messages.
    pub const DEFAULT: Self = Self(4);

    /// Validates a candidate priority.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPriority`] if `value` is outside the inclusive range
    /// 0 to 9.
    pub fn new(value: i32) -> Result<Self, InvalidPriority> {
        u8::try_from(value)
            .ok()
            .filter(|priority| *priority <= 9)
            .map(Self)
            .ok_or(InvalidPriority(value))
    }

    /// Returns the priority value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A priority outside the inclusive range 0 to 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is not valid: priority must be between 0 and 9")]
pub struct InvalidPriority(pub i32);
