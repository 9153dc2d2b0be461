//! Wire-level property values and the widening-only coercion matrix.
//!
//! The transport's property bag supports a closed vocabulary of scalar types.
//! Reads through the typed facade may widen a stored value but never narrow
//! it, and the textual and numeric domains are kept strictly separate: any
//! value can be read back as text, but a stored text value can only be read
//! as text.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A scalar value as stored in the transport property bag.
///
/// This is the complete wire vocabulary; nothing else can be stored under a
/// property name. The variant chosen at write time is preserved exactly (no
/// silent widening on write) and governs which typed reads succeed later.
///
/// # Serialisation
///
/// Values are serialised with a `type` tag and a `value` payload:
///
/// ```json
/// { "type": "int", "value": 42 }
/// { "type": "text", "value": "order-7" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    /// A boolean value.
    Bool(bool),
    /// A signed 8-bit integer.
    Byte(i8),
    /// A signed 16-bit integer.
    Short(i16),
    /// A signed 32-bit integer.
    Int(i32),
    /// A signed 64-bit integer.
    Long(i64),
    /// A 32-bit floating point value.
    Float(f32),
    /// A 64-bit floating point value.
    Double(f64),
    /// A textual value.
    Text(String),
    /// An opaque binary value.
    ///
    /// Binary values never participate in widening; they can only be read
    /// back through the generic object accessor (or as the byte encoding of
    /// a correlation identifier).
    Bytes(Vec<u8>),
}

impl PropertyValue {
    /// Returns the kind tag for this value.
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        match self {
            Self::Bool(_) => PropertyKind::Bool,
            Self::Byte(_) => PropertyKind::Byte,
            Self::Short(_) => PropertyKind::Short,
            Self::Int(_) => PropertyKind::Int,
            Self::Long(_) => PropertyKind::Long,
            Self::Float(_) => PropertyKind::Float,
            Self::Double(_) => PropertyKind::Double,
            Self::Text(_) => PropertyKind::Text,
            Self::Bytes(_) => PropertyKind::Bytes,
        }
    }

    /// Reads this value as a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] unless the stored value is a boolean.
    pub const fn as_bool(&self) -> Result<bool, TypeMismatch> {
        match self {
            Self::Bool(value) => Ok(*value),
            other => Err(other.mismatch(PropertyKind::Bool)),
        }
    }

    /// Reads this value as a byte.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] unless the stored value is a byte.
    pub const fn as_byte(&self) -> Result<i8, TypeMismatch> {
        match self {
            Self::Byte(value) => Ok(*value),
            other => Err(other.mismatch(PropertyKind::Byte)),
        }
    }

    /// Reads this value as a short, widening from byte if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] unless the stored value is a byte or short.
    pub const fn as_short(&self) -> Result<i16, TypeMismatch> {
        match self {
            Self::Byte(value) => Ok(*value as i16),
            Self::Short(value) => Ok(*value),
            other => Err(other.mismatch(PropertyKind::Short)),
        }
    }

    /// Reads this value as an int, widening from byte or short if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] unless the stored value is a byte, short, or
    /// int.
    pub const fn as_int(&self) -> Result<i32, TypeMismatch> {
        match self {
            Self::Byte(value) => Ok(*value as i32),
            Self::Short(value) => Ok(*value as i32),
            Self::Int(value) => Ok(*value),
            other => Err(other.mismatch(PropertyKind::Int)),
        }
    }

    /// Reads this value as a long, widening from any narrower integer.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] unless the stored value is an integer type.
    pub const fn as_long(&self) -> Result<i64, TypeMismatch> {
        match self {
            Self::Byte(value) => Ok(*value as i64),
            Self::Short(value) => Ok(*value as i64),
            Self::Int(value) => Ok(*value as i64),
            Self::Long(value) => Ok(*value),
            other => Err(other.mismatch(PropertyKind::Long)),
        }
    }

    /// Reads this value as a float.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] unless the stored value is a float.
    pub const fn as_float(&self) -> Result<f32, TypeMismatch> {
        match self {
            Self::Float(value) => Ok(*value),
            other => Err(other.mismatch(PropertyKind::Float)),
        }
    }

    /// Reads this value as a double, widening from float if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] unless the stored value is a float or double.
    pub const fn as_double(&self) -> Result<f64, TypeMismatch> {
        match self {
            Self::Float(value) => Ok(*value as f64),
            Self::Double(value) => Ok(*value),
            other => Err(other.mismatch(PropertyKind::Double)),
        }
    }

    /// Reads this value as text.
    ///
    /// Every scalar has a textual rendering; only opaque binary values are
    /// excluded from the textual domain.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] if the stored value is binary.
    pub fn as_text(&self) -> Result<String, TypeMismatch> {
        match self {
            Self::Bool(value) => Ok(value.to_string()),
            Self::Byte(value) => Ok(value.to_string()),
            Self::Short(value) => Ok(value.to_string()),
            Self::Int(value) => Ok(value.to_string()),
            Self::Long(value) => Ok(value.to_string()),
            Self::Float(value) => Ok(value.to_string()),
            Self::Double(value) => Ok(value.to_string()),
            Self::Text(value) => Ok(value.clone()),
            other @ Self::Bytes(_) => Err(other.mismatch(PropertyKind::Text)),
        }
    }

    /// Reads this value as opaque binary data.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] unless the stored value is binary.
    pub fn as_bytes(&self) -> Result<&[u8], TypeMismatch> {
        match self {
            Self::Bytes(value) => Ok(value),
            other => Err(other.mismatch(PropertyKind::Bytes)),
        }
    }

    const fn mismatch(&self, requested: PropertyKind) -> TypeMismatch {
        TypeMismatch {
            stored: self.kind(),
            requested,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// The kind tag of a stored or requested scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// Boolean.
    Bool,
    /// Signed 8-bit integer.
    Byte,
    /// Signed 16-bit integer.
    Short,
    /// Signed 32-bit integer.
    Int,
    /// Signed 64-bit integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// Text.
    Text,
    /// Opaque binary.
    Bytes,
}

impl PropertyKind {
    /// Returns the kind name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Text => "text",
            Self::Bytes => "bytes",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A coercion request outside the widening matrix.
///
/// Names both the stored kind and the requested kind so callers can see
/// exactly which conversion was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot read {stored} property as {requested}")]
pub struct TypeMismatch {
    /// The kind of the stored value.
    pub stored: PropertyKind,
    /// The kind the caller asked for.
    pub requested: PropertyKind,
}
