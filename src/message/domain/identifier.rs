//! Property-name validation against the selector grammar.
//!
//! Property names must be lexically valid identifiers, must not collide with
//! the reserved words of the selector grammar, and must not carry the prefix
//! reserved for provider-internal use. All checks are pure functions over an
//! immutable rule set constructed once.

use crate::message::error::InvalidNameError;

/// Reserved words of the selector grammar. Matching is case-sensitive and
/// exact.
const RESERVED_IDENTIFIERS: &[&str] = &[
    "NULL", "TRUE", "FALSE", "NOT", "AND", "OR", "BETWEEN", "LIKE", "IN", "IS", "ESCAPE",
];

/// Prefix reserved for provider-internal property names.
const FORBIDDEN_PREFIX: &str = "JMS_ACTIVEMQ";

/// Immutable identifier validation rules.
///
/// The default rule set carries the selector grammar's reserved words and the
/// provider-internal prefix. The rules are plain data: construct once, share
/// freely, never mutate.
///
/// # Examples
///
/// ```
/// use courier::message::domain::IdentifierRules;
///
/// let rules = IdentifierRules::new();
/// assert!(rules.is_valid_identifier("order_7"));
/// assert!(!rules.is_valid_identifier("7orders"));
/// assert!(rules.is_reserved("BETWEEN"));
/// assert!(rules.has_forbidden_prefix("JMS_ACTIVEMQ_foo"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierRules {
    reserved: &'static [&'static str],
    forbidden_prefix: &'static str,
}

impl IdentifierRules {
    /// Creates the default rule set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reserved: RESERVED_IDENTIFIERS,
            forbidden_prefix: FORBIDDEN_PREFIX,
        }
    }

    /// Returns `true` if `name` is a lexically valid identifier.
    ///
    /// The first character must be an ASCII letter, underscore, or dollar
    /// sign; subsequent characters may also be ASCII digits. Empty names are
    /// never valid.
    #[must_use]
    pub fn is_valid_identifier(&self, name: &str) -> bool {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        is_identifier_start(first) && chars.all(is_identifier_part)
    }

    /// Returns `true` if `name` is a reserved word of the selector grammar.
    #[must_use]
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(&name)
    }

    /// Returns `true` if `name` carries the provider-internal prefix.
    #[must_use]
    pub fn has_forbidden_prefix(&self, name: &str) -> bool {
        name.starts_with(self.forbidden_prefix)
    }

    /// Returns the provider-internal prefix rejected by these rules.
    #[must_use]
    pub const fn forbidden_prefix(&self) -> &'static str {
        self.forbidden_prefix
    }

    /// Checks a candidate property name against all three rules.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNameError`] if the name is empty, lexically invalid,
    /// reserved, or carries the provider-internal prefix.
    pub fn check(&self, name: &str) -> Result<(), InvalidNameError> {
        if name.is_empty() {
            return Err(InvalidNameError::Empty);
        }
        if !self.is_valid_identifier(name) {
            return Err(InvalidNameError::NotAnIdentifier(name.to_owned()));
        }
        if self.is_reserved(name) {
            return Err(InvalidNameError::Reserved(name.to_owned()));
        }
        if self.has_forbidden_prefix(name) {
            return Err(InvalidNameError::ForbiddenPrefix {
                name: name.to_owned(),
                prefix: self.forbidden_prefix,
            });
        }
        Ok(())
    }
}

impl Default for IdentifierRules {
    fn default() -> Self {
        Self::new()
    }
}

const fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

const fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}
