//! Validated identifiers that address a resource.
//!
//! Every operations type captures its context at construction. Blank input
//! is rejected there, so a route is never filled with an empty segment.

use std::fmt;

use crate::error::{PartnerError, Result};

/// A non-blank identifier such as a customer id, product id or country code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Fails with `InvalidArgument` naming `field` when `value` is empty or
    /// whitespace only.
    pub fn new(field: &str, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PartnerError::invalid_argument(format!("{field} must be set")));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unwrap a required request body.
pub fn require<'a, T>(field: &str, value: Option<&'a T>) -> Result<&'a T> {
    value.ok_or_else(|| PartnerError::invalid_argument(format!("{field} is required")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_blank_values() {
        let id = Identifier::new("customerId", "cust-1").unwrap();
        assert_eq!(id.as_str(), "cust-1");
        assert_eq!(id.to_string(), "cust-1");
    }

    #[test]
    fn keeps_surrounding_whitespace() {
        let id = Identifier::new("customerId", " cust-1 ").unwrap();
        assert_eq!(id.as_str(), " cust-1 ");
    }

    #[test]
    fn rejects_blank_values() {
        for blank in ["", " ", "\t\n"] {
            let err = Identifier::new("customerId", blank).unwrap_err();
            assert!(
                matches!(&err, PartnerError::InvalidArgument(msg) if msg == "customerId must be set"),
                "{blank:?}: {err}"
            );
        }
    }

    #[test]
    fn require_rejects_none() {
        let err = require::<u32>("budget", None).unwrap_err();
        assert!(matches!(err, PartnerError::InvalidArgument(msg) if msg == "budget is required"));
        assert_eq!(*require("budget", Some(&7)).unwrap(), 7);
    }
}
