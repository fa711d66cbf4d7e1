//! Order number validation
//!
//! Order numbers are caller-chosen identifiers like "WO-2025-001":
//! 1 to 50 characters, no format restriction beyond length. Uniqueness is
//! enforced by the service and the storage layer, not here.

use super::ValidationError;

/// Maximum length for order numbers
const MAX_ORDER_NUMBER_LEN: usize = 50;

/// Validated order number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Create a new order number, validating length bounds.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty {
                field: "order number",
            });
        }

        if s.chars().count() > MAX_ORDER_NUMBER_LEN {
            return Err(ValidationError::TooLong {
                field: "order number",
                max: MAX_ORDER_NUMBER_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_numbers() {
        assert!(OrderNumber::new("WO-2025-001").is_ok());
        assert!(OrderNumber::new("A").is_ok());
        assert!(OrderNumber::new(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn rejects_empty() {
        let err = OrderNumber::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn rejects_over_50_chars() {
        let err = OrderNumber::new(&"x".repeat(51)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 50, .. }));
    }
}
