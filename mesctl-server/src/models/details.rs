//! Validated detail fields: product name and notes
//!
//! Quantity is deliberately absent: positivity is a business rule owned
//! by the entity, not request-shape validation.

use super::ValidationError;

/// Maximum length for product names
const MAX_PRODUCT_NAME_LEN: usize = 100;

/// Maximum length for notes
const MAX_NOTES_LEN: usize = 500;

/// Validated product name (1–100 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty {
                field: "product name",
            });
        }

        if s.chars().count() > MAX_PRODUCT_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "product name",
                max: MAX_PRODUCT_NAME_LEN,
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

/// Validated notes (up to 500 characters, may be empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notes(String);

impl Notes {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.chars().count() > MAX_NOTES_LEN {
            return Err(ValidationError::TooLong {
                field: "notes",
                max: MAX_NOTES_LEN,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_name_bounds() {
        assert!(ProductName::new("Precision gear").is_ok());
        assert!(ProductName::new(&"p".repeat(100)).is_ok());

        let err = ProductName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));

        let err = ProductName::new(&"p".repeat(101)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 100, .. }));
    }

    #[test]
    fn notes_allow_empty_but_cap_length() {
        assert!(Notes::new("").is_ok());
        assert!(Notes::new(&"n".repeat(500)).is_ok());

        let err = Notes::new(&"n".repeat(501)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 500, .. }));
    }
}
