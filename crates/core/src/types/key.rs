//! Product key type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductKey`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The input string is empty or only whitespace.
    #[error("product key cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("product key must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Identity of a product inside the cart, wishlist and comparison list.
///
/// This is the catalog slug (or database id when no slug exists). Two
/// entries with the same key are the same product, so stores merge or
/// deduplicate on it.
///
/// ## Constraints
///
/// - Surrounding whitespace is trimmed
/// - Length: 1-256 characters after trimming
///
/// ## Examples
///
/// ```
/// use glory_core::ProductKey;
///
/// let key = ProductKey::parse("  aurelius-watch ").unwrap();
/// assert_eq!(key.as_str(), "aurelius-watch");
///
/// assert!(ProductKey::parse("").is_err());
/// assert!(ProductKey::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct ProductKey(String);

impl ProductKey {
    /// Maximum length of a product key.
    pub const MAX_LENGTH: usize = 256;

    /// Parse a `ProductKey` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than
    /// [`ProductKey::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, KeyError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(KeyError::Empty);
        }

        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(KeyError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl std::str::FromStr for ProductKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductKey> for String {
    fn from(key: ProductKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ProductKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ProductKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProductKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_keys() {
        assert!(ProductKey::parse("w1").is_ok());
        assert!(ProductKey::parse("aurelius-chronograph").is_ok());
        assert!(ProductKey::parse("64f1c0ffee").is_ok());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let key = ProductKey::parse("\t w1 \n").unwrap();
        assert_eq!(key.as_str(), "w1");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ProductKey::parse(""), Err(KeyError::Empty));
        assert_eq!(ProductKey::parse("  "), Err(KeyError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "k".repeat(ProductKey::MAX_LENGTH + 1);
        assert!(matches!(
            ProductKey::parse(&long),
            Err(KeyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let key = ProductKey::parse("w1").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"w1\"");
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<ProductKey>("\"\"").is_err());
        let key: ProductKey = serde_json::from_str("\"w1\"").unwrap();
        assert_eq!(key, "w1");
    }

    #[test]
    fn test_from_str_and_display() {
        let key: ProductKey = "w1".parse().unwrap();
        assert_eq!(format!("{key}"), "w1");
        assert_eq!(format!("{key:<4}|"), "w1  |");
    }
}
