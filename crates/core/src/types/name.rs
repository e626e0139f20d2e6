//! Store name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`StoreName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreNameError {
    /// The input is empty after trimming.
    #[error("store name cannot be empty")]
    Empty,
    /// The input is shorter than the minimum length.
    #[error("store name must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input is longer than the maximum length.
    #[error("store name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// The display name of an e-commerce store.
///
/// ## Constraints
///
/// - Surrounding whitespace is trimmed
/// - Length: 2-128 characters (counted in `char`s)
///
/// ## Examples
///
/// ```
/// use duka_kuu_core::StoreName;
///
/// assert!(StoreName::parse("Duka").is_ok());
/// assert!(StoreName::parse("  ").is_err());
/// assert!(StoreName::parse("D").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct StoreName(String);

impl StoreName {
    /// Minimum length of a store name.
    pub const MIN_LENGTH: usize = 2;
    /// Maximum length of a store name.
    pub const MAX_LENGTH: usize = 128;

    /// Parse a `StoreName` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, shorter than
    /// [`Self::MIN_LENGTH`] or longer than [`Self::MAX_LENGTH`].
    pub fn parse(s: &str) -> Result<Self, StoreNameError> {
        let trimmed = s.trim();
        let len = trimmed.chars().count();

        if len == 0 {
            return Err(StoreNameError::Empty);
        }
        if len < Self::MIN_LENGTH {
            return Err(StoreNameError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if len > Self::MAX_LENGTH {
            return Err(StoreNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `StoreName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StoreName {
    type Error = StoreNameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<StoreName> for String {
    fn from(name: StoreName) -> Self {
        name.0
    }
}

impl AsRef<str> for StoreName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let name = StoreName::parse("  Duka Kuu  ");
        assert_eq!(name.map(StoreName::into_inner).as_deref(), Ok("Duka Kuu"));
    }

    #[test]
    fn test_parse_too_short() {
        assert_eq!(
            StoreName::parse("a"),
            Err(StoreNameError::TooShort { min: 2 })
        );
        assert!(StoreName::parse("ab").is_ok());
    }

    #[test]
    fn test_parse_counts_chars_not_bytes() {
        // One multi-byte character is still too short
        assert!(StoreName::parse("é").is_err());
        assert!(StoreName::parse("ñé").is_ok());
    }

    #[test]
    fn test_parse_empty_and_too_long() {
        assert_eq!(StoreName::parse(" "), Err(StoreNameError::Empty));
        let long = "x".repeat(StoreName::MAX_LENGTH + 1);
        assert!(matches!(
            StoreName::parse(&long),
            Err(StoreNameError::TooLong { .. })
        ));
    }
}
