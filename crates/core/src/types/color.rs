//! Hex color value type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`HexColor`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HexColorError {
    /// The value does not start with `#`.
    #[error("color must start with '#'")]
    MissingHash,
    /// The value has the wrong number of digits.
    #[error("color must have 3 or 6 hex digits")]
    InvalidLength,
    /// The value contains a non-hex digit.
    #[error("color contains a non-hex digit")]
    InvalidDigit,
}

/// A CSS hex color such as `#fff` or `#1a2b3c`, stored lowercased.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse a `HexColor` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input is `#` followed by exactly 3 or 6
    /// hexadecimal digits.
    pub fn parse(s: &str) -> Result<Self, HexColorError> {
        let digits = s.trim().strip_prefix('#').ok_or(HexColorError::MissingHash)?;

        if digits.len() != 3 && digits.len() != 6 {
            return Err(HexColorError::InvalidLength);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HexColorError::InvalidDigit);
        }

        Ok(Self(format!("#{}", digits.to_ascii_lowercase())))
    }

    /// Returns the color as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = HexColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(HexColor::parse("#FFF").map(|c| c.0), Ok("#fff".to_string()));
        assert!(HexColor::parse("#1a2B3c").is_ok());
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(HexColor::parse("fff"), Err(HexColorError::MissingHash));
        assert_eq!(HexColor::parse("#ffff"), Err(HexColorError::InvalidLength));
        assert_eq!(HexColor::parse("#ggg"), Err(HexColorError::InvalidDigit));
    }
}
