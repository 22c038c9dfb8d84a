//! The binary light/dark color mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The user's preferred color mode.
///
/// This is the only value the rest of the crate trades in: every persisted
/// choice, every system signal, and every resolved state is one of these two
/// variants. Anything else read from storage is treated as "no choice", never
/// as a third mode.
///
/// Serializes as lowercase (`"light"` / `"dark"`), matching the on-disk slot
/// format, so hosts can embed it directly in their own config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    /// Returns the lowercase string form used by the persistence slot.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    /// Returns the opposite mode.
    ///
    /// # Example
    ///
    /// ```rust
    /// use appearance::ColorMode;
    ///
    /// assert_eq!(ColorMode::Light.toggled(), ColorMode::Dark);
    /// assert_eq!(ColorMode::Dark.toggled(), ColorMode::Light);
    /// ```
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }

    /// True for [`ColorMode::Dark`].
    pub fn is_dark(self) -> bool {
        matches!(self, ColorMode::Dark)
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a string that is neither `"light"` nor `"dark"`.
///
/// Callers reading from storage treat this as an absent value rather than
/// surfacing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorModeError {
    pub input: String,
}

impl fmt::Display for ParseColorModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid color mode '{}' (expected 'light' or 'dark')",
            self.input
        )
    }
}

impl std::error::Error for ParseColorModeError {}

impl FromStr for ColorMode {
    type Err = ParseColorModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            other => Err(ParseColorModeError {
                input: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_modes() {
        assert_eq!("light".parse(), Ok(ColorMode::Light));
        assert_eq!("dark".parse(), Ok(ColorMode::Dark));
    }

    #[test]
    fn test_parse_rejects_other_strings() {
        for input in ["Light", "DARK", "auto", "", "darkish"] {
            assert!(input.parse::<ColorMode>().is_err(), "accepted '{}'", input);
        }
    }

    #[test]
    fn test_parse_error_display() {
        let err = "sepia".parse::<ColorMode>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("sepia"));
        assert!(msg.contains("light"));
    }

    #[test]
    fn test_toggled_flips() {
        assert_eq!(ColorMode::Light.toggled(), ColorMode::Dark);
        assert_eq!(ColorMode::Dark.toggled().toggled(), ColorMode::Dark);
    }

    #[test]
    fn test_display_matches_slot_format() {
        assert_eq!(ColorMode::Light.to_string(), "light");
        assert_eq!(ColorMode::Dark.to_string(), "dark");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ColorMode::Dark).unwrap(), "\"dark\"");
        let parsed: ColorMode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, ColorMode::Light);
    }
}
