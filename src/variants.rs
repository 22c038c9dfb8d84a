//! Light/dark pairs of arbitrary values.

use crate::manager::ThemeManager;
use crate::mode::ColorMode;

/// A value with separate light and dark variants.
///
/// Presentational code holds its two static variants in one of these and
/// picks per render; the manager stays the single writer of the mode.
///
/// # Example
///
/// ```rust
/// use appearance::{ColorMode, Variants};
///
/// let banner = Variants::new("sunny greeting", "midnight greeting");
/// assert_eq!(*banner.pick(ColorMode::Dark), "midnight greeting");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variants<T> {
    pub light: T,
    pub dark: T,
}

impl<T> Variants<T> {
    /// Pairs a light and a dark variant.
    pub fn new(light: T, dark: T) -> Self {
        Self { light, dark }
    }

    /// The variant for the given mode.
    pub fn pick(&self, mode: ColorMode) -> &T {
        match mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        }
    }

    /// The variant for the manager's current mode.
    pub fn pick_with(&self, manager: &ThemeManager) -> &T {
        self.pick(manager.mode())
    }

    /// Transforms both variants, keeping the pairing.
    pub fn map<U>(self, f: impl Fn(T) -> U) -> Variants<U> {
        Variants {
            light: f(self.light),
            dark: f(self.dark),
        }
    }
}
