//! Ready-made terminal styles per color mode.

use console::Style;

use crate::mode::ColorMode;
use crate::variants::Variants;

/// A small set of terminal styles tuned per mode.
///
/// The concrete styling a resolved mode activates: dark picks bright
/// foregrounds for dark backgrounds, light the reverse. Hosts with their own
/// styling can ignore this and build their own [`Variants`] pair instead.
#[derive(Debug, Clone)]
pub struct Palette {
    pub heading: Style,
    pub body: Style,
    pub muted: Style,
    pub accent: Style,
    pub link: Style,
}

impl Palette {
    /// Styles for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            heading: Style::new().black().bold(),
            body: Style::new().color256(235),
            muted: Style::new().color256(244),
            accent: Style::new().blue().bold(),
            link: Style::new().blue().underlined(),
        }
    }

    /// Styles for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            heading: Style::new().white().bold(),
            body: Style::new().color256(252),
            muted: Style::new().color256(246),
            accent: Style::new().cyan().bold(),
            link: Style::new().cyan().underlined(),
        }
    }

    /// The palette matching the given mode.
    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Light => Self::light(),
            ColorMode::Dark => Self::dark(),
        }
    }

    /// Both palettes as a [`Variants`] pair.
    pub fn variants() -> Variants<Palette> {
        Variants::new(Self::light(), Self::dark())
    }
}
