//! Report colouring.
//!
//! Colours use mIRC control codes (`\x03NN...\x03`) so the report can be
//! pasted into IRC as is. Terminal escapes are not supported.

/// mIRC colour control character.
pub const COLOR_CONTROL: char = '\x03';

/// An mIRC colour, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MircColor(Option<u8>);

impl MircColor {
    /// A colour with the given mIRC code.
    pub const fn code(code: u8) -> Self {
        Self(Some(code))
    }

    /// No colour: tokens pass through unchanged.
    pub const fn none() -> Self {
        Self(None)
    }

    /// Wrap `token` in this colour.
    pub fn apply_to(&self, token: &str) -> String {
        match self.0 {
            Some(code) => format!("{COLOR_CONTROL}{code:02}{token}{COLOR_CONTROL}"),
            None => token.to_string(),
        }
    }
}

/// Colours for each value field of a report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTheme {
    /// EAPI value (grey).
    pub eapi: MircColor,
    /// Build type (teal).
    pub build: MircColor,
    /// Attestation and test codes (orange).
    pub flags: MircColor,
    /// Stable implementations (green).
    pub stable: MircColor,
    /// Testing-only implementations (yellow).
    pub keyworded: MircColor,
    /// Suggested implementations (blue).
    pub updates: MircColor,
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self::plain()
    }
}

impl ReportTheme {
    /// Theme with mIRC colours.
    pub fn mirc() -> Self {
        Self {
            eapi: MircColor::code(14),
            build: MircColor::code(10),
            flags: MircColor::code(7),
            stable: MircColor::code(3),
            keyworded: MircColor::code(8),
            updates: MircColor::code(12),
        }
    }

    /// Create a theme without colours.
    pub fn plain() -> Self {
        Self {
            eapi: MircColor::none(),
            build: MircColor::none(),
            flags: MircColor::none(),
            stable: MircColor::none(),
            keyworded: MircColor::none(),
            updates: MircColor::none(),
        }
    }

    /// Pick the theme for the `--color` flag.
    pub fn for_color(color: bool) -> Self {
        if color {
            Self::mirc()
        } else {
            Self::plain()
        }
    }
}
