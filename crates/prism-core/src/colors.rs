//! Color values, the built-in presets and color resolution.
//!
//! ## Resolution
//!
//! A preset name plus up to four per-category overrides resolve to a complete
//! [`PrismColors`]. Resolution never fails: an unknown preset falls back to
//! [`Preset::Calm`], and an override that is blank or not a hex color falls
//! back to the preset's value for that category.

use prism_syntax::SpanCategory;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// An opaque color from `0xRRGGBB`.
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 0xFF
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

/// Errors parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("Color is empty")]
    Empty,

    #[error("Invalid color \"{0}\": expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidHex(String),
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorError::Empty);
        }
        let invalid = || ColorError::InvalidHex(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|n| n * 0x11)
                        .map_err(|_| invalid())
                };
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// One color per painted category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrismColors {
    pub variant: Color,
    pub important: Color,
    pub arbitrary: Color,
    pub utility: Color,
}

impl PrismColors {
    /// The color painted for `category`.
    pub fn get(&self, category: SpanCategory) -> Color {
        match category {
            SpanCategory::Variant => self.variant,
            SpanCategory::Important => self.important,
            SpanCategory::Arbitrary => self.arbitrary,
            SpanCategory::Utility => self.utility,
        }
    }

    fn slot_mut(&mut self, category: SpanCategory) -> &mut Color {
        match category {
            SpanCategory::Variant => &mut self.variant,
            SpanCategory::Important => &mut self.important,
            SpanCategory::Arbitrary => &mut self.arbitrary,
            SpanCategory::Utility => &mut self.utility,
        }
    }
}

impl Default for PrismColors {
    fn default() -> Self {
        Preset::default().colors()
    }
}

/// Built-in palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Preset {
    Clear,
    Soft,
    #[default]
    Calm,
    Contrast,
    Muted,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Clear,
        Preset::Soft,
        Preset::Calm,
        Preset::Contrast,
        Preset::Muted,
    ];

    /// The name stored in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Clear => "Clear",
            Preset::Soft => "Soft",
            Preset::Calm => "Calm",
            Preset::Contrast => "Contrast",
            Preset::Muted => "Muted",
        }
    }

    /// Short description shown next to the name in pickers.
    pub fn description(&self) -> &'static str {
        match self {
            Preset::Clear => "Light mode · High readability",
            Preset::Soft => "Light mode · Gentle contrast",
            Preset::Calm => "Dark mode · Balanced (default)",
            Preset::Contrast => "Dark mode · High contrast",
            Preset::Muted => "Dark mode · Low noise",
        }
    }

    pub fn colors(&self) -> PrismColors {
        let [variant, important, arbitrary, utility] = match self {
            Preset::Clear => [0x2563EB, 0xDC2626, 0xB45309, 0x1F2937],
            Preset::Soft => [0x4F46E5, 0xE11D48, 0xCA8A04, 0x374151],
            Preset::Calm => [0x7FB4FF, 0xFF6B81, 0xF2C97D, 0xD1D7E0],
            Preset::Contrast => [0x93C5FD, 0xFB7185, 0xFACC15, 0xE5E7EB],
            Preset::Muted => [0x9CA3AF, 0xF87171, 0xD4B483, 0x9CA3AF],
        }
        .map(Color::from_hex);

        PrismColors {
            variant,
            important,
            arbitrary,
            utility,
        }
    }

    /// Looks up a preset by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Preset> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional per-category color strings from the user's configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arbitrary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utility: Option<String>,
}

impl ColorOverrides {
    pub fn get(&self, category: SpanCategory) -> Option<&str> {
        match category {
            SpanCategory::Variant => self.variant.as_deref(),
            SpanCategory::Important => self.important.as_deref(),
            SpanCategory::Arbitrary => self.arbitrary.as_deref(),
            SpanCategory::Utility => self.utility.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        SpanCategory::ALL
            .iter()
            .all(|&category| self.get(category).is_none())
    }
}

/// Resolves a preset name and overrides to four concrete colors.
pub fn resolve_colors(preset: &str, overrides: &ColorOverrides) -> PrismColors {
    let preset = Preset::from_name(preset).unwrap_or_else(|| {
        tracing::warn!("Unknown color preset {:?}, using {}", preset, Preset::default());
        Preset::default()
    });

    let mut colors = preset.colors();
    for category in SpanCategory::ALL {
        let Some(raw) = overrides.get(category) else {
            continue;
        };
        match raw.parse::<Color>() {
            Ok(color) => *colors.slot_mut(category) = color,
            Err(ColorError::Empty) => {}
            Err(e) => tracing::warn!("Ignoring {} color override: {}", category, e),
        }
    }
    colors
}
