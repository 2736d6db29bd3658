//! Bead colors.
//!
//! Schemas carry colors as `#rrggbb` strings. [`Color`] is the parsed form
//! used for contrast decisions and raster output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LayoutError;

/// Perceived-brightness threshold above which dark text is used.
const CONTRAST_THRESHOLD: f32 = 186.0;

/// An opaque RGB color with components in the 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a color from RGB components (0.0-1.0 range).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit RGB components (0-255 range).
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse a `#rrggbb` hex string. The leading `#` is required.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Self::from_rgb8(r, g, b))
    }

    /// Convert to 8-bit RGB components.
    #[inline]
    pub fn to_rgb8(self) -> [u8; 3] {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }

    /// Convert to 8-bit RGBA components with full opacity.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let [r, g, b] = self.to_rgb8();
        [r, g, b, 255]
    }

    /// Lowercase `#rrggbb` representation.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Perceived brightness on the 0-255 scale.
    pub fn brightness(self) -> f32 {
        let [r, g, b] = self.to_rgb8();
        r as f32 * 0.299 + g as f32 * 0.587 + b as f32 * 0.114
    }

    /// Pick `dark` on bright colors and `light` on dark ones.
    pub fn contrast(self, dark: Color, light: Color) -> Color {
        if self.brightness() > CONTRAST_THRESHOLD {
            dark
        } else {
            light
        }
    }

    /// Text color readable on top of this color.
    #[inline]
    pub fn text_contrast(self) -> Color {
        self.contrast(Self::BLACK, Self::WHITE)
    }

    /// Outline color for a bead painted with this color.
    #[inline]
    pub fn outline_contrast(self) -> Color {
        self.contrast(Self::BEAD_OUTLINE_DARK, Self::BEAD_OUTLINE_LIGHT)
    }

    // Common colors
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const GRAY: Self = Self::new(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);
    pub const BEAD_OUTLINE_DARK: Self = Self::new(59.0 / 255.0, 59.0 / 255.0, 59.0 / 255.0);
    pub const BEAD_OUTLINE_LIGHT: Self = Self::new(174.0 / 255.0, 174.0 / 255.0, 174.0 / 255.0);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| LayoutError::InvalidColor(s.to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Case-insensitive comparison of two hex color strings.
#[inline]
pub fn same_color(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
