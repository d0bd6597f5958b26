//! Container colors
//!
//! Every container takes the next color of a small fixed palette. The
//! round-robin cursor lives in an explicit [`PaletteAllocator`] that callers
//! pass to container construction, so two diagrams never share a cursor.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation, e.g. `#b58900`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color '{0}': expected #rrggbb")]
pub struct ColorParseError(pub String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// The seven accent colors containers cycle through
pub const DEFAULT_PALETTE: [Color; 7] = [
    Color::rgb(181, 137, 0),
    Color::rgb(220, 50, 47),
    Color::rgb(211, 54, 130),
    Color::rgb(108, 113, 196),
    Color::rgb(38, 139, 210),
    Color::rgb(42, 161, 152),
    Color::rgb(133, 153, 0),
];

/// Round-robin color source
///
/// The cursor is advanced before it is read, so a fresh allocator hands out
/// the second palette entry first and the first entry last.
#[derive(Debug, Clone)]
pub struct PaletteAllocator {
    colors: Vec<Color>,
    index: usize,
}

impl PaletteAllocator {
    /// Allocator over `colors`; an empty list falls back to the default palette
    pub fn new(colors: Vec<Color>) -> Self {
        let colors = if colors.is_empty() {
            DEFAULT_PALETTE.to_vec()
        } else {
            colors
        };
        Self { colors, index: 0 }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Advance the cursor and return the color under it
    pub fn next_color(&mut self) -> Color {
        self.index = (self.index + 1) % self.colors.len();
        self.colors[self.index]
    }
}

impl Default for PaletteAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.to_vec())
    }
}
