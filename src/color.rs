use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// 8-bit RGBA color, written as `#RRGGBB` (or `#RRGGBBAA`) in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let well_formed =
            matches!(digits.len(), 6 | 8) && digits.bytes().all(|b| b.is_ascii_hexdigit());
        if !well_formed {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

/// Swatches shown under the canvas, left to right.
pub const DEFAULT_PALETTE: [&str; 19] = [
    "#000002", "#868687", "#900124", "#ed2832", "#2db153", "#13a5e7", "#4951cf",
    "#fdb0ce", "#fdca0f", "#eee3ab", "#9fdde8", "#7a96c2", "#cbc2ec", "#a42f3b",
    "#f45b7a", "#c24998", "#81588d", "#bcb0c2", "#dbcfc2",
];

pub fn default_palette() -> Vec<Rgba> {
    DEFAULT_PALETTE
        .iter()
        .filter_map(|hex| Rgba::from_hex(hex).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test_log::test]
    fn parses_with_and_without_hash() {
        assert_eq!(Rgba::from_hex("#FF0000"), Ok(Rgba::rgb(255, 0, 0)));
        assert_eq!(Rgba::from_hex("2db153"), Ok(Rgba::rgb(0x2d, 0xb1, 0x53)));
        assert_eq!(Rgba::from_hex("#00000080"), Ok(Rgba::rgba(0, 0, 0, 0x80)));
    }

    #[test_log::test]
    fn rejects_malformed_hex() {
        assert!(Rgba::from_hex("#FFF").is_err());
        assert!(Rgba::from_hex("#GG0000").is_err());
        assert!(Rgba::from_hex("#ÿÿÿ").is_err());
        assert!(Rgba::from_hex("#+f+f+f").is_err());
        assert!(Rgba::from_hex("##ff0000").is_err());
        assert!(Rgba::from_hex("#-1ff00").is_err());
    }

    #[test_log::test]
    fn display_is_lowercase_hex() {
        assert_eq!(Rgba::rgb(0xED, 0x28, 0x32).to_string(), "#ed2832");
        assert_eq!(Rgba::rgba(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test_log::test]
    fn default_palette_is_complete() {
        assert_eq!(default_palette().len(), DEFAULT_PALETTE.len());
        assert_eq!(default_palette()[0], Rgba::rgb(0, 0, 2));
    }

    #[test_log::test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Rgba::rgb(0x13, 0xa5, 0xe7)).unwrap();
        assert_eq!(json, "\"#13a5e7\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgba::rgb(0x13, 0xa5, 0xe7));
    }
}
