//! Canonical color and conversions to packed pixel representations.
//!
//! [`Color`] is the interchange type between buffers and callers: four
//! straight (non-premultiplied) channels in the 16-bit range. Every packed type
//! implements [`PackedColor`] to map to and from it.

pub mod lut;
mod packed;

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

pub use packed::{
    Argb1555, Argb2101010, Argb2222, Argb3332, Argb4444, Argb6565, PackedColor, Rgb332, Rgb565,
    Rgb888, Rgba1010102, Rgba2222, Rgba3323, Rgba4444, Rgba5551, Rgba5656, Rgbx5551, Xrgb1555,
};

/// Canonical RGBA color with 16-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 0xFFFF);
    pub const WHITE: Color = Color::new(0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    /// Creates a color from 16-bit channels.
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    /// Creates a color from 8-bit channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: widen(r),
            g: widen(g),
            b: widen(b),
            a: widen(a),
        }
    }

    /// Returns the 8-bit channels `[r, g, b, a]`.
    pub const fn to_rgba8(self) -> [u8; 4] {
        [
            (self.r >> 8) as u8,
            (self.g >> 8) as u8,
            (self.b >> 8) as u8,
            (self.a >> 8) as u8,
        ]
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`, with or without the leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(Error::InvalidColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| Error::InvalidColor(hex.to_string()))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 0xFF };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

/// Replicates an 8-bit channel into 16 bits (`0xAB` -> `0xABAB`).
#[inline]
pub(crate) const fn widen(v: u8) -> u16 {
    (v as u16) << 8 | v as u16
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }
}

/// A 1-bit monochrome color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bit {
    #[default]
    Off,
    On,
}

impl Bit {
    /// Thresholds a color on its BT.601 luma.
    ///
    /// The weights sum to 65536, so the weighted sum of 16-bit channels shifted
    /// right by 24 is an 8-bit luma; anything at or above 0x80 is On.
    pub fn from_color(c: Color) -> Bit {
        let y = (19595 * c.r as u32 + 38470 * c.g as u32 + 7471 * c.b as u32 + 16384) >> 24;
        Bit::from(y >= 0x80)
    }

    /// On decodes to opaque white, Off to opaque black.
    pub fn to_color(self) -> Color {
        match self {
            Bit::On => Color::WHITE,
            Bit::Off => Color::BLACK,
        }
    }

    pub fn is_on(self) -> bool {
        self == Bit::On
    }
}

impl From<bool> for Bit {
    fn from(on: bool) -> Self {
        if on {
            Bit::On
        } else {
            Bit::Off
        }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit.is_on()
    }
}

/// Luma threshold conversion of a canonical color.
pub fn to_bit(c: Color) -> Bit {
    Bit::from_color(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_widens_channels() {
        let c = Color::rgb(0xFF, 0x7F, 0x00);
        assert_eq!(c, Color::new(0xFFFF, 0x7F7F, 0x0000, 0xFFFF));
        assert_eq!(c.to_rgba8(), [0xFF, 0x7F, 0x00, 0xFF]);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#FF0000").unwrap(), Color::rgb(0xFF, 0, 0));
        assert_eq!(Color::from_hex("00ff00").unwrap(), Color::rgb(0, 0xFF, 0));
        assert_eq!(
            Color::from_hex("#10203040").unwrap(),
            Color::rgba(0x10, 0x20, 0x30, 0x40)
        );
        assert_eq!(
            "#12345".parse::<Color>(),
            Err(Error::InvalidColor("#12345".to_string()))
        );
        assert!(Color::from_hex("#GG0000").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::rgb(0xAB, 0xCD, 0xEF).to_string(), "#ABCDEF");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn test_bit_threshold() {
        assert_eq!(to_bit(Color::WHITE), Bit::On);
        assert_eq!(to_bit(Color::BLACK), Bit::Off);
        assert_eq!(to_bit(Color::rgb(0x80, 0x80, 0x80)), Bit::On);
        assert_eq!(to_bit(Color::rgb(0x7F, 0x7F, 0x7F)), Bit::Off);
        // Pure blue is dark, pure green is bright.
        assert_eq!(to_bit(Color::rgb(0, 0, 0xFF)), Bit::Off);
        assert_eq!(to_bit(Color::rgb(0, 0xFF, 0)), Bit::On);
    }

    #[test]
    fn test_bit_ignores_alpha() {
        assert_eq!(to_bit(Color::new(0xFFFF, 0xFFFF, 0xFFFF, 0)), Bit::On);
        assert_eq!(to_bit(Color::TRANSPARENT), Bit::Off);
    }

    #[test]
    fn test_bit_to_color() {
        assert_eq!(Bit::On.to_color(), Color::WHITE);
        assert_eq!(Bit::Off.to_color(), Color::BLACK);
        assert_eq!(Bit::from_color(Bit::On.to_color()), Bit::On);
        assert!(bool::from(Bit::On));
        assert_eq!(Bit::from(false), Bit::Off);
    }
}
