//! Packed pixel color types.

use super::lut;
use super::{widen, Bit, Color};

/// A color stored in a fixed number of bits.
pub trait PackedColor: Copy {
    /// Number of significant bits in the packed value.
    const BITS: u32;

    /// Encodes a canonical color, dropping precision below the field widths.
    fn from_color(c: Color) -> Self;

    /// Decodes to a canonical color. Formats without alpha decode as opaque.
    fn to_color(self) -> Color;
}

/// Reduces a 16-bit channel to an N-bit field.
///
/// One-bit fields binarize (any non-zero value is set), 10-bit fields take the
/// top bits directly, and everything else goes through the lookup tables on
/// the high byte.
#[inline]
fn quantize(bits: u32, v: u16) -> u32 {
    match bits {
        1 => (v != 0) as u32,
        10 => (v >> 6) as u32,
        _ => lut::reduce(bits, (v >> 8) as u8) as u32,
    }
}

/// Expands an N-bit field back to a 16-bit channel.
#[inline]
fn dequantize(bits: u32, q: u32) -> u16 {
    match bits {
        1 => {
            if q & 1 != 0 {
                0xFFFF
            } else {
                0
            }
        }
        10 => {
            let q = (q & 0x3FF) as u16;
            q << 6 | q >> 4
        }
        _ => widen(lut::expand(bits, q as u8)),
    }
}

macro_rules! packed_color {
    ($(
        $(#[$meta:meta])*
        $name:ident($repr:ty) { $($ch:ident: $bits:literal @ $shift:literal),+ $(,)? }
    )*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(pub $repr);

        impl PackedColor for $name {
            const BITS: u32 = 0 $(+ $bits)+;

            fn from_color(c: Color) -> Self {
                let mut v = 0u32;
                $(v |= quantize($bits, c.$ch) << $shift;)+
                Self(v as $repr)
            }

            fn to_color(self) -> Color {
                let v = self.0 as u32;
                let mut c = Color::BLACK;
                $(c.$ch = dequantize($bits, (v >> $shift) & ((1 << $bits) - 1));)+
                c
            }
        }

        impl From<Color> for $name {
            fn from(c: Color) -> Self {
                <$name as PackedColor>::from_color(c)
            }
        }

        impl From<$name> for Color {
            fn from(c: $name) -> Self {
                c.to_color()
            }
        }
    )*};
}

packed_color! {
    /// 8-bit 3-3-2 RGB.
    Rgb332(u8) { r: 3 @ 5, g: 3 @ 2, b: 2 @ 0 }

    /// 16-bit 5-6-5 RGB.
    Rgb565(u16) { r: 5 @ 11, g: 6 @ 5, b: 5 @ 0 }

    /// 16-bit 4-4-4-4 RGBA.
    Rgba4444(u16) { r: 4 @ 12, g: 4 @ 8, b: 4 @ 4, a: 4 @ 0 }

    /// 16-bit 5-5-5-1 RGBA with a binary alpha bit.
    Rgba5551(u16) { r: 5 @ 11, g: 5 @ 6, b: 5 @ 1, a: 1 @ 0 }

    /// 16-bit 5-5-5 RGB with an unused low bit.
    Rgbx5551(u16) { r: 5 @ 11, g: 5 @ 6, b: 5 @ 1 }

    /// 8-bit 2-2-2-2 RGBA.
    Rgba2222(u8) { r: 2 @ 6, g: 2 @ 4, b: 2 @ 2, a: 2 @ 0 }

    /// 8-bit 2-2-2-2 ARGB.
    Argb2222(u8) { a: 2 @ 6, r: 2 @ 4, g: 2 @ 2, b: 2 @ 0 }

    /// 11-bit 3-3-2-3 RGBA.
    Rgba3323(u16) { r: 3 @ 8, g: 3 @ 5, b: 2 @ 3, a: 3 @ 0 }

    /// 11-bit 3-3-3-2 ARGB.
    Argb3332(u16) { a: 3 @ 8, r: 3 @ 5, g: 3 @ 2, b: 2 @ 0 }

    /// 16-bit 4-4-4-4 ARGB.
    Argb4444(u16) { a: 4 @ 12, r: 4 @ 8, g: 4 @ 4, b: 4 @ 0 }

    /// 16-bit 1-5-5-5 ARGB with a binary alpha bit.
    Argb1555(u16) { a: 1 @ 15, r: 5 @ 10, g: 5 @ 5, b: 5 @ 0 }

    /// 16-bit 5-5-5 RGB with an unused high bit.
    Xrgb1555(u16) { r: 5 @ 10, g: 5 @ 5, b: 5 @ 0 }

    /// 22-bit 5-6-5-6 RGBA.
    Rgba5656(u32) { r: 5 @ 17, g: 6 @ 11, b: 5 @ 6, a: 6 @ 0 }

    /// 22-bit 6-5-6-5 ARGB.
    Argb6565(u32) { a: 6 @ 16, r: 5 @ 11, g: 6 @ 5, b: 5 @ 0 }

    /// 32-bit 10-10-10-2 RGBA.
    Rgba1010102(u32) { r: 10 @ 22, g: 10 @ 12, b: 10 @ 2, a: 2 @ 0 }

    /// 32-bit 2-10-10-10 ARGB.
    Argb2101010(u32) { a: 2 @ 30, r: 10 @ 20, g: 10 @ 10, b: 10 @ 0 }
}

/// 24-bit RGB, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb888 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb888 {
    /// Returns the channels in memory order.
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl PackedColor for Rgb888 {
    const BITS: u32 = 24;

    fn from_color(c: Color) -> Self {
        let [r, g, b, _] = c.to_rgba8();
        Self { r, g, b }
    }

    fn to_color(self) -> Color {
        Color::rgb(self.r, self.g, self.b)
    }
}

impl From<Color> for Rgb888 {
    fn from(c: Color) -> Self {
        Rgb888::from_color(c)
    }
}

impl PackedColor for Bit {
    const BITS: u32 = 1;

    fn from_color(c: Color) -> Self {
        Bit::from_color(c)
    }

    fn to_color(self) -> Color {
        Bit::to_color(self)
    }
}
