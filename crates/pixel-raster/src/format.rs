//! Pixel format selectors.

use crate::color::{Bit, Color, PackedColor, Rgb332, Rgb565, Rgb888, Rgba4444, Rgba5551};
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Packed pixel encoding of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// 1-bit monochrome, horizontally packed, most significant bit first.
    Mhmsb,
    /// 1-bit monochrome, vertically packed in 8-row pages, least significant bit first.
    Mvlsb,
    /// 8-bit 3-3-2 RGB.
    Rgb332,
    /// 16-bit 5-6-5 RGB, big-endian.
    Rgb565,
    /// 24-bit RGB.
    Rgb888,
    /// 16-bit 4-4-4-4 RGBA, big-endian.
    Rgba4444,
    /// 16-bit 5-5-5-1 RGBA, big-endian.
    Rgba5551,
}

impl Format {
    /// All supported formats in code order.
    pub const ALL: [Format; 7] = [
        Format::Mhmsb,
        Format::Mvlsb,
        Format::Rgb332,
        Format::Rgb565,
        Format::Rgb888,
        Format::Rgba4444,
        Format::Rgba5551,
    ];

    /// Returns the numeric format code. Zero is reserved for "unknown".
    pub fn code(&self) -> u8 {
        match self {
            Format::Mhmsb => 1,
            Format::Mvlsb => 2,
            Format::Rgb332 => 3,
            Format::Rgb565 => 4,
            Format::Rgb888 => 5,
            Format::Rgba4444 => 6,
            Format::Rgba5551 => 7,
        }
    }

    /// Returns true for the 1-bit monochrome formats.
    pub fn is_monochrome(&self) -> bool {
        matches!(self, Format::Mhmsb | Format::Mvlsb)
    }

    pub fn bits_per_pixel(&self) -> usize {
        match self {
            Format::Mhmsb | Format::Mvlsb => 1,
            Format::Rgb332 => 8,
            Format::Rgb565 | Format::Rgba4444 | Format::Rgba5551 => 16,
            Format::Rgb888 => 24,
        }
    }

    /// Returns the row step for a buffer of the given width.
    ///
    /// Monochrome formats count the stride in pixels, everything else in bytes.
    pub fn stride(&self, width: u16) -> usize {
        if self.is_monochrome() {
            width as usize
        } else {
            width as usize * self.bits_per_pixel() / 8
        }
    }

    /// Returns the packed byte length of a `width` x `height` buffer.
    pub fn buffer_len(&self, width: u16, height: u16) -> usize {
        let area = width as usize * height as usize;
        if self.is_monochrome() {
            area.div_ceil(8)
        } else {
            area * self.bits_per_pixel() / 8
        }
    }

    /// Quantizes a color through this format's color model.
    pub fn convert(&self, c: Color) -> Color {
        match self {
            Format::Mhmsb | Format::Mvlsb => Bit::from_color(c).to_color(),
            Format::Rgb332 => Rgb332::from_color(c).to_color(),
            Format::Rgb565 => Rgb565::from_color(c).to_color(),
            Format::Rgb888 => Rgb888::from_color(c).to_color(),
            Format::Rgba4444 => Rgba4444::from_color(c).to_color(),
            Format::Rgba5551 => Rgba5551::from_color(c).to_color(),
        }
    }
}

impl TryFrom<u8> for Format {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        Format::ALL
            .into_iter()
            .find(|f| f.code() == code)
            .ok_or(Error::InvalidFormatCode(code))
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "mhmsb" | "mono-hmsb" | "bitmap-msb" => Ok(Format::Mhmsb),
            "mvlsb" | "mono-vlsb" | "bitmap-lsb" | "bitmap" => Ok(Format::Mvlsb),
            "rgb332" => Ok(Format::Rgb332),
            "rgb565" => Ok(Format::Rgb565),
            "rgb888" => Ok(Format::Rgb888),
            "rgba4444" => Ok(Format::Rgba4444),
            "rgba5551" => Ok(Format::Rgba5551),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Mhmsb => write!(f, "mhmsb"),
            Format::Mvlsb => write!(f, "mvlsb"),
            Format::Rgb332 => write!(f, "rgb332"),
            Format::Rgb565 => write!(f, "rgb565"),
            Format::Rgb888 => write!(f, "rgb888"),
            Format::Rgba4444 => write!(f, "rgba4444"),
            Format::Rgba5551 => write!(f, "rgba5551"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sizes() {
        assert_eq!(Format::Mvlsb.buffer_len(8, 8), 8);
        assert_eq!(Format::Mvlsb.stride(8), 8);
        assert_eq!(Format::Mhmsb.buffer_len(3, 3), 2);
        assert_eq!(Format::Mhmsb.buffer_len(128, 32), 512);
        assert_eq!(Format::Rgb332.buffer_len(10, 4), 40);
        assert_eq!(Format::Rgb565.buffer_len(8, 8), 128);
        assert_eq!(Format::Rgb565.stride(8), 16);
        assert_eq!(Format::Rgb888.buffer_len(128, 32), 12288);
        assert_eq!(Format::Rgb888.stride(128), 384);
        assert_eq!(Format::Rgba4444.stride(5), 10);
        assert_eq!(Format::Rgba5551.buffer_len(5, 2), 20);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("rgb565".parse::<Format>().unwrap(), Format::Rgb565);
        assert_eq!("RGB888".parse::<Format>().unwrap(), Format::Rgb888);
        assert_eq!("mono_vlsb".parse::<Format>().unwrap(), Format::Mvlsb);
        assert_eq!("bitmap".parse::<Format>().unwrap(), Format::Mvlsb);
        assert_eq!(
            "yuv420".parse::<Format>(),
            Err(Error::InvalidFormat("yuv420".to_string()))
        );
    }

    #[test]
    fn test_codes() {
        for format in Format::ALL {
            assert_eq!(Format::try_from(format.code()).unwrap(), format);
            assert_eq!(format.to_string().parse::<Format>().unwrap(), format);
        }
        assert_eq!(Format::try_from(0), Err(Error::InvalidFormatCode(0)));
        assert_eq!(Format::try_from(8), Err(Error::InvalidFormatCode(8)));
    }

    #[test]
    fn test_convert() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(Format::Rgb888.convert(c), c);
        assert_eq!(Format::Mhmsb.convert(c), Color::BLACK);
        assert_eq!(Format::Mvlsb.convert(Color::WHITE), Color::WHITE);
        let q = Format::Rgb565.convert(c);
        assert_eq!(Format::Rgb565.convert(q), q);
    }
}
