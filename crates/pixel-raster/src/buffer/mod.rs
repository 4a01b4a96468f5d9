//! Pixel buffers.
//!
//! Every buffer owns a packed byte array, a stride and its bounds, and exposes
//! the common [`Image`] capability. [`Buffer`] is the tagged union over all
//! concrete formats, built from a [`Format`] selector.

mod bitmap;
mod packed;

use crate::color::Color;
use crate::{Error, Format, Rect, Result};

pub use bitmap::{Bitmap, BitmapLayout};
pub use packed::{
    PackedBuffer, PixelCodec, Rgb332Buffer, Rgb565Buffer, Rgb888Buffer, Rgba4444Buffer,
    Rgba5551Buffer,
};

/// Read/write access to a grid of pixels through canonical colors.
pub trait Image {
    /// Returns the pixel bounds.
    fn bounds(&self) -> Rect;

    /// Reads the color at (x, y). Outside the bounds this returns the
    /// implementation's "off" color.
    fn at(&self, x: i32, y: i32) -> Color;

    /// Writes the color at (x, y). Outside the bounds this does nothing.
    fn set(&mut self, x: i32, y: i32, c: Color);

    /// Returns the concrete buffer behind this image, if it has a packed
    /// layout the drawing functions can operate on directly.
    fn packed_mut(&mut self) -> Packed<'_> {
        Packed::Generic
    }
}

/// Typed view of a concrete buffer, used to select drawing fast paths.
#[derive(Debug)]
pub enum Packed<'a> {
    Bitmap(&'a mut Bitmap),
    Rgb332(&'a mut Rgb332Buffer),
    Rgb565(&'a mut Rgb565Buffer),
    Rgb888(&'a mut Rgb888Buffer),
    Rgba4444(&'a mut Rgba4444Buffer),
    Rgba5551(&'a mut Rgba5551Buffer),
    /// No packed layout is known; only [`Image`] methods are available.
    Generic,
}

impl<'a> Packed<'a> {
    /// Returns the raw bytes of the underlying buffer.
    pub fn into_raw(self) -> Option<RawMut<'a>> {
        match self {
            Packed::Bitmap(b) => Some(b.raw_mut()),
            Packed::Rgb332(b) => Some(b.raw_mut()),
            Packed::Rgb565(b) => Some(b.raw_mut()),
            Packed::Rgb888(b) => Some(b.raw_mut()),
            Packed::Rgba4444(b) => Some(b.raw_mut()),
            Packed::Rgba5551(b) => Some(b.raw_mut()),
            Packed::Generic => None,
        }
    }
}

/// Borrowed view of a buffer's packed bytes.
#[derive(Debug, Clone, Copy)]
pub struct Raw<'a> {
    pub pix: &'a [u8],
    pub stride: usize,
    pub rect: Rect,
}

/// Mutable view of a buffer's packed bytes, for format-aware code such as
/// display drivers and effects that work on the encoded values directly.
#[derive(Debug)]
pub struct RawMut<'a> {
    pub pix: &'a mut [u8],
    pub stride: usize,
    pub rect: Rect,
}

/// A buffer in any supported format.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    Bitmap(Bitmap),
    Rgb332(Rgb332Buffer),
    Rgb565(Rgb565Buffer),
    Rgb888(Rgb888Buffer),
    Rgba4444(Rgba4444Buffer),
    Rgba5551(Rgba5551Buffer),
}

macro_rules! dispatch {
    ($buffer:expr, $b:ident => $body:expr) => {
        match $buffer {
            Buffer::Bitmap($b) => $body,
            Buffer::Rgb332($b) => $body,
            Buffer::Rgb565($b) => $body,
            Buffer::Rgb888($b) => $body,
            Buffer::Rgba4444($b) => $body,
            Buffer::Rgba5551($b) => $body,
        }
    };
}

impl Buffer {
    /// Creates a zeroed buffer of the given format.
    pub fn new(width: u16, height: u16, format: Format) -> Self {
        match format {
            Format::Mhmsb => {
                Buffer::Bitmap(Bitmap::with_layout(width, height, BitmapLayout::HorizontalMsb))
            }
            Format::Mvlsb => {
                Buffer::Bitmap(Bitmap::with_layout(width, height, BitmapLayout::VerticalLsb))
            }
            Format::Rgb332 => Buffer::Rgb332(Rgb332Buffer::new(width, height)),
            Format::Rgb565 => Buffer::Rgb565(Rgb565Buffer::new(width, height)),
            Format::Rgb888 => Buffer::Rgb888(Rgb888Buffer::new(width, height)),
            Format::Rgba4444 => Buffer::Rgba4444(Rgba4444Buffer::new(width, height)),
            Format::Rgba5551 => Buffer::Rgba5551(Rgba5551Buffer::new(width, height)),
        }
    }

    /// Creates a buffer from a format name such as `"rgb565"`.
    pub fn from_selector(width: u16, height: u16, selector: &str) -> Result<Self> {
        Ok(Self::new(width, height, selector.parse()?))
    }

    /// Creates a buffer from a numeric format code.
    pub fn from_code(width: u16, height: u16, code: u8) -> Result<Self> {
        Ok(Self::new(width, height, Format::try_from(code)?))
    }

    pub fn format(&self) -> Format {
        dispatch!(self, b => b.format())
    }

    pub fn width(&self) -> u32 {
        self.bounds().dx() as u32
    }

    pub fn height(&self) -> u32 {
        self.bounds().dy() as u32
    }

    pub fn raw(&self) -> Raw<'_> {
        dispatch!(self, b => b.raw())
    }

    pub fn raw_mut(&mut self) -> RawMut<'_> {
        dispatch!(self, b => b.raw_mut())
    }

    /// Replaces the packed bytes with `data`, which must match the buffer length.
    pub fn copy_from_slice(&mut self, data: &[u8]) -> Result<()> {
        let pix = self.raw_mut().pix;
        if data.len() != pix.len() {
            return Err(Error::BufferSize {
                expected: pix.len(),
                actual: data.len(),
            });
        }
        pix.copy_from_slice(data);
        Ok(())
    }

    /// Decodes the buffer to row-major RGBA8 bytes, e.g. for PNG previews.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let r = self.bounds();
        let mut rgba = Vec::with_capacity(r.dx() as usize * r.dy() as usize * 4);
        for y in r.min.y..r.max.y {
            for x in r.min.x..r.max.x {
                rgba.extend_from_slice(&self.at(x, y).to_rgba8());
            }
        }
        rgba
    }
}

impl Image for Buffer {
    fn bounds(&self) -> Rect {
        dispatch!(self, b => b.bounds())
    }

    fn at(&self, x: i32, y: i32) -> Color {
        dispatch!(self, b => b.at(x, y))
    }

    fn set(&mut self, x: i32, y: i32, c: Color) {
        dispatch!(self, b => b.set(x, y, c))
    }

    fn packed_mut(&mut self) -> Packed<'_> {
        dispatch!(self, b => b.packed_mut())
    }
}

impl From<Bitmap> for Buffer {
    fn from(b: Bitmap) -> Self {
        Buffer::Bitmap(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matches_format_table() {
        for format in Format::ALL {
            let b = Buffer::new(10, 6, format);
            assert_eq!(b.format(), format);
            assert_eq!(b.raw().pix.len(), format.buffer_len(10, 6));
            assert_eq!(b.raw().stride, format.stride(10));
            assert_eq!(b.bounds(), Rect::from_size(10, 6));
        }
    }

    #[test]
    fn test_from_selector() {
        let b = Buffer::from_selector(4, 4, "rgb888").unwrap();
        assert!(matches!(b, Buffer::Rgb888(_)));
        let b = Buffer::from_selector(4, 4, "mhmsb").unwrap();
        assert!(matches!(&b, Buffer::Bitmap(bm) if bm.layout() == BitmapLayout::HorizontalMsb));
        assert_eq!(
            Buffer::from_selector(4, 4, "cmyk"),
            Err(Error::InvalidFormat("cmyk".to_string()))
        );
        assert_eq!(Buffer::from_code(4, 4, 0), Err(Error::InvalidFormatCode(0)));
        assert_eq!(Buffer::from_code(4, 4, 4).unwrap().format(), Format::Rgb565);
    }

    #[test]
    fn test_round_trip_through_every_format() {
        let c = Color::rgb(0x40, 0xA0, 0xE0);
        for format in Format::ALL {
            let mut b = Buffer::new(3, 3, format);
            b.set(1, 2, c);
            assert_eq!(b.at(1, 2), format.convert(c), "{}", format);
            // quantized colors are fixed points
            let q = b.at(1, 2);
            b.set(0, 0, q);
            assert_eq!(b.at(0, 0), q, "{}", format);
        }
    }

    #[test]
    fn test_off_color_outside_bounds() {
        for format in Format::ALL {
            let mut b = Buffer::new(4, 4, format);
            let before = b.raw().pix.to_vec();
            for (x, y) in [(-1, -1), (4, 0), (0, 4), (-5, 2)] {
                b.set(x, y, Color::WHITE);
                assert_eq!(b.at(x, y), Color::BLACK, "{}", format);
            }
            assert_eq!(b.raw().pix, &before[..], "{}", format);
        }
    }

    #[test]
    fn test_copy_from_slice() {
        let mut b = Buffer::new(2, 1, Format::Rgb565);
        b.copy_from_slice(&[0x07, 0xE0, 0x00, 0x1F]).unwrap();
        assert_eq!(b.at(0, 0), Color::rgb(0, 0xFF, 0));
        assert_eq!(b.at(1, 0), Color::rgb(0, 0, 0xFF));
        assert_eq!(
            b.copy_from_slice(&[0; 3]),
            Err(Error::BufferSize {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_raw_mut_writes_are_visible() {
        let mut b = Buffer::new(2, 2, Format::Rgb888);
        {
            let raw = b.raw_mut();
            assert_eq!(raw.stride, 6);
            let pix = raw.pix;
            pix[6..9].copy_from_slice(&[0xFF, 0x00, 0x00]);
        }
        assert_eq!(b.at(0, 1), Color::rgb(0xFF, 0, 0));
    }

    #[test]
    fn test_to_rgba8() {
        let mut b = Buffer::new(2, 1, Format::Mhmsb);
        b.set(1, 0, Color::WHITE);
        assert_eq!(b.to_rgba8(), vec![0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    }
}
