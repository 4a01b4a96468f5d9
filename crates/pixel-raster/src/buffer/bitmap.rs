//! 1-bit monochrome bitmap.

use tracing::debug;

use super::{Image, Packed, Raw, RawMut};
use crate::color::{Bit, Color};
use crate::{Format, Rect};

/// Bit packing order of a [`Bitmap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitmapLayout {
    /// Rows packed left to right, eight pixels per byte, most significant bit first.
    HorizontalMsb,
    /// Columns packed in 8-row pages, one byte per column per page, least
    /// significant bit on top. This is the native layout of SSD1306-style panels.
    #[default]
    VerticalLsb,
}

impl BitmapLayout {
    pub fn format(&self) -> Format {
        match self {
            BitmapLayout::HorizontalMsb => Format::Mhmsb,
            BitmapLayout::VerticalLsb => Format::Mvlsb,
        }
    }
}

/// 1-bit-per-pixel buffer.
///
/// The stride is counted in pixels (it equals the width) and the byte array
/// holds `ceil(width * height / 8)` bytes for either layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    rect: Rect,
    pix: Vec<u8>,
    stride: usize,
    layout: BitmapLayout,
}

impl Bitmap {
    /// Creates a vertically packed bitmap with all pixels off.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_layout(width, height, BitmapLayout::default())
    }

    /// Creates a bitmap with the given packing and all pixels off.
    pub fn with_layout(width: u16, height: u16, layout: BitmapLayout) -> Self {
        let format = layout.format();
        let len = format.buffer_len(width, height);
        debug!("Allocated {} bitmap {}x{} ({} bytes)", format, width, height, len);
        Self {
            rect: Rect::from_size(width, height),
            pix: vec![0; len],
            stride: format.stride(width),
            layout,
        }
    }

    pub fn layout(&self) -> BitmapLayout {
        self.layout
    }

    pub fn format(&self) -> Format {
        self.layout.format()
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Row step in pixels.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the packed bytes.
    pub fn pix(&self) -> &[u8] {
        &self.pix
    }

    /// Returns the packed bytes for direct modification.
    pub fn pix_mut(&mut self) -> &mut [u8] {
        &mut self.pix
    }

    pub fn raw(&self) -> Raw<'_> {
        Raw {
            pix: &self.pix,
            stride: self.stride,
            rect: self.rect,
        }
    }

    pub fn raw_mut(&mut self) -> RawMut<'_> {
        RawMut {
            pix: &mut self.pix,
            stride: self.stride,
            rect: self.rect,
        }
    }

    /// Returns the byte offset and bit mask addressing pixel (x, y).
    ///
    /// The coordinates must be non-negative; the offset may still fall past the
    /// end of the array for vertically packed bitmaps whose height is not a
    /// multiple of 8, which callers treat as out of bounds.
    pub fn pix_offset(&self, x: i32, y: i32) -> (usize, u8) {
        let (x, y) = (x as usize, y as usize);
        match self.layout {
            BitmapLayout::VerticalLsb => ((y >> 3) * self.stride + x, 1 << (y & 7)),
            BitmapLayout::HorizontalMsb => {
                let i = y * self.stride + x;
                (i >> 3, 0x80 >> (i & 7))
            }
        }
    }

    /// Reads a pixel, returning Off outside the bitmap.
    pub fn bit(&self, x: i32, y: i32) -> Bit {
        if !self.rect.contains(x, y) {
            return Bit::Off;
        }
        let (offset, mask) = self.pix_offset(x, y);
        match self.pix.get(offset) {
            Some(byte) => Bit::from(byte & mask != 0),
            None => Bit::Off,
        }
    }

    /// Writes a pixel, ignoring coordinates outside the bitmap.
    pub fn set_bit(&mut self, x: i32, y: i32, bit: Bit) {
        if !self.rect.contains(x, y) {
            return;
        }
        let (offset, mask) = self.pix_offset(x, y);
        if let Some(byte) = self.pix.get_mut(offset) {
            if bit.is_on() {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
    }
}

impl Image for Bitmap {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn at(&self, x: i32, y: i32) -> Color {
        self.bit(x, y).to_color()
    }

    fn set(&mut self, x: i32, y: i32, c: Color) {
        self.set_bit(x, y, Bit::from_color(c));
    }

    fn packed_mut(&mut self) -> Packed<'_> {
        Packed::Bitmap(self)
    }
}
