//! Byte-aligned pixel buffers (RGB332, RGB565, RGB888, RGBA4444, RGBA5551).

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use super::{Image, Packed, Raw, RawMut};
use crate::color::{Color, PackedColor, Rgb332, Rgb565, Rgb888, Rgba4444, Rgba5551};
use crate::{Format, Rect};

/// A packed color that occupies whole bytes in a buffer.
///
/// Multi-byte values are stored big-endian.
pub trait PixelCodec: PackedColor {
    /// Bytes per pixel.
    const BYTES: usize;

    /// Buffer format using this encoding.
    const FORMAT: Format;

    /// Decodes a pixel from the first `BYTES` bytes of `bytes`.
    fn read(bytes: &[u8]) -> Self;

    /// Encodes a pixel into the first `BYTES` bytes of `bytes`.
    fn write(self, bytes: &mut [u8]);

    /// Wraps a buffer of this encoding in its fast-path view.
    fn packed(buf: &mut PackedBuffer<Self>) -> Packed<'_>;
}

impl PixelCodec for Rgb332 {
    const BYTES: usize = 1;
    const FORMAT: Format = Format::Rgb332;

    fn read(bytes: &[u8]) -> Self {
        Rgb332(bytes[0])
    }

    fn write(self, bytes: &mut [u8]) {
        bytes[0] = self.0;
    }

    fn packed(buf: &mut PackedBuffer<Self>) -> Packed<'_> {
        Packed::Rgb332(buf)
    }
}

impl PixelCodec for Rgb565 {
    const BYTES: usize = 2;
    const FORMAT: Format = Format::Rgb565;

    fn read(bytes: &[u8]) -> Self {
        Rgb565(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn write(self, bytes: &mut [u8]) {
        bytes[..2].copy_from_slice(&self.0.to_be_bytes());
    }

    fn packed(buf: &mut PackedBuffer<Self>) -> Packed<'_> {
        Packed::Rgb565(buf)
    }
}

impl PixelCodec for Rgb888 {
    const BYTES: usize = 3;
    const FORMAT: Format = Format::Rgb888;

    fn read(bytes: &[u8]) -> Self {
        Rgb888 {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
        }
    }

    fn write(self, bytes: &mut [u8]) {
        bytes[..3].copy_from_slice(&self.to_bytes());
    }

    fn packed(buf: &mut PackedBuffer<Self>) -> Packed<'_> {
        Packed::Rgb888(buf)
    }
}

impl PixelCodec for Rgba4444 {
    const BYTES: usize = 2;
    const FORMAT: Format = Format::Rgba4444;

    fn read(bytes: &[u8]) -> Self {
        Rgba4444(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn write(self, bytes: &mut [u8]) {
        bytes[..2].copy_from_slice(&self.0.to_be_bytes());
    }

    fn packed(buf: &mut PackedBuffer<Self>) -> Packed<'_> {
        Packed::Rgba4444(buf)
    }
}

impl PixelCodec for Rgba5551 {
    const BYTES: usize = 2;
    const FORMAT: Format = Format::Rgba5551;

    fn read(bytes: &[u8]) -> Self {
        Rgba5551(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn write(self, bytes: &mut [u8]) {
        bytes[..2].copy_from_slice(&self.0.to_be_bytes());
    }

    fn packed(buf: &mut PackedBuffer<Self>) -> Packed<'_> {
        Packed::Rgba5551(buf)
    }
}

pub type Rgb332Buffer = PackedBuffer<Rgb332>;
pub type Rgb565Buffer = PackedBuffer<Rgb565>;
pub type Rgb888Buffer = PackedBuffer<Rgb888>;
pub type Rgba4444Buffer = PackedBuffer<Rgba4444>;
pub type Rgba5551Buffer = PackedBuffer<Rgba5551>;

/// Buffer of whole-byte pixels, row-major with `stride = width * BYTES`.
pub struct PackedBuffer<P> {
    rect: Rect,
    pix: Vec<u8>,
    stride: usize,
    _pixel: PhantomData<P>,
}

impl<P: PixelCodec> PackedBuffer<P> {
    /// Creates a buffer with every byte zeroed.
    pub fn new(width: u16, height: u16) -> Self {
        let len = P::FORMAT.buffer_len(width, height);
        debug!("Allocated {} buffer {}x{} ({} bytes)", P::FORMAT, width, height, len);
        Self {
            rect: Rect::from_size(width, height),
            pix: vec![0; len],
            stride: P::FORMAT.stride(width),
            _pixel: PhantomData,
        }
    }

    pub fn format(&self) -> Format {
        P::FORMAT
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Row step in bytes.
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

    /// Byte offset of pixel (x, y). The coordinates must lie inside the buffer.
    pub fn offset_of(&self, x: i32, y: i32) -> usize {
        y as usize * self.stride + x as usize * P::BYTES
    }

    /// Reads the packed value at (x, y), or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<P> {
        if !self.rect.contains(x, y) {
            return None;
        }
        let offset = self.offset_of(x, y);
        self.pix.get(offset..offset + P::BYTES).map(P::read)
    }

    /// Writes a packed value at (x, y), ignoring coordinates outside the buffer.
    pub fn set_pixel(&mut self, x: i32, y: i32, p: P) {
        if !self.rect.contains(x, y) {
            return;
        }
        let offset = self.offset_of(x, y);
        if let Some(bytes) = self.pix.get_mut(offset..offset + P::BYTES) {
            p.write(bytes);
        }
    }
}

impl<P: PixelCodec> Image for PackedBuffer<P> {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn at(&self, x: i32, y: i32) -> Color {
        self.pixel(x, y)
            .map(PackedColor::to_color)
            .unwrap_or(Color::BLACK)
    }

    fn set(&mut self, x: i32, y: i32, c: Color) {
        self.set_pixel(x, y, P::from_color(c));
    }

    fn packed_mut(&mut self) -> Packed<'_> {
        P::packed(self)
    }
}

impl<P> Clone for PackedBuffer<P> {
    fn clone(&self) -> Self {
        Self {
            rect: self.rect,
            pix: self.pix.clone(),
            stride: self.stride,
            _pixel: PhantomData,
        }
    }
}

impl<P> PartialEq for PackedBuffer<P> {
    fn eq(&self, other: &Self) -> bool {
        self.rect == other.rect && self.stride == other.stride && self.pix == other.pix
    }
}

impl<P: PixelCodec> fmt::Debug for PackedBuffer<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackedBuffer")
            .field("format", &P::FORMAT)
            .field("rect", &self.rect)
            .field("stride", &self.stride)
            .field("len", &self.pix.len())
            .finish()
    }
}
