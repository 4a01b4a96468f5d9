//! Pixel Raster
//!
//! Packed pixel buffers, lossless color conversion and drawing primitives for
//! memory-constrained displays (1-bit monochrome panels, RGB332/RGB565/RGB888
//! TFTs and 16-bit RGBA surfaces).
//!
//! Buffers own their packed bytes; drawing operations take any [`Image`] and use a
//! bulk-memory fast path when the concrete encoding is known, falling back to
//! per-pixel [`Image::set`] calls otherwise.

pub mod buffer;
pub mod color;
pub mod draw;
pub mod error;
pub mod format;
pub mod geom;

pub use buffer::{
    Bitmap, BitmapLayout, Buffer, Image, Packed, PackedBuffer, Raw, RawMut, Rgb332Buffer,
    Rgb565Buffer, Rgb888Buffer, Rgba4444Buffer, Rgba5551Buffer,
};
pub use color::{Bit, Color, PackedColor};
pub use error::{Error, Result};
pub use format::Format;
pub use geom::{Point, Rect};
