//! Drawing primitives.
//!
//! Every primitive takes any [`Image`]. Filling operations check
//! [`Image::packed_mut`] and write packed bytes directly for bitmaps, RGB565 and
//! RGB888; all other images go through [`Image::set`] one pixel at a time. Both
//! paths produce the same pixels.

mod memset;
mod scroll;

pub use scroll::{scroll_down, scroll_up};

use tracing::trace;

use crate::buffer::{Bitmap, BitmapLayout, Image, Packed, RawMut};
use crate::color::{Bit, Color, PackedColor, Rgb565, Rgb888};
use crate::{Point, Rect};
use memset::{memset, memset_slice};

/// Sets every pixel of the image to `c`.
pub fn fill<I: Image + ?Sized>(img: &mut I, c: Color) {
    match img.packed_mut() {
        Packed::Bitmap(b) => {
            let v = if Bit::from_color(c).is_on() { 0xFF } else { 0x00 };
            memset(b.pix_mut(), v);
        }
        Packed::Rgb565(b) => memset_slice(b.pix_mut(), &Rgb565::from_color(c).0.to_be_bytes()),
        Packed::Rgb888(b) => memset_slice(b.pix_mut(), &Rgb888::from_color(c).to_bytes()),
        Packed::Rgb332(_) | Packed::Rgba4444(_) | Packed::Rgba5551(_) | Packed::Generic => {
            trace!("fill: per-pixel path");
            let r = img.bounds();
            for y in r.min.y..r.max.y {
                for x in r.min.x..r.max.x {
                    img.set(x, y, c);
                }
            }
        }
    }
}

/// Fills the part of `r` that lies inside the image.
///
/// Rectangles with a non-positive width or height, or entirely outside the
/// image, draw nothing.
pub fn fill_rectangle<I: Image + ?Sized>(img: &mut I, r: Rect, c: Color) {
    draw_rectangle(img, r.min.x, r.min.y, r.dx(), r.dy(), c, true);
}

/// Draws the one-pixel outline of `r`, clipped to the image.
///
/// A rectangle one pixel wide or tall is drawn solid.
pub fn rectangle<I: Image + ?Sized>(img: &mut I, r: Rect, c: Color) {
    draw_rectangle(img, r.min.x, r.min.y, r.dx(), r.dy(), c, false);
}

/// Draws a horizontal line of `width` pixels starting at `p`.
pub fn hline<I: Image + ?Sized>(img: &mut I, p: Point, width: i32, c: Color) {
    draw_rectangle(img, p.x, p.y, width, 1, c, false);
}

/// Draws a vertical line of `height` pixels starting at `p`.
pub fn vline<I: Image + ?Sized>(img: &mut I, p: Point, height: i32, c: Color) {
    draw_rectangle(img, p.x, p.y, 1, height, c, false);
}

fn draw_rectangle<I: Image + ?Sized>(
    img: &mut I,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    c: Color,
    fill: bool,
) {
    let r = img.bounds();
    if width < 1 || height < 1 {
        return;
    }
    let (x_end, y_end) = (x.saturating_add(width), y.saturating_add(height));
    if x_end <= r.min.x || y_end <= r.min.y || x >= r.max.x || y >= r.max.y {
        return;
    }

    // Inclusive corners, clamped to the image.
    let xe = (r.max.x - 1).min(x_end - 1);
    let ye = (r.max.y - 1).min(y_end - 1);
    let x = x.max(r.min.x);
    let y = y.max(r.min.y);

    if fill || width == 1 || height == 1 {
        fill_clipped(img, x, y, xe - x + 1, ye - y + 1, c);
    } else {
        fill_clipped(img, x, y, xe - x + 1, 1, c);
        fill_clipped(img, x, y, 1, ye - y + 1, c);
        fill_clipped(img, x, ye, xe - x + 1, 1, c);
        fill_clipped(img, xe, y, 1, ye - y + 1, c);
    }
}

/// Fills a rectangle already known to lie inside the image bounds.
fn fill_clipped<I: Image + ?Sized>(img: &mut I, x: i32, y: i32, width: i32, height: i32, c: Color) {
    if width < 1 || height < 1 {
        return;
    }
    match img.packed_mut() {
        Packed::Bitmap(b) => fill_bitmap(b, x, y, width, height, Bit::from_color(c)),
        Packed::Rgb565(b) => {
            let v = Rgb565::from_color(c).0.to_be_bytes();
            fill_rows(b.raw_mut(), x, y, width, height, &v);
        }
        Packed::Rgb888(b) => {
            let v = Rgb888::from_color(c).to_bytes();
            fill_rows(b.raw_mut(), x, y, width, height, &v);
        }
        Packed::Rgb332(_) | Packed::Rgba4444(_) | Packed::Rgba5551(_) | Packed::Generic => {
            trace!("fill_rectangle: per-pixel path");
            for yy in y..y + height {
                for xx in x..x + width {
                    img.set(xx, yy, c);
                }
            }
        }
    }
}

/// Fills `height` row spans of `width` pixels with a repeated byte pattern.
fn fill_rows(
    RawMut { pix, stride, .. }: RawMut<'_>,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    pattern: &[u8],
) {
    let bpp = pattern.len();
    let span = width as usize * bpp;
    for row in y..y + height {
        let start = row as usize * stride + x as usize * bpp;
        if let Some(bytes) = pix.get_mut(start..start + span) {
            memset_slice(bytes, pattern);
        }
    }
}

fn fill_bitmap(b: &mut Bitmap, x: i32, y: i32, width: i32, height: i32, bit: Bit) {
    let stride = b.stride();
    let layout = b.layout();
    let pix = b.pix_mut();
    let (x, width) = (x as usize, width as usize);
    for row in y as usize..(y + height) as usize {
        match layout {
            BitmapLayout::VerticalLsb => {
                let index = (row >> 3) * stride + x;
                let mask = 1u8 << (row & 7);
                for byte in pix.iter_mut().skip(index).take(width) {
                    set_masked(byte, mask, bit);
                }
            }
            BitmapLayout::HorizontalMsb => {
                let start = row * stride + x;
                fill_bit_span(pix, start, start + width, bit);
            }
        }
    }
}

/// Sets or clears bits `[start, end)` of an MSB-first bit array.
///
/// Whole bytes are written at once; partial bytes at either end are updated
/// through a mask so neighbouring pixels are preserved.
fn fill_bit_span(pix: &mut [u8], start: usize, end: usize, bit: Bit) {
    let mut i = start;
    while i < end {
        let offset = i >> 3;
        let shift = i & 7;
        if shift == 0 && end - i >= 8 {
            let n = (end - i) >> 3;
            let Some(bytes) = pix.get_mut(offset..offset + n) else {
                return;
            };
            memset(bytes, if bit.is_on() { 0xFF } else { 0x00 });
            i += n << 3;
            continue;
        }
        let span = (8 - shift).min(end - i);
        let mask = ((0xFFu32 >> shift) & !(0xFFu32 >> (shift + span))) as u8;
        let Some(byte) = pix.get_mut(offset) else {
            return;
        };
        set_masked(byte, mask, bit);
        i += span;
    }
}

#[inline]
fn set_masked(byte: &mut u8, mask: u8, bit: Bit) {
    if bit.is_on() {
        *byte |= mask;
    } else {
        *byte &= !mask;
    }
}

/// Draws a line from `p0` to `p1`, both endpoints included.
///
/// Integer Bresenham: the axis with the larger delta advances every step and
/// the other advances whenever the accumulated error passes half a step.
pub fn line<I: Image + ?Sized>(img: &mut I, p0: Point, p1: Point, c: Color) {
    let dx = (p1.x as i64 - p0.x as i64).abs();
    let dy = (p1.y as i64 - p0.y as i64).abs();
    let sx = if p0.x <= p1.x { 1 } else { -1 };
    let sy = if p0.y <= p1.y { 1 } else { -1 };
    let (mut x, mut y) = (p0.x, p0.y);

    // Errors are kept doubled so the half-step threshold stays integral.
    if dx > dy {
        let mut err = dx;
        while x != p1.x {
            img.set(x, y, c);
            err -= 2 * dy;
            if err < 0 {
                y += sy;
                err += 2 * dx;
            }
            x += sx;
        }
    } else {
        let mut err = dy;
        while y != p1.y {
            img.set(x, y, c);
            err -= 2 * dx;
            if err < 0 {
                x += sx;
                err += 2 * dy;
            }
            y += sy;
        }
    }
    img.set(x, y, c);
}

/// Draws a circle outline with the midpoint algorithm.
///
/// A radius of 0 plots only the center; a negative radius draws nothing.
/// Circles whose outline cannot reach the image return without iterating.
pub fn circle<I: Image + ?Sized>(img: &mut I, center: Point, radius: i32, c: Color) {
    if radius < 0 || !outline_may_hit(img.bounds(), center, radius) {
        return;
    }
    let (cx, cy) = (center.x as i64, center.y as i64);
    let (mut x, mut y) = (-(radius as i64), 0i64);
    let mut err = 2 - 2 * radius as i64;
    loop {
        set_wide(img, cx - x, cy + y, c);
        set_wide(img, cx - y, cy - x, c);
        set_wide(img, cx + x, cy - y, c);
        set_wide(img, cx + y, cy + x, c);
        let e = err;
        if e > x {
            x += 1;
            err += x * 2 + 1;
        }
        if e <= y {
            y += 1;
            err += y * 2 + 1;
        }
        if x >= 0 {
            break;
        }
    }
}

/// Returns false when every outline pixel is known to miss `bounds`: the
/// circle's box lies outside it, or `bounds` sits inside the ring's hole.
///
/// Outline pixels stay within `radius` of the exact circle in squared
/// distance, so a margin of two pixels on the inner radius is conservative.
fn outline_may_hit(bounds: Rect, center: Point, radius: i32) -> bool {
    if bounds.is_empty() {
        return false;
    }
    let (cx, cy, r) = (center.x as i64, center.y as i64, radius as i64);
    let (x0, y0) = (bounds.min.x as i64, bounds.min.y as i64);
    let (x1, y1) = (bounds.max.x as i64 - 1, bounds.max.y as i64 - 1);
    if cx + r < x0 || cx - r > x1 || cy + r < y0 || cy - r > y1 {
        return false;
    }
    let dx = (x0 - cx).abs().max((x1 - cx).abs()) as i128;
    let dy = (y0 - cy).abs().max((y1 - cy).abs()) as i128;
    let inner = (r - 2).max(0) as i128;
    dx * dx + dy * dy >= inner * inner
}

#[inline]
fn set_wide<I: Image + ?Sized>(img: &mut I, x: i64, y: i64, c: Color) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        img.set(x, y, c);
    }
}

/// Copies every pixel of `src` into `dst` with the source's top-left corner at
/// `at`. Pixels landing outside `dst` are dropped.
pub fn blit<D, S>(dst: &mut D, at: Point, src: &S)
where
    D: Image + ?Sized,
    S: Image + ?Sized,
{
    let sr = src.bounds();
    let target = Rect::with_size(at.x, at.y, sr.dx(), sr.dy()).intersect(&dst.bounds());
    for y in target.min.y..target.max.y {
        for x in target.min.x..target.max.x {
            let c = src.at(x - at.x + sr.min.x, y - at.y + sr.min.y);
            dst.set(x, y, c);
        }
    }
}

/// Paints `c` into `dst` wherever `mask` is lit, with the mask's top-left
/// corner at `at`.
///
/// A mask pixel is lit when its color thresholds to [`Bit::On`], so a
/// [`Bitmap`] glyph works directly as a stencil.
pub fn draw_mask<D, M>(dst: &mut D, at: Point, mask: &M, c: Color)
where
    D: Image + ?Sized,
    M: Image + ?Sized,
{
    let mr = mask.bounds();
    let target = Rect::with_size(at.x, at.y, mr.dx(), mr.dy()).intersect(&dst.bounds());
    for y in target.min.y..target.max.y {
        for x in target.min.x..target.max.x {
            if Bit::from_color(mask.at(x - at.x + mr.min.x, y - at.y + mr.min.y)).is_on() {
                dst.set(x, y, c);
            }
        }
    }
}
