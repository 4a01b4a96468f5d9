//! Whole-buffer scrolling by one stride.

use tracing::trace;

use super::memset::memset;
use crate::buffer::{Image, RawMut};

/// Shifts the packed bytes up by one stride and zeroes the vacated tail.
///
/// For byte-addressed formats this moves the image up one row; for vertically
/// packed bitmaps one stride is a full 8-row page. Images without a packed
/// layout are left untouched.
pub fn scroll_up<I: Image + ?Sized>(img: &mut I) {
    match img.packed_mut().into_raw() {
        Some(RawMut { pix, stride, .. }) => shift_up(pix, stride),
        None => trace!("scroll_up: image has no packed layout"),
    }
}

/// Shifts the packed bytes down by one stride and zeroes the vacated head.
pub fn scroll_down<I: Image + ?Sized>(img: &mut I) {
    match img.packed_mut().into_raw() {
        Some(RawMut { pix, stride, .. }) => shift_down(pix, stride),
        None => trace!("scroll_down: image has no packed layout"),
    }
}

fn shift_up(pix: &mut [u8], stride: usize) {
    let len = pix.len();
    if stride >= len {
        memset(pix, 0);
        return;
    }
    pix.copy_within(stride.., 0);
    memset(&mut pix[len - stride..], 0);
}

fn shift_down(pix: &mut [u8], stride: usize) {
    let len = pix.len();
    if stride >= len {
        memset(pix, 0);
        return;
    }
    pix.copy_within(..len - stride, stride);
    memset(&mut pix[..stride], 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bitmap, Buffer, Color, Format, Rect};

    fn patterned(format: Format, width: u16, height: u16) -> Buffer {
        let mut b = Buffer::new(width, height, format);
        let len = b.raw().pix.len();
        let data: Vec<u8> = (1..=len).map(|i| i as u8).collect();
        b.copy_from_slice(&data).unwrap();
        b
    }

    #[test]
    fn test_scroll_up_moves_bytes_and_zeroes_tail() {
        for format in Format::ALL {
            let mut b = patterned(format, 4, 16);
            let before = b.raw().pix.to_vec();
            let stride = b.raw().stride;
            scroll_up(&mut b);
            let after = b.raw().pix;
            let len = after.len();
            assert_eq!(&after[..len - stride], &before[stride..], "{}", format);
            assert!(after[len - stride..].iter().all(|&v| v == 0), "{}", format);
        }
    }

    #[test]
    fn test_scroll_down_moves_bytes_and_zeroes_head() {
        for format in Format::ALL {
            let mut b = patterned(format, 4, 16);
            let before = b.raw().pix.to_vec();
            let stride = b.raw().stride;
            scroll_down(&mut b);
            let after = b.raw().pix;
            let len = after.len();
            assert_eq!(&after[stride..], &before[..len - stride], "{}", format);
            assert!(after[..stride].iter().all(|&v| v == 0), "{}", format);
        }
    }

    #[test]
    fn test_scroll_up_then_down_loses_edge_row() {
        let mut b = patterned(Format::Rgb565, 3, 4);
        let before = b.raw().pix.to_vec();
        scroll_up(&mut b);
        scroll_down(&mut b);
        let after = b.raw().pix;
        assert_ne!(after, &before[..]);
        assert!(after[..6].iter().all(|&v| v == 0));
        assert_eq!(&after[6..], &before[6..]);
    }

    #[test]
    fn test_scroll_moves_rows() {
        let mut b = Buffer::new(2, 3, Format::Rgb888);
        let red = Color::rgb(0xFF, 0, 0);
        b.set(1, 2, red);
        scroll_up(&mut b);
        assert_eq!(b.at(1, 1), red);
        assert_eq!(b.at(1, 2), Color::BLACK);
        scroll_down(&mut b);
        scroll_down(&mut b);
        assert_eq!(b.at(1, 2), Color::BLACK);
        assert_eq!(b.at(1, 0), Color::BLACK);
    }

    #[test]
    fn test_scroll_stride_past_end_clears() {
        // 4x4 bitmap: stride 4 pixels, but only two bytes of storage.
        let mut b = Bitmap::new(4, 4);
        b.pix_mut().copy_from_slice(&[0xAA, 0x55]);
        scroll_up(&mut b);
        assert_eq!(b.pix(), &[0, 0]);

        b.pix_mut().copy_from_slice(&[0xAA, 0x55]);
        scroll_down(&mut b);
        assert_eq!(b.pix(), &[0, 0]);
    }

    struct Plain(Vec<Color>);

    impl Image for Plain {
        fn bounds(&self) -> Rect {
            Rect::from_size(self.0.len() as u16, 1)
        }

        fn at(&self, x: i32, _y: i32) -> Color {
            self.0.get(x as usize).copied().unwrap_or(Color::BLACK)
        }

        fn set(&mut self, x: i32, _y: i32, c: Color) {
            if let Some(p) = self.0.get_mut(x as usize) {
                *p = c;
            }
        }
    }

    #[test]
    fn test_scroll_ignores_generic_images() {
        let mut img = Plain(vec![Color::WHITE; 3]);
        scroll_up(&mut img);
        scroll_down(&mut img);
        assert_eq!(img.0, vec![Color::WHITE; 3]);
    }
}
