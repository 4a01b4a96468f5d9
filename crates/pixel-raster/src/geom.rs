//! Integer points and rectangles.

/// A point on the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, `min` inclusive and `max` exclusive.
///
/// Rectangles built with [`Rect::new`] always satisfy `min <= max` on both
/// axes; an empty rectangle has `min == max` on at least one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Creates a rectangle from two corners, swapping coordinates as needed.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Creates a rectangle from an origin and a size.
    ///
    /// Unlike [`Rect::new`] the size is kept as given, so a negative width or
    /// height yields a rectangle that the drawing functions treat as a no-op.
    pub fn with_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            min: Point::new(x, y),
            max: Point::new(x.saturating_add(width), y.saturating_add(height)),
        }
    }

    /// Rectangle anchored at the origin.
    pub fn from_size(width: u16, height: u16) -> Self {
        Self {
            min: Point::default(),
            max: Point::new(width as i32, height as i32),
        }
    }

    pub fn dx(&self) -> i32 {
        self.max.x.saturating_sub(self.min.x)
    }

    pub fn dy(&self) -> i32 {
        self.max.y.saturating_sub(self.min.y)
    }

    /// Returns true if the rectangle contains no pixels.
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Returns true if the point lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.min.x <= x && x < self.max.x && self.min.y <= y && y < self.max.y
    }

    /// Returns the largest rectangle contained by both.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let r = Rect {
            min: Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if r.is_empty() {
            Rect::default()
        } else {
            r
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canonicalizes() {
        let r = Rect::new(5, 7, 1, 2);
        assert_eq!(r.min, Point::new(1, 2));
        assert_eq!(r.max, Point::new(5, 7));
        assert_eq!(r.dx(), 4);
        assert_eq!(r.dy(), 5);
    }

    #[test]
    fn test_contains() {
        let r = Rect::from_size(4, 3);
        assert!(r.contains(0, 0));
        assert!(r.contains(3, 2));
        assert!(!r.contains(4, 0));
        assert!(!r.contains(0, 3));
        assert!(!r.contains(-1, 0));
    }

    #[test]
    fn test_intersect() {
        let a = Rect::from_size(10, 10);
        let b = Rect::with_size(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Rect::new(5, 5, 10, 10));

        let outside = Rect::with_size(20, 20, 5, 5);
        assert!(a.intersect(&outside).is_empty());
    }

    #[test]
    fn test_negative_size_is_empty() {
        assert!(Rect::with_size(3, 3, -2, 4).is_empty());
        assert!(Rect::with_size(3, 3, 0, 4).is_empty());
    }
}
