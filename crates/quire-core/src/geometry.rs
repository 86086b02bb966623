#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are in pixels with the origin at the top-left. Values are
//! signed so that scrolled content may sit partially above or left of a field.

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by the given deltas.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// A rectangle for field bounds, scrollbar parts and clip regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has no area (zero or negative extent).
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Whether two rectangles have the same width and height.
    ///
    /// Fields re-wrap on a size change but only redraw on a move.
    #[inline]
    pub const fn same_size(&self, other: &Rect) -> bool {
        self.width == other.width && self.height == other.height
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(Point::new(2, 3)));
        assert!(rect.contains(Point::new(5, 7)));
        assert!(!rect.contains(Point::new(6, 3)));
        assert!(!rect.contains(Point::new(2, 8)));
    }

    #[test]
    fn rect_contains_negative_origin() {
        let rect = Rect::new(-10, -10, 5, 5);
        assert!(rect.contains(Point::new(-10, -6)));
        assert!(!rect.contains(Point::new(-5, -6)));
    }

    #[test]
    fn rect_is_empty() {
        assert!(Rect::new(0, 0, 0, 0).is_empty());
        assert!(Rect::new(5, 5, 0, 10).is_empty());
        assert!(Rect::new(5, 5, 10, -1).is_empty());
        assert!(!Rect::from_size(1, 1).is_empty());
    }

    #[test]
    fn empty_rect_contains_nothing() {
        assert!(!Rect::new(0, 0, 0, 10).contains(Point::new(0, 0)));
        assert!(!Rect::new(0, 0, -5, -5).contains(Point::new(-1, -1)));
    }

    #[test]
    fn rect_same_size_ignores_position() {
        assert!(Rect::new(0, 0, 5, 5).same_size(&Rect::new(9, 9, 5, 5)));
        assert!(!Rect::new(0, 0, 5, 5).same_size(&Rect::new(0, 0, 5, 6)));
    }

    #[test]
    fn rect_right_bottom_saturating() {
        let r = Rect::new(i32::MAX - 5, i32::MAX - 3, 100, 100);
        assert_eq!(r.right(), i32::MAX);
        assert_eq!(r.bottom(), i32::MAX);
    }

    #[test]
    fn point_offset() {
        assert_eq!(Point::new(1, 2).offset(3, -4), Point::new(4, -2));
        assert_eq!(Point::new(i32::MAX, 0).offset(1, 0).x, i32::MAX);
    }
}
