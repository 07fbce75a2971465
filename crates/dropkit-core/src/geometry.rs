#![forbid(unsafe_code)]

//! Geometric primitives for pointer hit testing.

/// A rectangle in cell coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Row offset of a point relative to the top edge, if the point is inside.
    #[inline]
    pub const fn row_of(&self, x: u16, y: u16) -> Option<u16> {
        if self.contains(x, y) {
            Some(y - self.y)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert!(!r.contains(5, 5));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::new(0, 0, 0, 5);
        assert!(!r.contains(0, 0));
    }

    #[test]
    fn row_of_reports_relative_row() {
        let r = Rect::new(10, 5, 20, 3);
        assert_eq!(r.row_of(10, 5), Some(0));
        assert_eq!(r.row_of(29, 7), Some(2));
        assert_eq!(r.row_of(29, 8), None);
    }

    #[test]
    fn edges_saturate() {
        let r = Rect::new(u16::MAX - 1, 0, 10, 1);
        assert_eq!(r.right(), u16::MAX);
    }
}
