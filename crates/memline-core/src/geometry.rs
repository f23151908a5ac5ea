#![forbid(unsafe_code)]

//! Geometric primitives in CSS-style pixels.
//!
//! Coordinates are `f64` with the origin at the top-left of whatever element
//! they are relative to (usually the scrollable viewport).

/// A point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A rectangle for anchors, popups, and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Move the rectangle so it lies inside `bounds` shrunk by `margin`.
    ///
    /// If the rectangle is larger than the available space it is pinned to
    /// the top-left corner of that space and keeps its size.
    #[must_use]
    pub fn clamp_within(&self, bounds: Rect, margin: f64) -> Rect {
        let min_x = bounds.x + margin;
        let min_y = bounds.y + margin;
        let max_x = (bounds.right() - margin - self.width).max(min_x);
        let max_y = (bounds.bottom() - margin - self.height).max(min_y);
        Rect {
            x: self.x.clamp(min_x, max_x),
            y: self.y.clamp(min_y, max_y),
            ..*self
        }
    }
}

/// Closed horizontal interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    /// Interval of `width` centered on `center`.
    #[inline]
    pub fn centered(center: f64, width: f64) -> Self {
        Self {
            start: center - width / 2.0,
            end: center + width / 2.0,
        }
    }

    /// Grow by `pad` on both ends.
    #[inline]
    #[must_use]
    pub fn inflate(&self, pad: f64) -> Self {
        Self {
            start: self.start - pad,
            end: self.end + pad,
        }
    }

    /// Whether the two intervals share more than a boundary point.
    #[inline]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length of the interval.
    #[inline]
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the interval has no length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.end > self.start)
    }
}
