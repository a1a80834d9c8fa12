//! Cell geometry used for layout resolution and hit-testing.

use serde::{Deserialize, Serialize};

/// A terminal cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    pub fn delta_from(&self, other: Point) -> (i32, i32) {
        (self.x - other.x, self.y - other.y)
    }
}

/// An axis-aligned rectangle of cells. Width/height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Builds the rectangle spanned by two corner cells, both inclusive.
    ///
    /// Returns `None` unless both corners are known.
    pub fn from_between_points(a: Option<Point>, b: Option<Point>) -> Option<Self> {
        let (a, b) = (a?, b?);
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Some(Self::new(
            x,
            y,
            (a.x - b.x).abs() + 1,
            (a.y - b.y).abs() + 1,
        ))
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// The bottom-right cell, used as the resize handle.
    pub fn lower_right(&self) -> Option<Point> {
        if self.is_empty() {
            None
        } else {
            Some(Point::new(self.right() - 1, self.bottom() - 1))
        }
    }

    /// True when `p` lies on the outermost ring of cells.
    pub fn is_on_border(&self, p: Point) -> bool {
        self.contains(p)
            && (p.x == self.x || p.y == self.y || p.x == self.right() - 1 || p.y == self.bottom() - 1)
    }

    /// The rectangle shrunk by `n` cells on every side.
    pub fn inset(&self, n: i32) -> Rect {
        Rect::new(
            self.x + n,
            self.y + n,
            self.width - 2 * n,
            self.height - 2 * n,
        )
    }
}
