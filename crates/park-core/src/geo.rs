//! Planar geometry: continuous patron positions and integer ride footprints.
//!
//! The park is a grid of unit cells.  A cell `(cx, cy)` covers every point
//! that rounds to it, so `Point { x: 3.4, y: 7.6 }` lies in cell `(3, 8)`.

/// A continuous 2-D position in cell units.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.  Cheaper than [`distance`](Self::distance)
    /// for threshold checks.
    #[inline]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point { x: self.x + dx, y: self.y + dy }
    }

    /// The grid cell this point falls in.  May be negative or out of bounds.
    #[inline]
    pub fn cell(self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x as f64, y as f64)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// An axis-aligned rectangle of grid cells: columns `x .. x + w`, rows
/// `y .. y + h`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl BBox {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// `true` if both sides are positive.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.w > 0 && self.h > 0
    }

    pub fn center(self) -> Point {
        Point::new(
            self.x as f64 + self.w as f64 / 2.0,
            self.y as f64 + self.h as f64 / 2.0,
        )
    }

    #[inline]
    pub fn contains_point(self, p: Point) -> bool {
        self.inflated_contains(p, 0.0)
    }

    /// Inflate the box by `tol` on every side and test containment
    /// (edges inclusive).
    #[inline]
    pub fn inflated_contains(self, p: Point, tol: f64) -> bool {
        let (x, y) = (self.x as f64, self.y as f64);
        (x - tol) <= p.x
            && p.x <= (x + self.w as f64 + tol)
            && (y - tol) <= p.y
            && p.y <= (y + self.h as f64 + tol)
    }

    /// The queue entrance: horizontally centred, `offset` cells below the
    /// footprint's last row.
    pub fn approach_point(self, offset: f64) -> Point {
        Point::new(
            self.x as f64 + self.w as f64 / 2.0,
            self.y as f64 + self.h as f64 + offset,
        )
    }

    /// `true` if the two footprints share at least one cell.
    pub fn overlaps(self, other: BBox) -> bool {
        let (ax, ay, aw, ah) = (self.x as i64, self.y as i64, self.w as i64, self.h as i64);
        let (bx, by, bw, bh) = (other.x as i64, other.y as i64, other.w as i64, other.h as i64);
        ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah
    }
}
