//! Grid coordinate type and distance metrics.
//!
//! `Coordinate` is a plain `(x, y)` pair of `i32`s.  It carries no notion of
//! which grid it belongs to; bounds checks live on `SpatialGrid`.

/// A cell address on a 2-D integer grid.
///
/// Ordered by `x`, then `y`, so sorted collections of coordinates are
/// column-major and deterministic.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `|x1 - x2| + |y1 - y2|`, the number of 4-connected steps between two
    /// cells on an open grid.  Saturates at `u32::MAX`.
    #[inline]
    pub fn manhattan_distance(self, other: Coordinate) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// Straight-line distance.  Differences are widened to `i64` first so
    /// extreme coordinates cannot overflow.
    #[inline]
    pub fn euclidean_distance(self, other: Coordinate) -> f64 {
        let dx = (self.x as i64 - other.x as i64) as f64;
        let dy = (self.y as i64 - other.y as i64) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// `true` when `other` is exactly one 4-connected step away.
    #[inline]
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// The coordinate shifted by `(dx, dy)`, or `None` on `i32` overflow.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Coordinate> {
        Some(Coordinate {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl From<(i32, i32)> for Coordinate {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
