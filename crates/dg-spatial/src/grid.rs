//! The shared occupancy grid.
//!
//! # Cell model
//!
//! A `width × height` grid addresses cells `[0, width) × [0, height)`.  Each
//! valid cell is in exactly one of three conditions:
//!
//! | Condition | Meaning                                   | Set         |
//! |-----------|-------------------------------------------|-------------|
//! | free      | walkable, claimable                       | neither     |
//! | obstacle  | permanently blocked                       | `obstacles` |
//! | occupied  | transiently blocked by a droid            | `occupied`  |
//!
//! A cell is never in both sets: [`SpatialGrid::claim`] refuses obstacles and
//! [`SpatialGrid::add_obstacle`] refuses occupied cells.  Both sets are
//! private, so every mutation goes through those gates.
//!
//! # Ownership
//!
//! The grid is owned by the session.  Droids and searches borrow it per call;
//! `&mut self` on `claim`/`release` makes each claim an indivisible
//! test-and-set for as long as the borrow checker is in charge.

use rustc_hash::FxHashSet;

use dg_core::Coordinate;

use crate::{SpatialError, SpatialResult};

/// 4-connected neighbour offsets in yield order: up, down, right, left.
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Bounded grid of obstacle and occupied cells.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    width:     i32,
    height:    i32,
    obstacles: FxHashSet<Coordinate>,
    occupied:  FxHashSet<Coordinate>,
}

impl SpatialGrid {
    /// Create an empty grid.  Fails with
    /// [`SpatialError::InvalidDimensions`] if either dimension is `<= 0`.
    pub fn new(width: i32, height: i32) -> SpatialResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(SpatialError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            obstacles: FxHashSet::default(),
            occupied:  FxHashSet::default(),
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells.  `u64` holds the product of any two positive `i32`
    /// dimensions.
    #[inline]
    pub fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// `true` iff `0 <= c.x < width` and `0 <= c.y < height`.
    #[inline]
    pub fn is_valid_coordinate(&self, c: Coordinate) -> bool {
        (0..self.width).contains(&c.x) && (0..self.height).contains(&c.y)
    }

    // ── Obstacles ─────────────────────────────────────────────────────────

    /// Mark `c` as an obstacle.  Returns whether it was newly inserted.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::OutOfBounds`] if `c` is outside the grid.
    /// - [`SpatialError::CellOccupied`] if a droid currently holds `c`.
    pub fn add_obstacle(&mut self, c: Coordinate) -> SpatialResult<bool> {
        if !self.is_valid_coordinate(c) {
            return Err(SpatialError::OutOfBounds(c));
        }
        if self.occupied.contains(&c) {
            return Err(SpatialError::CellOccupied(c));
        }
        Ok(self.obstacles.insert(c))
    }

    /// Remove the obstacle at `c`.  Returns whether one was present.
    pub fn remove_obstacle(&mut self, c: Coordinate) -> bool {
        self.obstacles.remove(&c)
    }

    #[inline]
    pub fn is_obstacle(&self, c: Coordinate) -> bool {
        self.obstacles.contains(&c)
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// All obstacle cells in ascending order.
    pub fn obstacles(&self) -> Vec<Coordinate> {
        let mut cells: Vec<Coordinate> = self.obstacles.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    #[inline]
    pub fn is_occupied(&self, c: Coordinate) -> bool {
        self.occupied.contains(&c)
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    /// All occupied cells in ascending order.
    pub fn occupied(&self) -> Vec<Coordinate> {
        let mut cells: Vec<Coordinate> = self.occupied.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Take `c` for a droid.
    ///
    /// Succeeds only if `c` is valid, not an obstacle, and not already
    /// occupied; otherwise returns `false` and changes nothing.  This is the
    /// single gate for "can a droid be here".
    pub fn claim(&mut self, c: Coordinate) -> bool {
        if !self.is_valid_coordinate(c) || self.obstacles.contains(&c) {
            return false;
        }
        self.occupied.insert(c)
    }

    /// Free `c`.  Returns whether it was occupied.
    pub fn release(&mut self, c: Coordinate) -> bool {
        self.occupied.remove(&c)
    }

    /// Valid, not an obstacle, not occupied.
    #[inline]
    pub fn is_walkable(&self, c: Coordinate) -> bool {
        self.is_valid_coordinate(c) && !self.is_obstacle(c) && !self.is_occupied(c)
    }

    // ── Topology ──────────────────────────────────────────────────────────

    /// The valid up/down/right/left neighbours of `c`, in that order.
    ///
    /// Cells outside the grid are skipped, never reported as errors.
    /// Walkability is not checked.
    pub fn neighbors(&self, c: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        DIRECTIONS
            .iter()
            .filter_map(move |&(dx, dy)| c.offset(dx, dy))
            .filter(move |&n| self.is_valid_coordinate(n))
    }
}
