//! Path search trait and default A* implementation.
//!
//! # Pluggability
//!
//! `dg-sim` plans through the [`PathSearch`] trait, so applications can swap
//! in another search (jump-point, flow fields, ...) without touching the
//! session.  The default [`AStarSearch`] is a unit struct: it holds no state,
//! and every per-query structure is local to one call.
//!
//! # Cost model
//!
//! 4-connected moves, unit cost per step.  The heuristic is Euclidean
//! distance, which never exceeds the true step count, so returned routes are
//! shortest.
//!
//! # Tie-breaking
//!
//! Frontier entries are ordered by lowest `f = g + h`, then lowest `h` (the
//! entry closer to the goal), then earliest insertion.  Combined with the
//! fixed neighbour order of [`SpatialGrid::neighbors`] this makes the chosen
//! route a pure function of the grid contents and the two endpoints.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use dg_core::Coordinate;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{SpatialError, SpatialGrid, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered list of cells to visit, excluding the start and ending at the
/// goal.  An empty route means "already there".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    steps: Vec<Coordinate>,
}

impl Route {
    /// Wrap caller-provided steps.  No adjacency check is made here; droids
    /// validate every step as they execute it.
    pub fn new(steps: Vec<Coordinate>) -> Self {
        Self { steps }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn steps(&self) -> &[Coordinate] {
        &self.steps
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if the start and goal are the same cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Final cell, or `None` for the empty route.
    #[inline]
    pub fn goal(&self) -> Option<Coordinate> {
        self.steps.last().copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.steps.iter()
    }

    pub fn into_steps(self) -> Vec<Coordinate> {
        self.steps
    }

    /// `true` if every step is one 4-connected move from the previous one,
    /// the first step being one move from `start`.
    pub fn is_contiguous_from(&self, start: Coordinate) -> bool {
        let mut prev = start;
        self.steps.iter().all(|&c| {
            let ok = prev.is_adjacent(c);
            prev = c;
            ok
        })
    }
}

impl From<Vec<Coordinate>> for Route {
    fn from(steps: Vec<Coordinate>) -> Self {
        Self::new(steps)
    }
}

impl IntoIterator for Route {
    type Item = Coordinate;
    type IntoIter = std::vec::IntoIter<Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

// ── PathSearch trait ──────────────────────────────────────────────────────────

/// Pluggable shortest-path search over a [`SpatialGrid`].
///
/// # Contract
///
/// - Must not mutate the grid (it only receives `&SpatialGrid`).
/// - Must keep no state between calls: two calls with the same grid
///   contents and endpoints return the same route, whatever ran before.
/// - `start == goal` yields an empty route without searching.
/// - An endpoint outside the grid is [`SpatialError::OutOfBounds`], distinct
///   from an unreachable goal ([`SpatialError::NotFound`]).
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so batches of queries can share one
/// search across Rayon worker threads.
pub trait PathSearch: Send + Sync {
    fn find_path(
        &self,
        grid:  &SpatialGrid,
        start: Coordinate,
        goal:  Coordinate,
    ) -> SpatialResult<Route>;
}

// ── AStarSearch ───────────────────────────────────────────────────────────────

/// A* with a Euclidean heuristic over 4-connected walkable cells.
///
/// The start cell itself is not required to be walkable (the searching droid
/// usually occupies it); every other cell on the route, the goal included,
/// must be.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarSearch;

impl PathSearch for AStarSearch {
    fn find_path(
        &self,
        grid:  &SpatialGrid,
        start: Coordinate,
        goal:  Coordinate,
    ) -> SpatialResult<Route> {
        astar(grid, start, goal)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

#[derive(Debug)]
struct FrontierEntry {
    f:    f64,
    h:    f64,
    seq:  u64,
    cell: Coordinate,
}

impl Ord for FrontierEntry {
    /// Reversed so that `BinaryHeap` (a max-heap) pops the lowest `f`, then
    /// the lowest `h`, then the earliest `seq`.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Working state is keyed by cell and grows only with the cells the search
/// touches, never with the grid's dimensions.
fn astar(grid: &SpatialGrid, start: Coordinate, goal: Coordinate) -> SpatialResult<Route> {
    if !grid.is_valid_coordinate(start) {
        return Err(SpatialError::OutOfBounds(start));
    }
    if !grid.is_valid_coordinate(goal) {
        return Err(SpatialError::OutOfBounds(goal));
    }
    if start == goal {
        return Ok(Route::empty());
    }

    // g[v] = best known step count from start to v.
    let mut g: FxHashMap<Coordinate, u32> = FxHashMap::default();
    // prev[v] = cell that reached v.
    let mut prev: FxHashMap<Coordinate, Coordinate> = FxHashMap::default();
    let mut finalized: FxHashSet<Coordinate> = FxHashSet::default();

    let mut frontier: BinaryHeap<FrontierEntry> = BinaryHeap::new();
    let mut seq: u64 = 0;

    g.insert(start, 0);
    let h0 = start.euclidean_distance(goal);
    frontier.push(FrontierEntry { f: h0, h: h0, seq, cell: start });

    while let Some(FrontierEntry { cell, .. }) = frontier.pop() {
        if cell == goal {
            tracing::trace!(%start, %goal, expanded = finalized.len(), "path found");
            return Ok(reconstruct(&prev, start, goal));
        }

        // Stale duplicate of a cell already expanded with a better cost.
        if !finalized.insert(cell) {
            continue;
        }

        let Some(&here) = g.get(&cell) else { continue };
        let tentative = here.saturating_add(1);
        for next in grid.neighbors(cell) {
            if finalized.contains(&next) || !grid.is_walkable(next) {
                continue;
            }
            if g.get(&next).is_none_or(|&known| tentative < known) {
                g.insert(next, tentative);
                prev.insert(next, cell);
                seq += 1;
                let h = next.euclidean_distance(goal);
                frontier.push(FrontierEntry {
                    f: f64::from(tentative) + h,
                    h,
                    seq,
                    cell: next,
                });
            }
        }
    }

    tracing::trace!(%start, %goal, expanded = finalized.len(), "frontier exhausted");
    Err(SpatialError::NotFound { from: start, to: goal })
}

fn reconstruct(prev: &FxHashMap<Coordinate, Coordinate>, start: Coordinate, goal: Coordinate) -> Route {
    let mut steps = Vec::new();
    let mut cur = goal;
    while cur != start {
        steps.push(cur);
        match prev.get(&cur) {
            Some(&p) => cur = p,
            None => break,
        }
    }
    steps.reverse();
    Route::new(steps)
}
