//! The `Droid`: one agent's position, movement state, and in-flight route.

use dg_core::{Coordinate, DroidId};
use dg_spatial::{Route, SpatialGrid};

use crate::{MoveError, MoveResult, MovementState};

/// Outcome of a single [`Droid::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// No route in flight; nothing happened.
    Idle,
    /// Moved one cell; more steps remain.
    Stepped(Coordinate),
    /// Moved onto the final cell of the route; the route is cleared.
    Arrived(Coordinate),
}

/// A route being executed, with the index of the next step to take.
#[derive(Debug, Clone)]
struct InFlight {
    steps: Vec<Coordinate>,
    next:  usize,
}

impl InFlight {
    fn remaining(&self) -> &[Coordinate] {
        self.steps.get(self.next..).unwrap_or(&[])
    }
}

/// A grid agent driven by claim/release against a shared [`SpatialGrid`].
///
/// Construction does not touch the grid: the caller claims the start cell
/// first (see `dg_sim::Session::spawn`).  State is read-only from outside;
/// it changes only as a side effect of the command methods.
#[derive(Debug, Clone)]
pub struct Droid {
    id:       DroidId,
    position: Coordinate,
    state:    MovementState,
    route:    Option<InFlight>,
}

impl Droid {
    pub fn new(id: DroidId, start: Coordinate) -> Self {
        Self {
            id,
            position: start,
            state:    MovementState::Idle,
            route:    None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> &DroidId {
        &self.id
    }

    /// The cell this droid holds.
    #[inline]
    pub fn position(&self) -> Coordinate {
        self.position
    }

    #[inline]
    pub fn state(&self) -> MovementState {
        self.state
    }

    /// Steps of the in-flight route not yet taken.  Empty when idle.
    pub fn pending_steps(&self) -> &[Coordinate] {
        self.route.as_ref().map(InFlight::remaining).unwrap_or(&[])
    }

    #[inline]
    pub fn has_pending_route(&self) -> bool {
        self.route.is_some()
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Relocate to `target` by claiming it, with no adjacency requirement.
    ///
    /// Refused outright in `Error`.  Otherwise any in-flight route is
    /// abandoned.  A target outside the grid is a malformed command and
    /// faults the droid; a target held by an obstacle or another droid
    /// leaves the droid `Blocked` on its original cell.
    pub fn move_to(&mut self, target: Coordinate, grid: &mut SpatialGrid) -> MoveResult<()> {
        if self.state.is_faulted() {
            return Err(MoveError::Faulted(self.id.clone()));
        }
        self.route = None;
        self.step_to(target, grid)
    }

    /// Move to a 4-adjacent cell.
    ///
    /// An absent target, or one not exactly one step away, faults the droid
    /// with [`MoveError::InvalidTarget`].  Otherwise behaves as
    /// [`move_to`](Self::move_to).
    pub fn move_one_step(
        &mut self,
        target: Option<Coordinate>,
        grid:   &mut SpatialGrid,
    ) -> MoveResult<()> {
        match target {
            Some(t) if self.position.is_adjacent(t) => self.move_to(t, grid),
            to => Err(self.fault(MoveError::InvalidTarget { from: self.position, to })),
        }
    }

    /// Walk `route` to the end, one claimed step at a time.
    ///
    /// - `None` faults the droid with [`MoveError::InvalidRoute`] without
    ///   touching the grid.
    /// - `Some` of an empty route succeeds immediately, leaving the droid
    ///   `Idle` where it is.
    /// - The first failing step stops the walk; the droid keeps the state
    ///   that step set (`Blocked` or `Error`) and the untaken steps stay in
    ///   flight for [`resume`](Self::resume).
    pub fn follow_path(&mut self, route: Option<Route>, grid: &mut SpatialGrid) -> MoveResult<()> {
        let Some(route) = route else {
            return Err(self.fault(MoveError::InvalidRoute));
        };
        self.assign(route)?;
        self.drive(grid)
    }

    /// Install `route` as the in-flight route without moving.
    ///
    /// Replaces any previous route.  The droid is `Moving` while a route is
    /// pending and `Idle` if `route` is empty.
    pub fn assign(&mut self, route: Route) -> MoveResult<()> {
        if self.state.is_faulted() {
            return Err(MoveError::Faulted(self.id.clone()));
        }
        if route.is_empty() {
            self.route = None;
            self.state = MovementState::Idle;
        } else {
            self.route = Some(InFlight { steps: route.into_steps(), next: 0 });
            self.state = MovementState::Moving;
        }
        Ok(())
    }

    /// Take the next step of the in-flight route.
    ///
    /// A blocked step keeps the route in flight so the same step is retried
    /// on the next call.  With nothing in flight the droid settles `Idle`.
    pub fn advance(&mut self, grid: &mut SpatialGrid) -> MoveResult<Advance> {
        if self.state.is_faulted() {
            return Err(MoveError::Faulted(self.id.clone()));
        }
        let Some(next) = self.route.as_ref().and_then(|f| f.remaining().first().copied()) else {
            self.route = None;
            self.state = MovementState::Idle;
            return Ok(Advance::Idle);
        };

        self.state = MovementState::Moving;
        if !self.position.is_adjacent(next) {
            return Err(self.fault(MoveError::InvalidTarget { from: self.position, to: Some(next) }));
        }
        self.step_to(next, grid)?;

        let finished = match self.route.as_mut() {
            Some(flight) => {
                flight.next += 1;
                flight.remaining().is_empty()
            }
            None => true,
        };
        if finished {
            self.route = None;
            self.state = MovementState::Idle;
            Ok(Advance::Arrived(next))
        } else {
            self.state = MovementState::Moving;
            Ok(Advance::Stepped(next))
        }
    }

    /// Continue the in-flight route (typically after `Blocked`) to its end.
    ///
    /// With nothing in flight this succeeds without moving and leaves the
    /// droid `Idle`.
    pub fn resume(&mut self, grid: &mut SpatialGrid) -> MoveResult<()> {
        if self.state.is_faulted() {
            return Err(MoveError::Faulted(self.id.clone()));
        }
        self.drive(grid)
    }

    /// Leave `Error` for `Idle`, dropping any in-flight route.
    ///
    /// No-op in every other state; in particular `Blocked` is kept, since it
    /// is cleared by retrying, not by resetting.
    pub fn reset(&mut self) {
        if self.state.is_faulted() {
            self.state = MovementState::Idle;
            self.route = None;
            tracing::debug!(droid = %self.id, "reset");
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Claim-gated relocation shared by direct moves and route steps.
    /// Leaves the in-flight route alone.
    fn step_to(&mut self, target: Coordinate, grid: &mut SpatialGrid) -> MoveResult<()> {
        if !grid.is_valid_coordinate(target) {
            return Err(self.fault(MoveError::InvalidTarget {
                from: self.position,
                to:   Some(target),
            }));
        }

        let from = self.position;
        let held = grid.release(from);
        self.state = MovementState::Moving;

        if grid.claim(target) {
            self.position = target;
            self.state = MovementState::Idle;
            tracing::trace!(droid = %self.id, %from, to = %target, "moved");
            return Ok(());
        }

        // Roll back: the droid never left `from`.
        if held {
            let restored = grid.claim(from);
            debug_assert!(restored, "released cell must be reclaimable");
        }
        self.state = MovementState::Blocked;
        tracing::debug!(droid = %self.id, at = %from, %target, "step blocked");
        Err(MoveError::Blocked { at: from, target })
    }

    fn drive(&mut self, grid: &mut SpatialGrid) -> MoveResult<()> {
        loop {
            match self.advance(grid)? {
                Advance::Stepped(_) => continue,
                Advance::Arrived(_) | Advance::Idle => return Ok(()),
            }
        }
    }

    fn fault(&mut self, err: MoveError) -> MoveError {
        self.state = MovementState::Error;
        tracing::warn!(droid = %self.id, error = %err, "droid faulted");
        err
    }
}

impl std::fmt::Display for Droid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Droid{{id={}, position={}, state={}}}", self.id, self.position, self.state)
    }
}
