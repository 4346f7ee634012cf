//! The `Session` struct and its tick loop.

use dg_core::{Coordinate, DroidId, DroidKind, SessionConfig};
use dg_droid::{Advance, Droid, DroidFactory, MoveError, MoveResult};
use dg_spatial::{AStarSearch, PathSearch, Route, SpatialGrid, SpatialResult};

use crate::{SessionObserver, SimError, SimResult};

/// Owner of the grid, the droids on it, and the search used to route them.
///
/// Every droid in a session holds exactly one claimed cell: spawning claims
/// it, despawning releases it, and movement only ever trades one claim for
/// another.  Create via [`SessionBuilder`][crate::SessionBuilder].
#[derive(Debug)]
pub struct Session<S: PathSearch = AStarSearch> {
    pub(crate) config:  SessionConfig,
    pub(crate) grid:    SpatialGrid,
    /// Spawn order; the tick loop advances droids in this order.
    pub(crate) droids:  Vec<Droid>,
    pub(crate) factory: DroidFactory,
    pub(crate) search:  S,
    pub(crate) tick:    u64,
}

impl<S: PathSearch> Session<S> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read-only view of the grid.  Mutation goes through the session so the
    /// one-claim-per-droid invariant holds.
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Ticks stepped so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn droids(&self) -> &[Droid] {
        &self.droids
    }

    pub fn droid(&self, id: &DroidId) -> Option<&Droid> {
        self.droids.iter().find(|d| d.id() == id)
    }

    /// Whether any droid still has steps to take and can take them.
    pub fn has_active_routes(&self) -> bool {
        self.droids
            .iter()
            .any(|d| d.has_pending_route() && !d.state().is_faulted())
    }

    // ── Grid edits ────────────────────────────────────────────────────────

    /// Place an obstacle.  Fails on a cell a droid is standing on.
    pub fn add_obstacle(&mut self, c: Coordinate) -> SimResult<bool> {
        Ok(self.grid.add_obstacle(c)?)
    }

    pub fn remove_obstacle(&mut self, c: Coordinate) -> bool {
        self.grid.remove_obstacle(c)
    }

    // ── Droid lifecycle ───────────────────────────────────────────────────

    /// Create a droid of `kind` and claim `start` for it.
    ///
    /// The id is only minted once the claim succeeds, so a refused spawn
    /// does not consume a sequence number.
    pub fn spawn(&mut self, kind: DroidKind, start: Coordinate) -> SimResult<DroidId> {
        if !self.grid.is_valid_coordinate(start) {
            return Err(dg_spatial::SpatialError::OutOfBounds(start).into());
        }
        if !self.grid.claim(start) {
            return Err(SimError::SpawnBlocked(start));
        }
        let droid = self.factory.create_kind(kind, start);
        let id = droid.id().clone();
        tracing::info!(droid = %id, at = %start, "spawned");
        self.droids.push(droid);
        Ok(id)
    }

    /// Like [`spawn`](Self::spawn) with a kind name.  Unknown names spawn
    /// nothing and return `Ok(None)`.
    pub fn spawn_named(&mut self, kind: &str, start: Coordinate) -> SimResult<Option<DroidId>> {
        match kind.parse::<DroidKind>() {
            Ok(kind) => self.spawn(kind, start).map(Some),
            Err(e) => {
                tracing::debug!(error = %e, "nothing spawned");
                Ok(None)
            }
        }
    }

    /// Remove a droid and release its cell.
    pub fn despawn(&mut self, id: &DroidId) -> SimResult<Droid> {
        let idx = self.index_of(id)?;
        let droid = self.droids.remove(idx);
        self.grid.release(droid.position());
        tracing::info!(droid = %id, at = %droid.position(), "despawned");
        Ok(droid)
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Shortest route from `start` to `goal` on the current grid.
    pub fn find_path(&self, start: Coordinate, goal: Coordinate) -> SimResult<Route> {
        Ok(self.search.find_path(&self.grid, start, goal)?)
    }

    /// Answer a batch of independent route queries against the current grid.
    ///
    /// Results are in query order.  With the `parallel` feature the queries
    /// run on Rayon's thread pool.
    pub fn plan_routes(&self, queries: &[(Coordinate, Coordinate)]) -> Vec<SpatialResult<Route>> {
        let grid = &self.grid;
        let search = &self.search;

        #[cfg(not(feature = "parallel"))]
        {
            queries
                .iter()
                .map(|&(start, goal)| search.find_path(grid, start, goal))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            queries
                .par_iter()
                .map(|&(start, goal)| search.find_path(grid, start, goal))
                .collect()
        }
    }

    /// Plan from the droid's cell to `goal` and walk the whole route now.
    ///
    /// Returns the planned route.  A blocked step leaves the droid
    /// `Blocked` with the rest of the route in flight, reported as
    /// [`SimError::Move`].
    pub fn navigate(&mut self, id: &DroidId, goal: Coordinate) -> SimResult<Route> {
        let idx = self.index_of(id)?;
        let route = self.plan_for(idx, goal)?;
        self.droids[idx].follow_path(Some(route.clone()), &mut self.grid)?;
        Ok(route)
    }

    /// Plan from the droid's cell to `goal` and hand the route to the droid
    /// without moving.  The tick loop walks it.
    pub fn dispatch(&mut self, id: &DroidId, goal: Coordinate) -> SimResult<Route> {
        let idx = self.index_of(id)?;
        let route = self.plan_for(idx, goal)?;
        self.droids[idx].assign(route.clone())?;
        Ok(route)
    }

    /// Run one command against a droid with the grid lent to it.
    ///
    /// ```rust,ignore
    /// session.command(&id, |droid, grid| droid.move_one_step(Some(next), grid))?;
    /// ```
    pub fn command<T>(
        &mut self,
        id: &DroidId,
        f:  impl FnOnce(&mut Droid, &mut SpatialGrid) -> MoveResult<T>,
    ) -> SimResult<T> {
        let idx = self.index_of(id)?;
        Ok(f(&mut self.droids[idx], &mut self.grid)?)
    }

    /// Continue a droid's in-flight route to its end.
    pub fn resume(&mut self, id: &DroidId) -> SimResult<()> {
        self.command(id, |droid, grid| droid.resume(grid))
    }

    /// Clear a droid's `Error` state.
    pub fn reset(&mut self, id: &DroidId) -> SimResult<()> {
        let idx = self.index_of(id)?;
        self.droids[idx].reset();
        Ok(())
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance every droid with a pending route by at most one cell, in
    /// spawn order.  Returns the number of droids that moved.
    ///
    /// Earlier droids vacate cells before later ones try to enter them, so a
    /// queue of droids following each other all move in the same tick.
    pub fn step<O: SessionObserver>(&mut self, observer: &mut O) -> usize {
        let now = self.tick;
        observer.on_tick_start(now);

        let mut moved = 0;
        for droid in &mut self.droids {
            if !droid.has_pending_route() || droid.state().is_faulted() {
                continue;
            }
            match droid.advance(&mut self.grid) {
                Ok(Advance::Stepped(to)) => {
                    moved += 1;
                    observer.on_step(now, droid.id(), to);
                }
                Ok(Advance::Arrived(at)) => {
                    moved += 1;
                    observer.on_step(now, droid.id(), at);
                    observer.on_arrival(now, droid.id(), at);
                }
                Ok(Advance::Idle) => {}
                Err(MoveError::Blocked { at, target }) => {
                    observer.on_blocked(now, droid.id(), at, target);
                }
                Err(e) => observer.on_fault(now, droid.id(), &e),
            }
        }

        observer.on_tick_end(now, moved);
        self.tick += 1;
        moved
    }

    /// Step until no droid has a live route or `config.max_ticks` total
    /// ticks have elapsed.  Returns the number of ticks stepped by this call.
    ///
    /// Droids that stay blocked keep the loop alive, so a deadlock runs to
    /// the tick cap.
    pub fn run<O: SessionObserver>(&mut self, observer: &mut O) -> u64 {
        let first = self.tick;
        while self.tick < self.config.max_ticks && self.has_active_routes() {
            self.step(observer);
        }
        observer.on_run_end(self.tick);
        tracing::info!(ticks = self.tick - first, final_tick = self.tick, "run finished");
        self.tick - first
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn index_of(&self, id: &DroidId) -> SimResult<usize> {
        self.droids
            .iter()
            .position(|d| d.id() == id)
            .ok_or_else(|| SimError::UnknownDroid(id.clone()))
    }

    fn plan_for(&self, idx: usize, goal: Coordinate) -> SimResult<Route> {
        let droid = &self.droids[idx];
        let route = self.search.find_path(&self.grid, droid.position(), goal)?;
        tracing::debug!(droid = %droid.id(), from = %droid.position(), to = %goal, steps = route.len(), "route planned");
        Ok(route)
    }
}
