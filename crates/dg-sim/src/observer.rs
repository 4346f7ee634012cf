//! Session observer trait for progress reporting and data collection.

use dg_core::{Coordinate, DroidId};
use dg_droid::MoveError;

/// Callbacks invoked by [`Session::step`][crate::Session::step] and
/// [`Session::run`][crate::Session::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: arrival printer
///
/// ```rust,ignore
/// struct Arrivals;
///
/// impl SessionObserver for Arrivals {
///     fn on_arrival(&mut self, tick: u64, droid: &DroidId, at: Coordinate) {
///         println!("tick {tick}: {droid} arrived at {at}");
///     }
/// }
/// ```
pub trait SessionObserver {
    /// Called at the very start of each tick, before any droid moves.
    fn on_tick_start(&mut self, _tick: u64) {}

    /// A droid moved one cell onto `to`.
    fn on_step(&mut self, _tick: u64, _droid: &DroidId, _to: Coordinate) {}

    /// A droid's next step was refused; it stays on `at` and retries next
    /// tick.
    fn on_blocked(&mut self, _tick: u64, _droid: &DroidId, _at: Coordinate, _target: Coordinate) {}

    /// A droid took the final step of its route.  Always preceded by
    /// `on_step` for the same cell.
    fn on_arrival(&mut self, _tick: u64, _droid: &DroidId, _at: Coordinate) {}

    /// A droid entered (or was already in) `Error` while stepping.  It takes
    /// no further part in ticks until reset.
    fn on_fault(&mut self, _tick: u64, _droid: &DroidId, _error: &MoveError) {}

    /// Called at the end of each tick.  `moved` is the number of droids that
    /// changed cell this tick.
    fn on_tick_end(&mut self, _tick: u64, _moved: usize) {}

    /// Called once when [`Session::run`][crate::Session::run] stops.
    fn on_run_end(&mut self, _final_tick: u64) {}
}

/// A [`SessionObserver`] that does nothing.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
