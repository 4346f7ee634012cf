//! `dg-droid`: droid movement state machine and droid creation.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`state`]   | `MovementState`: `Idle` / `Moving` / `Blocked` / `Error`    |
//! | [`droid`]   | `Droid`: position, state, in-flight route, move commands   |
//! | [`factory`] | `DroidFactory`: kind validation and `"<KIND>-<n>"` ids     |
//! | [`error`]   | `MoveError`, `MoveResult<T>`                                 |
//!
//! # Movement model
//!
//! Droids never own the grid.  Every command borrows the session's
//! [`SpatialGrid`][dg_spatial::SpatialGrid] mutably for its duration and
//! moves by claiming the target cell:
//!
//! 1. release the current cell, enter `Moving`;
//! 2. claim the target;
//! 3. on success the droid stands on the target and is `Idle`;
//! 4. on failure the original cell is re-claimed, the position is
//!    unchanged, and the droid is `Blocked`.
//!
//! A droid's position therefore always names a cell it holds in the grid.
//! Malformed commands (absent or non-adjacent target, absent route) put the
//! droid in `Error`, which only [`Droid::reset`] leaves.

pub mod droid;
pub mod error;
pub mod factory;
pub mod state;

#[cfg(test)]
mod tests;

pub use droid::{Advance, Droid};
pub use error::{MoveError, MoveResult};
pub use factory::DroidFactory;
pub use state::MovementState;
