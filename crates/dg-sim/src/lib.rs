//! `dg-sim`: session orchestrator for the rust_droid grid simulation.
//!
//! A [`Session`] owns the one [`SpatialGrid`](dg_spatial::SpatialGrid) and
//! every droid on it.  Droids borrow the grid for the duration of each
//! command, so all claims and releases go through a single `&mut` and are
//! atomic with respect to every other droid.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.max_ticks while any droid has a live route:
//!   for droid in spawn order:
//!     advance one step  → on_step / on_arrival
//!     step refused      → on_blocked  (retried next tick)
//!     malformed step    → on_fault    (droid sits out until reset)
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | [`Session::plan_routes`] runs its queries on Rayon's pool.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dg_core::{Coordinate, DroidKind, SessionConfig};
//! use dg_sim::{NoopObserver, SessionBuilder};
//!
//! let mut session = SessionBuilder::new(SessionConfig::default()).build()?;
//! let id = session.spawn(DroidKind::Worker, Coordinate::new(0, 0))?;
//! session.dispatch(&id, Coordinate::new(5, 5))?;
//! session.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod layout;
pub mod observer;
pub mod session;


pub use builder::SessionBuilder;
pub use error::{SimError, SimResult};
pub use layout::{load_layout_csv, load_layout_reader, Layout};
pub use observer::{NoopObserver, SessionObserver};
pub use session::Session;
