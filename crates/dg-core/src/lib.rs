//! `dg-core`: foundational types for the `rust_droid` grid simulation.
//!
//! This crate is a dependency of every other `dg-*` crate.  It has no `dg-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`coord`]       | `Coordinate`, Manhattan / Euclidean distance          |
//! | [`ids`]         | `DroidId`, `DroidKind`                                |
//! | [`config`]      | `SessionConfig`                                       |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod coord;
pub mod error;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SessionConfig;
pub use coord::Coordinate;
pub use error::{CoreError, CoreResult};
pub use ids::{DroidId, DroidKind};
pub use rng::SimRng;
