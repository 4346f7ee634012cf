//! `dg-spatial`: occupancy grid, cell claiming, and path search.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`grid`]   | `SpatialGrid`: bounds, obstacles, occupancy, neighbours     |
//! | [`search`] | `PathSearch` trait, `Route`, `AStarSearch`                   |
//! | [`error`]  | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod search;


pub use error::{SpatialError, SpatialResult};
pub use grid::SpatialGrid;
pub use search::{AStarSearch, PathSearch, Route};
