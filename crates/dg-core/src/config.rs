//! Session configuration.

use crate::{CoreError, CoreResult};

/// Top-level session configuration.
///
/// Typically loaded from a JSON file by the application crate (enable the
/// `serde` feature) and handed to `dg_sim::SessionBuilder`.  Missing fields
/// fall back to [`SessionConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Grid columns.  Valid x range is `0..width`.
    pub width: i32,

    /// Grid rows.  Valid y range is `0..height`.
    pub height: i32,

    /// Master RNG seed.  The same seed always scatters the same obstacles.
    pub seed: u64,

    /// Number of obstacle cells to scatter at random when the session is
    /// built, on top of any explicit layout.
    pub random_obstacles: u32,

    /// Upper bound on ticks for `Session::run`.  The core has no notion of a
    /// timeout; this cap is the caller-side bound.
    pub max_ticks: u64,
}

impl SessionConfig {
    /// Total number of cells, or `0` for non-positive dimensions.
    pub fn cell_count(&self) -> u64 {
        if self.width <= 0 || self.height <= 0 {
            return 0;
        }
        self.width as u64 * self.height as u64
    }

    /// Reject configurations no session could be built from.
    pub fn validate(&self) -> CoreResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(CoreError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if u64::from(self.random_obstacles) >= self.cell_count() {
            return Err(CoreError::Config(format!(
                "{} random obstacles leave no free cell on a {}x{} grid",
                self.random_obstacles, self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width:            16,
            height:           16,
            seed:             42,
            random_obstacles: 0,
            max_ticks:        1_000,
        }
    }
}
