//! CSV layout loader.
//!
//! # CSV format
//!
//! One row per cell of interest.  Rows are applied in file order.
//!
//! ```csv
//! cell,x,y
//! obstacle,3,0
//! obstacle,3,1
//! worker,0,0
//! scout,7,2
//! ```
//!
//! **`cell`** field (case-insensitive):
//!
//! | Value                          | Meaning                              |
//! |--------------------------------|--------------------------------------|
//! | `obstacle`                     | Permanent obstacle at `(x, y)`       |
//! | `worker` / `scout` / `builder` | Spawn a droid of that kind at `(x, y)` |
//!
//! Bounds are not checked here; [`SessionBuilder`](crate::SessionBuilder)
//! rejects cells outside the configured grid.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use dg_core::{Coordinate, DroidKind};

use crate::{SimError, SimResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LayoutRecord {
    cell: String,
    x:    i32,
    y:    i32,
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Static grid contents applied when a session is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub obstacles: Vec<Coordinate>,
    /// Droids to spawn, in order.
    pub spawns: Vec<(DroidKind, Coordinate)>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn obstacle(mut self, c: Coordinate) -> Self {
        self.obstacles.push(c);
        self
    }

    pub fn spawn(mut self, kind: DroidKind, c: Coordinate) -> Self {
        self.spawns.push((kind, c));
        self
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`Layout`] from a CSV file.
pub fn load_layout_csv(path: &Path) -> SimResult<Layout> {
    let file = std::fs::File::open(path)?;
    load_layout_reader(file)
}

/// Like [`load_layout_csv`] but accepts any `Read` source.
pub fn load_layout_reader<R: Read>(reader: R) -> SimResult<Layout> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut layout = Layout::default();

    for (row, result) in csv_reader.deserialize::<LayoutRecord>().enumerate() {
        let record = result.map_err(|e| SimError::Layout(e.to_string()))?;
        let at = Coordinate::new(record.x, record.y);

        if record.cell.eq_ignore_ascii_case("obstacle") {
            layout.obstacles.push(at);
            continue;
        }
        let kind = record.cell.parse::<DroidKind>().map_err(|e| {
            // Header is line 1.
            SimError::Layout(format!("line {}: {e}", row + 2))
        })?;
        layout.spawns.push((kind, at));
    }

    tracing::debug!(
        obstacles = layout.obstacles.len(),
        spawns = layout.spawns.len(),
        "layout loaded"
    );
    Ok(layout)
}
