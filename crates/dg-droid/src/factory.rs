//! Droid creation.
//!
//! The factory validates the requested kind and mints a unique id; it never
//! touches the grid.  Claiming the start cell is the caller's job.

use dg_core::{Coordinate, DroidId, DroidKind};

use crate::Droid;

/// Mints droids with ids `"<KIND>-<n>"`, `n` counting from 1 per factory.
///
/// The counter advances only when a droid is actually created, so ids stay
/// dense even when unknown kinds are requested.
#[derive(Debug, Default)]
pub struct DroidFactory {
    created: u32,
}

impl DroidFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a droid from a kind name (case-insensitive).
    ///
    /// Unknown names create nothing and return `None`.
    pub fn create(&mut self, kind: &str, start: Coordinate) -> Option<Droid> {
        match kind.parse::<DroidKind>() {
            Ok(kind) => Some(self.create_kind(kind, start)),
            Err(e) => {
                tracing::debug!(error = %e, "no droid created");
                None
            }
        }
    }

    pub fn create_kind(&mut self, kind: DroidKind, start: Coordinate) -> Droid {
        self.created += 1;
        Droid::new(DroidId::sequenced(kind, self.created), start)
    }

    pub fn worker(&mut self, start: Coordinate) -> Droid {
        self.create_kind(DroidKind::Worker, start)
    }

    pub fn scout(&mut self, start: Coordinate) -> Droid {
        self.create_kind(DroidKind::Scout, start)
    }

    pub fn builder(&mut self, start: Coordinate) -> Droid {
        self.create_kind(DroidKind::Builder, start)
    }

    /// Number of droids created so far.
    pub fn created_count(&self) -> u32 {
        self.created
    }
}
