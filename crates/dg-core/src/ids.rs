//! Droid identifiers and the closed set of droid kinds.
//!
//! Droid ids are strings of the form `"<KIND>-<n>"` (e.g. `"WORKER-3"`).
//! They are minted by the droid factory; nothing in the core parses them.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Unique (per session) droid identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DroidId(String);

impl DroidId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the canonical `"<KIND>-<seq>"` form.
    pub fn sequenced(kind: DroidKind, seq: u32) -> Self {
        Self(format!("{}-{}", kind.as_str(), seq))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DroidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DroidId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The kinds of droid the factory knows how to build.
///
/// All kinds share the same movement model today; the kind only affects the
/// id prefix.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DroidKind {
    Worker,
    Scout,
    Builder,
}

impl DroidKind {
    pub const ALL: [DroidKind; 3] = [DroidKind::Worker, DroidKind::Scout, DroidKind::Builder];

    /// Upper-case label used as the id prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            DroidKind::Worker  => "WORKER",
            DroidKind::Scout   => "SCOUT",
            DroidKind::Builder => "BUILDER",
        }
    }
}

impl fmt::Display for DroidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DroidKind {
    type Err = CoreError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DroidKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownKind(s.to_owned()))
    }
}
