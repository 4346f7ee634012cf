//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where they
//! need to surface one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown droid kind {0:?}")]
    UnknownKind(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `dg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
