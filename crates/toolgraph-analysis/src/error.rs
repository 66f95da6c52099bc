//! Analysis error types.
//!
//! Only an IR that breaks its structural contract makes analysis fail.
//! Everything else (dangling references, cycles, unsupported patterns) is
//! reported as a [`Warning`](crate::Warning) alongside a complete result.

use toolgraph_core::CoreError;

/// Errors that abort an analysis run.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The IR failed validation before any graph was built.
    #[error("invalid IR: {0}")]
    InvalidIr(#[from] CoreError),
}
