//! Core error types for toolgraph-core.
//!
//! Uses `thiserror` for structured, matchable error variants. The only hard
//! failures in the data model are IR contract violations: malformed
//! documents, empty identifiers and duplicate definitions.

use thiserror::Error;

/// Core errors produced by the toolgraph-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An input, output, computed value or dependency reference has an empty name.
    #[error("empty identifier in {context}")]
    EmptyIdentifier { context: String },

    /// Two inputs share the same id.
    #[error("duplicate input id: '{id}'")]
    DuplicateInput { id: String },

    /// Two outputs share the same id.
    #[error("duplicate output id: '{id}'")]
    DuplicateOutput { id: String },

    /// Two computed definitions share the same name.
    #[error("duplicate computed name: '{name}'")]
    DuplicateComputed { name: String },

    /// The IR document could not be parsed.
    #[error("malformed IR document: {0}")]
    Json(#[from] serde_json::Error),
}
