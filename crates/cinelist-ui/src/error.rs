//! Error types for the cinelist frontend.

use thiserror::Error;

/// Failure loading a record list.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read records: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Loader task failed: {0}")]
    Task(String),
}

/// A filter control could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("Filter '{filter}' is not shown on the {page} page")]
    NotOnPage { filter: &'static str, page: String },

    #[error("Filter '{filter}' expects {expected} input")]
    InputMismatch {
        filter: &'static str,
        expected: &'static str,
    },
}
