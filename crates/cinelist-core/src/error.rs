//! Error types for cinelist.

use thiserror::Error;

/// Engine errors - surfaced to the caller that requested the change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A sort was requested by a name with no registered comparator.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}
