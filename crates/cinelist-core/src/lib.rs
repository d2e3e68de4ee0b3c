//! Core types for cinelist.
//!
//! This crate contains shared data structures that are used across all cinelist crates:
//! - Record type for reviews, viewings and watchlist titles
//! - Letter grades and their numeric scale
//! - Sort direction
//! - Configuration types
//! - Error types

mod config;
mod direction;
mod error;
mod grade;
mod record;

pub use config::{
    config_dir, config_path, AppConfig, InputConfig, ListConfig, SchedulerConfig,
};
pub use direction::SortDirection;
pub use error::{ConfigError, EngineError};
pub use grade::Grade;
pub use record::Record;
