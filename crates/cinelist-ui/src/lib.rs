//! Frontend for cinelist list pages.
//!
//! This crate provides the page-facing layer including:
//! - Page bindings (filters, sorts, default order per page)
//! - ListController wiring controls to the engine
//! - Chunked visibility painting
//! - Record sources and plain-text rendering

pub mod controller;
pub mod error;
pub mod model;
pub mod paint;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use controller::ListController;
pub use error::{ControlError, LoadError};
pub use model::{FilterBounds, FilterId, FilterInput, PageKind};
pub use paint::{HiddenSet, VisibilitySink};
pub use render::render_page;
pub use source::{JsonFileSource, RecordSource};
