//! Page model for cinelist lists.
//!
//! This module describes what each list page offers: its filter controls,
//! its sorts and its default ordering. All types are UI-independent.

mod filters;
mod pages;

pub use filters::{FilterBounds, FilterId, FilterInput};
pub use pages::PageKind;
