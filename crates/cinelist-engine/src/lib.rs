//! Filter, sort and pagination engine for cinelist.
//!
//! This crate provides the in-memory list engine including:
//! - Named predicate registry with AND composition
//! - Named comparator registry with natural collation
//! - Pagination calculator and page links
//! - `ListEngine`, which composes the three and broadcasts snapshots

pub mod comparator;
pub mod engine;
pub mod pagination;
pub mod predicate;

// Re-export commonly used types
pub use comparator::{Comparator, ComparatorRegistry};
pub use engine::{EnginePhase, ListEngine, ListSnapshot};
pub use pagination::{page_path, paginate, PageLink, Pagination};
pub use predicate::{Predicate, PredicateRegistry};

// Re-export cinelist_core types for convenience
pub use cinelist_core::{EngineError, Record, SortDirection};
