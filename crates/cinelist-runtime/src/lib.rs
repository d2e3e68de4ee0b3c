//! Cooperative scheduling for cinelist.
//!
//! Everything here runs on the caller's tokio runtime and never blocks it:
//! - `Debouncer` collapses bursts of input into one trailing call
//! - `ChunkedScheduler` visits large collections in time-bounded slices,
//!   yielding between slices; a newer run cancels an older one

mod debounce;
mod scheduler;

pub use debounce::Debouncer;
pub use scheduler::{ChunkedScheduler, RunOutcome};
