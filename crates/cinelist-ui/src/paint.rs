//! Visibility painting.
//!
//! The engine decides which records are visible; a `VisibilitySink` is
//! whatever shows or hides the rendered rows. Painting walks the whole record
//! list through the chunked scheduler so long lists never block input.

use std::collections::HashSet;

use cinelist_core::Record;
use cinelist_runtime::{ChunkedScheduler, RunOutcome};

/// Receives show/hide calls for rendered rows, keyed by record id.
#[cfg_attr(test, mockall::automock)]
pub trait VisibilitySink {
    fn show(&mut self, id: &str);
    fn hide(&mut self, id: &str);
}

/// Paint `visibility` (parallel to `records`) into `sink`, one slice at a time.
pub async fn paint<S>(
    scheduler: &ChunkedScheduler,
    records: &[Record],
    visibility: &[bool],
    sink: &mut S,
) -> RunOutcome
where
    S: VisibilitySink + ?Sized,
{
    scheduler
        .run(records.iter().zip(visibility), |(record, &visible)| {
            if visible {
                sink.show(&record.id);
            } else {
                sink.hide(&record.id);
            }
        })
        .await
}

/// Sink that remembers which rows are hidden.
#[derive(Debug, Clone, Default)]
pub struct HiddenSet {
    hidden: HashSet<String>,
}

impl HiddenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id)
    }

    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }
}

impl VisibilitySink for HiddenSet {
    fn show(&mut self, id: &str) {
        self.hidden.remove(id);
    }

    fn hide(&mut self, id: &str) {
        self.hidden.insert(id.to_string());
    }
}
