//! Snapshot broadcasting.
//!
//! Mutation = notification: every engine operation that changes what is shown
//! publishes a fresh [`ListSnapshot`]. Subscribers always see the latest one.

use serde::Serialize;
use tokio::sync::watch;

use crate::pagination::Pagination;

/// Render-ready view of the engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSnapshot {
    /// Number of records passing every filter.
    pub visible_count: usize,
    /// Number of records the engine was given.
    pub total_count: usize,
    /// Name of the active sort, if any.
    pub sort: Option<String>,
    pub pagination: Pagination,
    /// Indices into the record list for the current page, in display order.
    pub page_indices: Vec<usize>,
}

/// Holds the watch channel the engine publishes into.
pub(crate) struct SnapshotChannel {
    tx: watch::Sender<ListSnapshot>,
    rx: watch::Receiver<ListSnapshot>,
}

impl SnapshotChannel {
    pub(crate) fn new(initial: ListSnapshot) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self { tx, rx }
    }

    /// Publish a snapshot, skipping the send if nothing changed.
    pub(crate) fn publish(&self, snapshot: ListSnapshot) {
        self.tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.rx.clone()
    }
}
