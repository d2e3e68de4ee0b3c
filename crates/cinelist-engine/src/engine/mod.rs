//! List Engine
//!
//! The ListEngine owns one immutable record list plus the mutable UI state
//! that shapes it: the active filters, the active sort and the current page.
//!
//! ## Recompute Flow
//!
//! ```text
//!   set_filter / clear_filter / reset       set_sort            set_page
//!              │                               │                    │
//!              ▼                               │                    │
//!   visible = all records passing             │                    │
//!             every predicate                  │                    │
//!              │                               │                    │
//!              ▼                               ▼                    │
//!   ordered = visible, stably sorted by the active comparator       │
//!              │                               │                    │
//!              ▼                               ▼                    ▼
//!   page = 1                        page kept (clamped)      page clamped
//!              │                               │                    │
//!              └───────────────┬───────────────┴────────────────────┘
//!                              ▼
//!              page slice + broadcast ListSnapshot
//! ```
//!
//! Every step is synchronous; only painting the result may be deferred.

use std::sync::Arc;

use tokio::sync::watch;

use crate::comparator::{Comparator, ComparatorRegistry};
use crate::pagination::{paginate, Pagination};
use crate::predicate::{Predicate, PredicateRegistry};
use cinelist_core::EngineError;

mod observable;

pub use observable::ListSnapshot;
use observable::SnapshotChannel;

// =============================================================================
// Engine Phase
// =============================================================================

/// Engine state machine. Recomputing is entered and left within one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnginePhase {
    #[default]
    Idle,
    Recomputing,
}

// =============================================================================
// List Engine
// =============================================================================

/// Filter/sort/paginate engine over a fixed record list.
pub struct ListEngine<T> {
    /// Records in source order. Never mutated.
    records: Arc<[T]>,

    predicates: PredicateRegistry<T>,
    comparators: ComparatorRegistry<T>,

    /// Active sort name and comparator. `None` keeps source order.
    sort: Option<(String, Comparator<T>)>,

    page_size: usize,
    current_page: usize,

    /// Per-record visibility, in source order.
    visible: Vec<bool>,

    /// Indices of visible records in display order.
    ordered: Vec<usize>,

    phase: EnginePhase,
    channel: SnapshotChannel,
}

impl<T> ListEngine<T> {
    /// Create an engine showing every record in source order, page 1.
    pub fn new(records: impl Into<Arc<[T]>>, page_size: usize) -> Self {
        let records = records.into();
        let page_size = page_size.max(1);
        let visible = vec![true; records.len()];
        let ordered: Vec<usize> = (0..records.len()).collect();
        let pagination = paginate(ordered.len(), page_size, 1);
        let initial = ListSnapshot {
            visible_count: ordered.len(),
            total_count: records.len(),
            sort: None,
            pagination,
            page_indices: ordered[pagination.start..pagination.end].to_vec(),
        };

        Self {
            records,
            predicates: PredicateRegistry::new(),
            comparators: ComparatorRegistry::new(),
            sort: None,
            page_size,
            current_page: 1,
            visible,
            ordered,
            phase: EnginePhase::Idle,
            channel: SnapshotChannel::new(initial),
        }
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Register or replace a named filter and go back to page 1.
    pub fn set_filter(&mut self, name: impl Into<String>, predicate: Predicate<T>) {
        self.predicates.register(name, predicate);
        self.refilter();
    }

    /// Remove a named filter and go back to page 1.
    ///
    /// Returns true if a filter was removed.
    pub fn clear_filter(&mut self, name: &str) -> bool {
        let removed = self.predicates.remove(name);
        if removed {
            self.refilter();
        }
        removed
    }

    /// Drop every filter and go back to page 1.
    pub fn reset(&mut self) {
        self.predicates.clear();
        self.refilter();
    }

    /// The active filters.
    pub fn predicates(&self) -> &PredicateRegistry<T> {
        &self.predicates
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Make a comparator available to [`ListEngine::set_sort`].
    pub fn register_comparator(&mut self, name: impl Into<String>, comparator: Comparator<T>) {
        self.comparators.register(name, comparator);
    }

    /// Mutable access to the comparator registry, for bulk registration.
    pub fn comparators_mut(&mut self) -> &mut ComparatorRegistry<T> {
        &mut self.comparators
    }

    pub fn comparators(&self) -> &ComparatorRegistry<T> {
        &self.comparators
    }

    /// Sort by a registered comparator, keeping the current page.
    ///
    /// An unknown name is rejected and leaves the engine untouched.
    pub fn set_sort(&mut self, name: &str) -> Result<(), EngineError> {
        let comparator = self.comparators.select(name)?;
        self.sort = Some((name.to_string(), comparator));
        self.begin();
        self.reorder();
        self.finish();
        Ok(())
    }

    /// Name of the active sort.
    pub fn active_sort(&self) -> Option<&str> {
        self.sort.as_ref().map(|(name, _)| name.as_str())
    }

    // =========================================================================
    // Paging
    // =========================================================================

    /// Go to a page, clamped to the available range.
    ///
    /// Returns the page actually shown.
    pub fn set_page(&mut self, page: usize) -> usize {
        let pagination = paginate(self.ordered.len(), self.page_size, page);
        if pagination.current_page != page {
            tracing::debug!(
                "Requested page {} clamped to {} of {}",
                page,
                pagination.current_page,
                pagination.num_pages
            );
        }
        self.current_page = pagination.current_page;
        self.publish();
        self.current_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Page boundaries of the current page.
    pub fn pagination(&self) -> Pagination {
        paginate(self.ordered.len(), self.page_size, self.current_page)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All records in source order.
    pub fn records(&self) -> &Arc<[T]> {
        &self.records
    }

    pub fn visible_count(&self) -> usize {
        self.ordered.len()
    }

    /// Indices of visible records in display order.
    pub fn ordered(&self) -> &[usize] {
        &self.ordered
    }

    /// Indices of the records on the current page, in display order.
    pub fn page_indices(&self) -> &[usize] {
        let pagination = self.pagination();
        &self.ordered[pagination.start..pagination.end]
    }

    /// Records on the current page, in display order.
    pub fn page_items(&self) -> Vec<&T> {
        self.page_indices()
            .iter()
            .map(|&i| &self.records[i])
            .collect()
    }

    /// Whether the record at `index` passes every filter.
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Per-record visibility in source order.
    pub fn visibility(&self) -> &[bool] {
        &self.visible
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Current render-ready state.
    pub fn snapshot(&self) -> ListSnapshot {
        let pagination = self.pagination();
        ListSnapshot {
            visible_count: self.ordered.len(),
            total_count: self.records.len(),
            sort: self.active_sort().map(str::to_string),
            pagination,
            page_indices: self.ordered[pagination.start..pagination.end].to_vec(),
        }
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.channel.subscribe()
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn begin(&mut self) {
        self.phase = EnginePhase::Recomputing;
    }

    fn finish(&mut self) {
        self.current_page = self.pagination().current_page;
        self.phase = EnginePhase::Idle;
        self.publish();
    }

    /// Re-run every predicate, re-sort and go back to page 1.
    fn refilter(&mut self) {
        self.begin();
        let predicates = &self.predicates;
        self.visible = self.records.iter().map(|r| predicates.evaluate(r)).collect();
        self.reorder();
        self.current_page = 1;
        self.finish();
        tracing::debug!(
            "Filtered {} of {} records with {} predicates",
            self.ordered.len(),
            self.records.len(),
            self.predicates.len()
        );
    }

    /// Rebuild the display order from the visibility mask.
    ///
    /// Always starts from source order, so the result does not depend on any
    /// earlier sort.
    fn reorder(&mut self) {
        self.ordered = self
            .visible
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| v.then_some(i))
            .collect();

        if let Some((_, comparator)) = &self.sort {
            let records = &self.records;
            self.ordered
                .sort_by(|&a, &b| comparator(&records[a], &records[b]));
        }
    }

    fn publish(&self) {
        self.channel.publish(self.snapshot());
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests;
