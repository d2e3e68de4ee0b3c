//! List controller.
//!
//! Glues page bindings, the list engine and the runtime helpers together.
//! Every control on a list page lands here: the title box goes through the
//! debouncer, select and range controls apply immediately, and painting runs
//! through the chunked scheduler.
//!
//! ## Threading
//!
//! The engine sits behind a `parking_lot::Mutex` so the debounced title
//! handler (a tokio task) and direct calls share it. No lock is held across
//! an await.

use std::sync::Arc;

use cinelist_core::{AppConfig, EngineError, Record};
use cinelist_engine::{page_path, predicate, ListEngine, ListSnapshot, PageLink};
use cinelist_runtime::{ChunkedScheduler, Debouncer, RunOutcome};
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::error::ControlError;
use crate::model::{FilterBounds, FilterId, FilterInput, PageKind};
use crate::paint::{paint, VisibilitySink};

type SharedEngine = Arc<Mutex<ListEngine<Record>>>;

/// Controller for one list page.
pub struct ListController {
    kind: PageKind,
    engine: SharedEngine,
    bounds: Arc<FilterBounds>,
    title_input: Debouncer<String>,
    scheduler: ChunkedScheduler,
    link_siblings: usize,
}

impl ListController {
    /// Build the controller and install the page's filters and sorts.
    ///
    /// Range bounds are measured here, once per record list.
    pub fn new(kind: PageKind, records: Vec<Record>, config: &AppConfig) -> Self {
        let bounds = Arc::new(FilterBounds::from_records(&records, kind.filters()));

        let mut engine = ListEngine::new(records, config.list.page_size);
        kind.install(&mut engine);
        let engine: SharedEngine = Arc::new(Mutex::new(engine));

        let scheduler = ChunkedScheduler::from_config(&config.scheduler);

        let title_input = {
            let engine = engine.clone();
            let bounds = bounds.clone();
            let scheduler = scheduler.clone();
            Debouncer::new(config.input.debounce(), move |query: String| {
                let input = FilterInput::Text(query);
                if let Err(e) = apply(&engine, &bounds, &scheduler, FilterId::Title, &input) {
                    tracing::warn!("Title filter rejected: {}", e);
                }
            })
        };

        tracing::info!(
            "{} list ready with {} records",
            kind,
            engine.lock().records().len()
        );

        Self {
            kind,
            engine,
            bounds,
            title_input,
            scheduler,
            link_siblings: config.list.page_link_siblings,
        }
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn bounds(&self) -> &FilterBounds {
        &self.bounds
    }

    // =========================================================================
    // Controls
    // =========================================================================

    /// Title box keystroke. Applied once typing pauses.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_title_input(&self, text: impl Into<String>) {
        self.title_input.call(text.into());
    }

    /// Whether a title change is still waiting for the debounce delay.
    pub fn title_pending(&self) -> bool {
        self.title_input.is_pending()
    }

    /// Apply a filter control value immediately.
    pub fn apply_filter(&self, filter: FilterId, input: FilterInput) -> Result<(), ControlError> {
        if !self.kind.filters().contains(&filter) {
            return Err(ControlError::NotOnPage {
                filter: filter.name(),
                page: self.kind.to_string(),
            });
        }
        if filter == FilterId::Title {
            // A direct title value supersedes any keystrokes still waiting.
            self.title_input.cancel();
        }
        apply(&self.engine, &self.bounds, &self.scheduler, filter, &input)
    }

    /// Return every filter to its "show everything" state.
    pub fn clear_filters(&self) {
        self.title_input.cancel();

        let mut engine = self.engine.lock();
        engine.reset();
        for filter in self.kind.filters() {
            engine.set_filter(filter.name(), predicate::always());
        }
        self.scheduler.cancel();
    }

    /// Sort control change, e.g. `grade-desc`.
    pub fn on_sort(&self, name: &str) -> Result<(), EngineError> {
        self.engine.lock().set_sort(name)
    }

    /// Pagination link. Returns the page actually shown.
    pub fn on_page(&self, page: usize) -> usize {
        self.engine.lock().set_page(page)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn snapshot(&self) -> ListSnapshot {
        self.engine.lock().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.engine.lock().subscribe()
    }

    /// Records on the current page, in display order.
    pub fn page_records(&self) -> Vec<Record> {
        self.engine.lock().page_items().into_iter().cloned().collect()
    }

    pub fn page_links(&self) -> Vec<PageLink> {
        self.engine.lock().pagination().page_links(self.link_siblings)
    }

    /// Site path of a page of this list.
    pub fn page_path(&self, page: usize) -> String {
        page_path(self.kind.base_path(), page)
    }

    /// Choices for a select control.
    pub fn filter_options(&self, filter: FilterId) -> Vec<String> {
        filter.options(self.engine.lock().records())
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Paint the current visibility mask into `sink`.
    ///
    /// A later paint cancels this one at its next slice boundary.
    pub async fn paint<S>(&self, sink: &mut S) -> RunOutcome
    where
        S: VisibilitySink + ?Sized,
    {
        let (records, visibility) = {
            let engine = self.engine.lock();
            (engine.records().clone(), engine.visibility().to_vec())
        };
        paint(&self.scheduler, &records, &visibility, sink).await
    }
}

/// Install a filter value and invalidate any paint of the old mask.
fn apply(
    engine: &Mutex<ListEngine<Record>>,
    bounds: &FilterBounds,
    scheduler: &ChunkedScheduler,
    filter: FilterId,
    input: &FilterInput,
) -> Result<(), ControlError> {
    let predicate = filter.predicate(input, bounds)?;
    engine.lock().set_filter(filter.name(), predicate);
    scheduler.cancel();
    Ok(())
}
