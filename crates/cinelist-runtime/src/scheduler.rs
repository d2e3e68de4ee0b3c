//! Chunked scheduler.
//!
//! Visits every item of a collection in input order, in slices bounded by a
//! wall-clock budget. Between slices the scheduler pauses so the rest of the
//! runtime (input handling, rendering) gets a turn.
//!
//! ## Cancellation
//!
//! Each run takes a new generation number. A run that sees a newer
//! generation at a slice boundary stops, so starting a new run (or calling
//! `cancel`) invalidates whatever run is still in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cinelist_core::SchedulerConfig;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every item was visited.
    Completed { visited: usize, slices: usize },
    /// A newer run or `cancel` superseded this one.
    Cancelled { visited: usize },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }

    pub fn visited(&self) -> usize {
        match self {
            RunOutcome::Completed { visited, .. } | RunOutcome::Cancelled { visited } => *visited,
        }
    }
}

/// Time-sliced visitor. Clones share one generation counter.
#[derive(Debug, Clone)]
pub struct ChunkedScheduler {
    budget: Duration,
    yield_delay: Duration,
    generation: Arc<AtomicU64>,
}

impl ChunkedScheduler {
    /// Create a scheduler with a per-slice budget and a pause between slices.
    ///
    /// A zero `yield_delay` still yields to the runtime between slices.
    pub fn new(budget: Duration, yield_delay: Duration) -> Self {
        Self {
            budget,
            yield_delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.budget(), config.yield_delay())
    }

    /// Current generation. Bumped by every `run` and `cancel`.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Invalidate the in-flight run, if any.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Visit every item, yielding between slices.
    ///
    /// Each slice visits at least one item, then keeps going until the budget
    /// is spent or the items run out.
    pub async fn run<I, F>(&self, items: I, mut visit: F) -> RunOutcome
    where
        I: IntoIterator,
        F: FnMut(I::Item),
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut items = items.into_iter().peekable();
        let mut visited = 0;
        let mut slices = 0;

        while items.peek().is_some() {
            if self.generation() != generation {
                tracing::debug!(
                    "Chunked run {} cancelled after {} items",
                    generation,
                    visited
                );
                return RunOutcome::Cancelled { visited };
            }

            slices += 1;
            let started = std::time::Instant::now();
            for item in items.by_ref() {
                visit(item);
                visited += 1;
                if started.elapsed() >= self.budget {
                    break;
                }
            }

            if items.peek().is_some() {
                self.pause().await;
            }
        }

        tracing::debug!(
            "Chunked run {} visited {} items in {} slices",
            generation,
            visited,
            slices
        );
        RunOutcome::Completed { visited, slices }
    }

    async fn pause(&self) {
        if self.yield_delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.yield_delay).await;
        }
    }
}

impl Default for ChunkedScheduler {
    fn default() -> Self {
        Self::from_config(&SchedulerConfig::default())
    }
}
