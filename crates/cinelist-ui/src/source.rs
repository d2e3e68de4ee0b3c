//! Record sources.
//!
//! A `RecordSource` hands the frontend its record list. The trait returns
//! futures so callers decide where loading runs, and tests can swap in a
//! mock source.

use std::path::PathBuf;
use std::sync::Arc;

use cinelist_core::Record;
use futures::future::BoxFuture;

use crate::error::LoadError;

/// Something that can produce the full record list for a page.
pub trait RecordSource: Send + Sync {
    fn load(&self) -> BoxFuture<'static, Result<Vec<Record>, LoadError>>;
}

// =============================================================================
// JSON File Source
// =============================================================================

/// Reads a JSON array of records from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: Arc<PathBuf>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

/// Parse a JSON array of records.
pub fn parse_records(text: &str) -> Result<Vec<Record>, LoadError> {
    Ok(serde_json::from_str(text)?)
}

impl RecordSource for JsonFileSource {
    fn load(&self) -> BoxFuture<'static, Result<Vec<Record>, LoadError>> {
        let path = self.path.clone();

        Box::pin(async move {
            let records = tokio::task::spawn_blocking(move || {
                let text = std::fs::read_to_string(path.as_path())?;
                parse_records(&text)
            })
            .await
            .map_err(|e| LoadError::Task(e.to_string()))??;

            tracing::info!("Loaded {} records", records.len());
            Ok(records)
        })
    }
}

// =============================================================================
// Mock Source for Testing
// =============================================================================

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::time::Duration;

    /// Mock source returning a fixed record list.
    pub struct MockSource {
        pub records: Arc<Mutex<Vec<Record>>>,
        pub delay: Duration,
    }

    impl MockSource {
        pub fn new(records: Vec<Record>) -> Self {
            Self {
                records: Arc::new(Mutex::new(records)),
                delay: Duration::ZERO,
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    impl RecordSource for MockSource {
        fn load(&self) -> BoxFuture<'static, Result<Vec<Record>, LoadError>> {
            let records = self.records.clone();
            let delay = self.delay;

            Box::pin(async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(records.lock().clone())
            })
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
