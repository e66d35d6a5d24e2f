//! Metrics sources and their registry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::constants::{CANCEL_POLL_INTERVAL, SOURCE_FETCH_DELAY};
use crate::controls::TimeRange;
use crate::dataset::Dataset;
use crate::error::FetchError;
use crate::progress::CancellationToken;

/// A provider of dashboard data.
pub trait MetricsSource: Send + Sync {
    /// Fetch the dataset for the given time range.
    fn fetch(&self, range: TimeRange, cancel: &CancellationToken) -> Result<Dataset, FetchError>;

    /// Source name.
    fn name(&self) -> &str;
}

/// Source that returns a fixed dataset after a fixed latency.
pub struct StaticSource {
    name: String,
    delay: Duration,
    dataset: Dataset,
}

impl StaticSource {
    /// Source serving the sample dataset.
    #[must_use]
    pub fn new(name: impl Into<String>, delay: Duration) -> Self {
        Self::with_dataset(name, delay, Dataset::sample())
    }

    #[must_use]
    pub fn with_dataset(name: impl Into<String>, delay: Duration, dataset: Dataset) -> Self {
        Self {
            name: name.into(),
            delay,
            dataset,
        }
    }
}

impl MetricsSource for StaticSource {
    fn fetch(&self, range: TimeRange, cancel: &CancellationToken) -> Result<Dataset, FetchError> {
        tracing::debug!(source = %self.name, %range, delay = ?self.delay, "fetching");
        cancel.sleep(self.delay, CANCEL_POLL_INTERVAL)?;
        Ok(self.dataset.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Source names known to the registry.
pub const SOURCE_NAMES: [&str; 3] = ["github", "atlassian", "ai-metrics"];

/// Lazily-created, cached metrics sources.
pub struct SourceRegistry {
    delay: Duration,
    cache: RwLock<HashMap<String, Arc<dyn MetricsSource>>>,
}

impl SourceRegistry {
    /// Registry whose sources answer after `delay`.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create a source by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn MetricsSource>, FetchError> {
        if let Some(source) = self.cache.read().get(name) {
            return Ok(Arc::clone(source));
        }

        if !SOURCE_NAMES.contains(&name) {
            return Err(FetchError::Source {
                source_name: name.to_string(),
                message: "unknown source".to_string(),
            });
        }
        let source: Arc<dyn MetricsSource> = Arc::new(StaticSource::new(name, self.delay));
        self.cache
            .write()
            .insert(name.to_string(), Arc::clone(&source));
        Ok(source)
    }

    /// All source names.
    #[must_use]
    pub fn available(&self) -> Vec<&'static str> {
        SOURCE_NAMES.to_vec()
    }

    /// Resolve `"all"` or a single source name.
    pub fn select(&self, which: &str) -> Result<Vec<Arc<dyn MetricsSource>>, FetchError> {
        match which {
            "all" => self.available().into_iter().map(|n| self.get(n)).collect(),
            name => Ok(vec![self.get(name)?]),
        }
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new(SOURCE_FETCH_DELAY)
    }
}
