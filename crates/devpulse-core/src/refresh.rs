//! Parallel refresh across metrics sources.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::constants::{MANUAL_REFRESH_DELAY, TIME_RANGE_REFRESH_DELAY};
use crate::controls::TimeRange;
use crate::dataset::Dataset;
use crate::error::FetchError;
use crate::progress::CancellationToken;
use crate::source::MetricsSource;

/// Why a refresh was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    /// The user pressed refresh.
    Manual,
    /// The time range selector changed.
    TimeRangeChanged,
}

impl RefreshReason {
    /// Simulated latency for this kind of refresh.
    #[must_use]
    pub fn delay(self) -> Duration {
        match self {
            Self::Manual => MANUAL_REFRESH_DELAY,
            Self::TimeRangeChanged => TIME_RANGE_REFRESH_DELAY,
        }
    }
}

/// Outcome of fetching from one source.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub source: String,
    pub outcome: Result<Dataset, FetchError>,
    pub duration: Duration,
}

/// Fetch from every source in parallel.
///
/// A source that starts or finishes after `timeout` is reported as
/// `FetchError::Timeout`. Results are returned in source order.
pub fn refresh_all(
    sources: &[Arc<dyn MetricsSource>],
    range: TimeRange,
    cancel: &CancellationToken,
    timeout: Option<Duration>,
) -> Vec<FetchResult> {
    let start_time = Instant::now();
    let timed_out = |timeout: Option<Duration>| timeout.filter(|t| start_time.elapsed() >= *t);

    tracing::info!(%range, sources = sources.len(), "refreshing");

    let results: Vec<FetchResult> = sources
        .par_iter()
        .map(|source| {
            let start = Instant::now();
            let outcome = if let Some(t) = timed_out(timeout) {
                Err(FetchError::Timeout(t))
            } else {
                match source.fetch(range, cancel) {
                    Ok(_) if timed_out(timeout).is_some() => {
                        Err(FetchError::Timeout(timeout.unwrap_or_default()))
                    }
                    other => other,
                }
            };
            if let Err(e) = &outcome {
                tracing::warn!(source = source.name(), error = %e, "source failed");
            }
            FetchResult {
                source: source.name().to_string(),
                outcome,
                duration: start.elapsed(),
            }
        })
        .collect();

    tracing::info!(elapsed = ?start_time.elapsed(), "refresh finished");
    results
}

/// Pick the dataset to display from a set of fetch results.
///
/// The first successful dataset wins. When every source failed the
/// error is `Cancelled` if any fetch was cancelled, otherwise `NoData`.
pub fn merge_results(results: &[FetchResult]) -> Result<Dataset, FetchError> {
    if let Some(data) = results.iter().find_map(|r| r.outcome.as_ref().ok()) {
        return Ok(data.clone());
    }
    if results
        .iter()
        .any(|r| matches!(r.outcome, Err(FetchError::Cancelled)))
    {
        return Err(FetchError::Cancelled);
    }
    Err(FetchError::NoData)
}
