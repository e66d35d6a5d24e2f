//! Error types for dashboard operations.

use std::time::Duration;

/// Error raised while fetching a dataset from a metrics source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The fetch was cancelled before it completed.
    #[error("fetch cancelled")]
    Cancelled,

    /// The fetch did not complete before the deadline.
    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),

    /// The source reported a failure.
    #[error("source {source_name} failed: {message}")]
    Source {
        source_name: String,
        message: String,
    },

    /// No source produced a dataset.
    #[error("no source returned data")]
    NoData,
}

/// Error type for dashboard commands.
#[derive(Debug, thiserror::Error)]
pub enum DashError {
    /// Writing an exported document failed.
    #[error("export failed: {0}")]
    Export(#[from] std::io::Error),

    /// Refreshing the dataset failed.
    #[error("refresh failed: {0}")]
    Fetch(#[from] FetchError),

    /// The metric key is not in the series registry.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    /// The table identifier does not name an exportable table.
    #[error("unknown table: {0}")]
    UnknownTable(String),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// The operation was cancelled by the user.
    #[error("operation cancelled")]
    Cancelled,
}
