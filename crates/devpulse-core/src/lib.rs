//! # devpulse-core
//!
//! Core library for the DevPulse engineering analytics dashboard.
//! Holds the dashboard data model, CSV table export, the metric series
//! registry, chart specifications, user commands, and refresh orchestration.

pub mod cards;
pub mod chart;
pub mod command;
pub mod constants;
pub mod context;
pub mod controls;
pub mod dataset;
pub mod download;
pub mod error;
pub mod export;
pub mod palette;
pub mod progress;
pub mod refresh;
pub mod series;
pub mod source;
pub mod table;

// Re-exports
pub use cards::{metric_cards, MetricCard};
pub use chart::{ChartId, ChartKind, ChartSet, ChartSpec};
pub use command::{dispatch, Command, Outcome};
pub use constants::exit_codes;
pub use context::DashboardContext;
pub use controls::{TeamFilter, TimeRange};
pub use dataset::Dataset;
pub use download::{export_table, DownloadSink, ExportReceipt};
pub use error::{DashError, FetchError};
pub use export::{export_filename, serialize, serialize_with, Quoting};
pub use series::{select_series, MetricKey, MetricSeries};
pub use source::{MetricsSource, SourceRegistry, StaticSource};
pub use table::{Cell, Table, TableId};

/// Serialize one of the sample dashboard tables with the default quoting.
///
/// # Example
/// ```
/// let csv = devpulse_core::sample_csv(devpulse_core::TableId::Projects);
/// assert!(csv.starts_with("\"Project\",\"AI Adoption\""));
/// assert_eq!(csv.lines().count(), 5);
/// ```
#[must_use]
pub fn sample_csv(id: TableId) -> String {
    serialize(&id.build(&Dataset::sample()))
}
