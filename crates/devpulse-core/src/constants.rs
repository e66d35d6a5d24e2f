//! Constants for refresh timing, export defaults, and exit codes.

use std::time::Duration;

/// Simulated latency of a single metrics source fetch.
pub const SOURCE_FETCH_DELAY: Duration = Duration::from_millis(1000);

/// Delay applied when the time range changes.
pub const TIME_RANGE_REFRESH_DELAY: Duration = Duration::from_millis(1000);

/// Delay applied to a manual dashboard refresh.
pub const MANUAL_REFRESH_DELAY: Duration = Duration::from_millis(2000);

/// Interval between real-time metric card pulses.
pub const PULSE_INTERVAL: Duration = Duration::from_secs(30);

/// Granularity at which sleeping sources poll for cancellation.
pub const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Filename stem used when an exported table has no identifier.
pub const DEFAULT_EXPORT_STEM: &str = "dashboard-data";

/// File extension appended to exported tables.
pub const CSV_EXTENSION: &str = "csv";

/// MIME type attached to exported tables.
pub const CSV_MIME: &str = "text/csv";

/// Scale factor applied to productivity gains on the radar chart.
pub const RADAR_PRODUCTIVITY_SCALE: f64 = 25.0;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// A refresh timed out.
    pub const ERROR_TIMEOUT: i32 = 2;
    /// Invalid configuration or unknown identifier.
    pub const ERROR_CONFIG: i32 = 4;
    /// Writing an export failed.
    pub const ERROR_IO: i32 = 5;
    /// Cancelled by user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
