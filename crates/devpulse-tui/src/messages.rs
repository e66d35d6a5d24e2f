//! TUI message types (Elm Messages).

use std::time::Duration;

use devpulse_core::dataset::Dataset;
use devpulse_core::refresh::RefreshReason;

/// Per-source outcome of a refresh, as shown in the log panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStatus {
    pub name: String,
    pub error: Option<String>,
    pub duration: Duration,
}

/// Messages that drive the TUI update cycle.
#[derive(Debug, Clone)]
pub enum TuiMessage {
    /// A background refresh began.
    RefreshStarted(RefreshReason),
    /// A refresh produced a new dataset.
    RefreshComplete {
        dataset: Box<Dataset>,
        sources: Vec<SourceStatus>,
        elapsed: Duration,
    },
    /// Every source failed.
    RefreshFailed(String),
    /// Log line.
    Log(String),
    /// Periodic live-update pulse.
    Pulse,
    /// Tick event for periodic updates.
    Tick,
    /// Terminal resize event.
    Resize { width: u16, height: u16 },
    /// Key press event forwarded from the event loop.
    KeyPress(crate::keymap::KeyAction),
    /// Error message.
    Error(String),
    /// Quit the application.
    Quit,
}
