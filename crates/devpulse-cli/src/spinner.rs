//! Spinner shown while sources are refreshed.

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use devpulse_core::controls::TimeRange;
use devpulse_core::progress::CancellationToken;
use devpulse_core::refresh::{refresh_all, FetchResult};
use devpulse_core::source::MetricsSource;

const TICK: Duration = Duration::from_millis(100);

/// Indeterminate progress indicator for a running refresh.
pub struct RefreshSpinner {
    bar: ProgressBar,
}

impl RefreshSpinner {
    /// Start spinning with `message`. A quiet spinner draws nothing.
    #[must_use]
    pub fn start(message: impl Into<String>, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.into());
        if !quiet {
            bar.enable_steady_tick(TICK);
        }
        Self { bar }
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.bar.set_message(message.into());
    }

    /// Stop with a final message left on screen.
    pub fn finish(&self, message: impl Into<String>) {
        self.bar.finish_with_message(message.into());
    }

    /// Stop and leave the failure message on screen.
    pub fn fail(&self, message: impl Into<String>) {
        self.bar.abandon_with_message(message.into());
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

/// Run [`refresh_all`] behind a spinner.
pub fn refresh_with_spinner(
    sources: &[Arc<dyn MetricsSource>],
    range: TimeRange,
    cancel: &CancellationToken,
    timeout: Option<Duration>,
    quiet: bool,
) -> Vec<FetchResult> {
    let spinner = RefreshSpinner::start(
        format!("Refreshing {} sources ({})", sources.len(), range.label()),
        quiet,
    );
    let results = refresh_all(sources, range, cancel, timeout);
    let failed = results.iter().filter(|r| r.outcome.is_err()).count();
    if failed == results.len() && !results.is_empty() {
        spinner.fail("Refresh failed");
    } else if failed > 0 {
        spinner.finish(format!("Refreshed with {failed} failed source(s)"));
    } else {
        spinner.finish("Refreshed");
    }
    results
}
