//! Bridge between background refresh work and TUI messages.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;

use devpulse_core::constants::CANCEL_POLL_INTERVAL;
use devpulse_core::controls::TimeRange;
use devpulse_core::progress::CancellationToken;
use devpulse_core::refresh::{merge_results, refresh_all, FetchResult, RefreshReason};
use devpulse_core::source::MetricsSource;

use crate::messages::{SourceStatus, TuiMessage};

/// Runs refreshes on a background thread and reports through the channel.
#[derive(Clone)]
pub struct RefreshBridge {
    tx: Sender<TuiMessage>,
    sources: Vec<Arc<dyn MetricsSource>>,
    cancel: CancellationToken,
    timeout: Option<Duration>,
    paced: bool,
}

impl RefreshBridge {
    #[must_use]
    pub fn new(
        tx: Sender<TuiMessage>,
        sources: Vec<Arc<dyn MetricsSource>>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            tx,
            sources,
            cancel,
            timeout: None,
            paced: true,
        }
    }

    /// Give up on sources that have not answered after `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether to wait out [`RefreshReason::delay`] before fetching.
    #[must_use]
    pub fn with_pacing(mut self, paced: bool) -> Self {
        self.paced = paced;
        self
    }

    /// Stop any refresh in flight.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Start a refresh on a new thread.
    pub fn spawn(&self, reason: RefreshReason, range: TimeRange) -> io::Result<JoinHandle<()>> {
        let bridge = self.clone();
        thread::Builder::new()
            .name("devpulse-refresh".into())
            .spawn(move || bridge.run(reason, range))
    }

    /// Run one refresh on the current thread.
    pub fn run(&self, reason: RefreshReason, range: TimeRange) {
        let start = Instant::now();
        tracing::debug!(?reason, %range, paced = self.paced, "refresh thread started");
        let _ = self.tx.send(TuiMessage::RefreshStarted(reason));

        if self.paced {
            if let Err(e) = self.cancel.sleep(reason.delay(), CANCEL_POLL_INTERVAL) {
                let _ = self.tx.send(TuiMessage::RefreshFailed(e.to_string()));
                return;
            }
        }

        let results = refresh_all(&self.sources, range, &self.cancel, self.timeout);
        let message = match merge_results(&results) {
            Ok(dataset) => TuiMessage::RefreshComplete {
                dataset: Box::new(dataset),
                sources: statuses(&results),
                elapsed: start.elapsed(),
            },
            Err(e) => TuiMessage::RefreshFailed(e.to_string()),
        };
        let _ = self.tx.send(message);
    }
}

fn statuses(results: &[FetchResult]) -> Vec<SourceStatus> {
    results
        .iter()
        .map(|r| SourceStatus {
            name: r.source.clone(),
            error: r.outcome.as_ref().err().map(ToString::to_string),
            duration: r.duration,
        })
        .collect()
}

/// Send [`TuiMessage::Pulse`] every `interval` until cancelled.
pub fn spawn_pulse(
    tx: Sender<TuiMessage>,
    interval: Duration,
    cancel: CancellationToken,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("devpulse-pulse".into())
        .spawn(move || {
            while cancel.sleep(interval, CANCEL_POLL_INTERVAL).is_ok() {
                if tx.send(TuiMessage::Pulse).is_err() {
                    break;
                }
            }
        })
}

/// `io::Write` adapter that forwards each written line as a log message.
///
/// Used as the tracing writer while the TUI owns the terminal.
#[derive(Clone)]
pub struct ChannelWriter {
    tx: Sender<TuiMessage>,
}

impl ChannelWriter {
    #[must_use]
    pub fn new(tx: Sender<TuiMessage>) -> Self {
        Self { tx }
    }
}

impl io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let _ = self.tx.try_send(TuiMessage::Log(line.to_string()));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
