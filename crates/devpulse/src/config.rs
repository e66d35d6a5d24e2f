//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use devpulse_core::controls::{TeamFilter, TimeRange};
use devpulse_core::error::DashError;
use devpulse_core::export::Quoting;

/// DevPulse: AI engineering analytics dashboard.
#[derive(Parser, Debug)]
#[command(name = "devpulse", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Print one AI generation series: lines, acceptance or suggestions.
    #[arg(short, long, conflicts_with = "export")]
    pub metric: Option<String>,

    /// Export a table as CSV: developers or projects.
    #[arg(short, long)]
    pub export: Option<String>,

    /// Directory exports are written to.
    #[arg(long, env = "DEVPULSE_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// Write exports without escaping embedded quotes.
    #[arg(long)]
    pub legacy_quoting: bool,

    /// Reporting window: 7d, 30d, 90d or 1y.
    #[arg(long, default_value = "30d", env = "DEVPULSE_RANGE")]
    pub range: String,

    /// Team shown by the team charts, or "all".
    #[arg(long, default_value = "all", env = "DEVPULSE_TEAM")]
    pub team: String,

    /// Refresh from the metrics sources before printing.
    #[arg(long)]
    pub refresh: bool,

    /// Source to refresh from: github, atlassian, ai-metrics or all.
    #[arg(long, default_value = "all")]
    pub source: String,

    /// Refresh timeout (e.g. "30s", "500ms").
    #[arg(long, default_value = "30s")]
    pub timeout: String,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Launch interactive TUI.
    #[arg(long)]
    pub tui: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,

    /// Quiet mode (data only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Whether this invocation runs the interactive dashboard.
    #[must_use]
    pub fn launches_tui(&self) -> bool {
        self.tui && self.completion.is_none()
    }

    pub fn time_range(&self) -> Result<TimeRange, DashError> {
        self.range.parse()
    }

    pub fn team_filter(&self) -> Result<TeamFilter, DashError> {
        self.team.parse()
    }

    #[must_use]
    pub fn quoting(&self) -> Quoting {
        if self.legacy_quoting {
            Quoting::Legacy
        } else {
            Quoting::Escaped
        }
    }

    /// Parse the timeout string into a Duration.
    pub fn timeout_duration(&self) -> Result<Duration, DashError> {
        parse_duration(&self.timeout)
            .ok_or_else(|| DashError::Config(format!("invalid timeout: {}", self.timeout)))
    }
}

/// Parse a duration string like "5m", "30s", "500ms".
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        Some(Duration::from_millis(ms.parse().ok()?))
    } else if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(60)?))
    } else if let Some(secs) = s.strip_suffix('s') {
        Some(Duration::from_secs(secs.parse().ok()?))
    } else {
        Some(Duration::from_secs(s.parse().ok()?))
    }
}
