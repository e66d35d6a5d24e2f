//! Tracing subscriber setup.

use tracing::Level;
use tracing_subscriber::EnvFilter;

use devpulse_tui::ChannelWriter;

fn filter(verbose: bool) -> EnvFilter {
    let level = if verbose { Level::INFO } else { Level::WARN };
    EnvFilter::from_default_env().add_directive(level.into())
}

/// Install the global subscriber.
///
/// Without `tui` events go to stderr, leaving stdout for command output.
/// With `tui` they are forwarded to the dashboard's log panel at info level.
pub fn init(verbose: bool, tui: Option<ChannelWriter>) {
    match tui {
        Some(writer) => tracing_subscriber::fmt()
            .with_env_filter(filter(true))
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .with_writer(move || writer.clone())
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter(verbose))
            .with_writer(std::io::stderr)
            .init(),
    }
}
