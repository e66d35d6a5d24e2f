//! DevPulse: AI engineering analytics dashboard.

use std::process::ExitCode;

use devpulse_cli::ui::print_error;
use devpulse_lib::{app, config, errors, logging, version};
use devpulse_tui::ChannelWriter;

fn main() -> ExitCode {
    let config = config::AppConfig::parse();

    // The TUI owns the terminal, so its logs go to the log panel.
    let tui_channel = config
        .launches_tui()
        .then(crossbeam_channel::unbounded::<devpulse_tui::TuiMessage>);
    logging::init(
        config.verbose,
        tui_channel.as_ref().map(|(tx, _)| ChannelWriter::new(tx.clone())),
    );
    tracing::debug!(version = %version::full_version(), "starting");

    let result = match tui_channel {
        Some((tx, rx)) => app::run_tui(&config, tx, rx),
        None => app::run(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&format!("{err:#}"));
            ExitCode::from(u8::try_from(errors::exit_code(&err)).unwrap_or(1))
        }
    }
}
