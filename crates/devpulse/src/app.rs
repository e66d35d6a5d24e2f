//! Application entry point and dispatch.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossbeam_channel::{Receiver, Sender};

use devpulse_cli::output::FileSystemDownloader;
use devpulse_cli::presenter::{JsonPresenter, Presenter, TextPresenter};
use devpulse_cli::spinner::refresh_with_spinner;
use devpulse_cli::ui::Theme;
use devpulse_core::command::{dispatch, Command, Outcome};
use devpulse_core::constants::PULSE_INTERVAL;
use devpulse_core::context::DashboardContext;
use devpulse_core::error::DashError;
use devpulse_core::progress::CancellationToken;
use devpulse_core::refresh::merge_results;
use devpulse_core::series::MetricSeries;
use devpulse_core::source::SourceRegistry;
use devpulse_core::table::TableId;
use devpulse_tui::{spawn_pulse, RefreshBridge, TuiApp, TuiMessage};

use crate::config::AppConfig;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        devpulse_cli::completion::generate_completion(&mut cmd, shell, &mut io::stdout());
        return Ok(());
    }

    if config.tui {
        let (tx, rx) = crossbeam_channel::unbounded();
        return run_tui(config, tx, rx);
    }

    run_cli(config)
}

/// Build the context the flags describe, stamped as loaded now.
fn build_context(config: &AppConfig, sink: &FileSystemDownloader) -> Result<DashboardContext> {
    let mut ctx = DashboardContext::default()
        .with_range(config.time_range()?)
        .with_quoting(config.quoting());
    dispatch(&mut ctx, Command::FilterTeam(config.team_filter()?), sink)?;
    ctx.mark_updated(Local::now());
    Ok(ctx)
}

fn presenter(config: &AppConfig) -> Box<dyn Presenter> {
    if config.json {
        Box::new(JsonPresenter)
    } else {
        Box::new(TextPresenter::new(
            config.verbose,
            config.quiet,
            Theme::detect(),
        ))
    }
}

fn run_cli(config: &AppConfig) -> Result<()> {
    let sink = FileSystemDownloader::from_env(config.out_dir.as_deref());
    let mut ctx = build_context(config, &sink)?;
    let presenter = presenter(config);
    let mut out = io::stdout().lock();

    if config.refresh {
        let cancel = CancellationToken::new();
        ctrlc_handler(cancel.clone());

        let registry = SourceRegistry::default();
        let sources = registry.select(&config.source).map_err(DashError::from)?;
        let results = refresh_with_spinner(
            &sources,
            ctx.range(),
            &cancel,
            Some(config.timeout_duration()?),
            config.quiet || config.json,
        );
        if !config.json {
            presenter.present_refresh(&results, &mut out)?;
        }
        let dataset = merge_results(&results).map_err(DashError::from)?;
        ctx.apply_refresh(dataset);
    }

    if let Some(key) = &config.metric {
        if dispatch(&mut ctx, Command::SelectMetric(key.clone()), &sink)? == Outcome::Unchanged {
            return Err(DashError::UnknownMetric(key.clone()).into());
        }
        let series = MetricSeries::from_dataset(ctx.metric(), ctx.dataset());
        presenter.present_series(&series, &mut out)?;
    } else if let Some(table) = &config.export {
        let id: TableId = table.parse()?;
        tracing::info!(table = %id, dir = %sink.dir().display(), "exporting");
        if let Outcome::Exported(receipt) = dispatch(&mut ctx, Command::ExportTable(id), &sink)? {
            presenter.present_export(&receipt, &mut out)?;
        }
    } else {
        presenter.present_dashboard(&ctx, &mut out)?;
    }

    out.flush()?;
    Ok(())
}

/// Run the interactive dashboard on `rx`; `tx` feeds it from background threads.
pub fn run_tui(config: &AppConfig, tx: Sender<TuiMessage>, rx: Receiver<TuiMessage>) -> Result<()> {
    let sink = FileSystemDownloader::from_env(config.out_dir.as_deref());
    let ctx = build_context(config, &sink)?;
    let cancel = CancellationToken::new();

    // Refresh latency comes from the bridge pacing, not the sources.
    let registry = SourceRegistry::new(Duration::ZERO);
    let sources = registry.select(&config.source).map_err(DashError::from)?;
    let source_count = sources.len();
    let bridge = RefreshBridge::new(tx.clone(), sources, cancel.clone())
        .with_timeout(Some(config.timeout_duration()?));
    spawn_pulse(tx, PULSE_INTERVAL, cancel.clone())?;

    let mut app = TuiApp::new(ctx, rx, Box::new(sink.clone())).with_bridge(bridge);
    app.handle_message(TuiMessage::Log(format!(
        "dashboard ready: {source_count} sources, exports to {}",
        sink.dir().display()
    )));

    let result = app.run();
    cancel.cancel();
    result.map_err(|e| anyhow::anyhow!("TUI error: {e}"))
}

fn ctrlc_handler(cancel: CancellationToken) {
    ctrlc::set_handler(move || {
        cancel.cancel();
    })
    .expect("Error setting Ctrl+C handler");
}
