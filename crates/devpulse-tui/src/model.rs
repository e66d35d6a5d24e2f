//! TUI application model (Elm architecture).

use std::io;
use std::time::Duration;

use crossbeam_channel::Receiver;
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::execute;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::{Frame, Terminal};

use devpulse_core::cards::metric_cards;
use devpulse_core::chart::ChartId;
use devpulse_core::command::{dispatch, Command, Outcome};
use devpulse_core::context::DashboardContext;
use devpulse_core::download::DownloadSink;
use devpulse_core::refresh::RefreshReason;
use devpulse_core::table::TableId;

use crate::bridge::RefreshBridge;
use crate::cards::render_cards;
use crate::charts::render_chart;
use crate::footer::render_footer;
use crate::header::render_header;
use crate::keymap::{map_key, KeyAction};
use crate::logs::{render_logs, LogPanel};
use crate::messages::TuiMessage;
use crate::styles::ColorTheme;
use crate::tables::render_table;

const TICK_RATE: Duration = Duration::from_millis(250);
const LOG_PAGE: usize = 10;

/// Screen regions of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    pub cards: Rect,
    /// Chart cells in [`ChartId::ALL`] order, two rows of three.
    pub charts: [Rect; 6],
    pub table: Rect,
    pub logs: Option<Rect>,
    pub footer: Rect,
}

fn reason_label(reason: RefreshReason) -> &'static str {
    match reason {
        RefreshReason::Manual => "manual refresh",
        RefreshReason::TimeRangeChanged => "time range changed",
    }
}

/// TUI application state (Elm Model).
pub struct TuiApp {
    /// Whether the app should quit.
    pub should_quit: bool,
    ctx: DashboardContext,
    rx: Receiver<TuiMessage>,
    bridge: Option<RefreshBridge>,
    sink: Box<dyn DownloadSink>,
    /// Log panel contents and scroll state.
    pub logs: LogPanel,
    pub show_logs: bool,
    /// Table shown in the table panel and targeted by export.
    pub active_table: TableId,
    /// Whether a refresh is in flight.
    pub refreshing: bool,
    queued: Option<RefreshReason>,
    /// Cards are highlighted until the next tick.
    pub pulse: bool,
    /// Last user-facing status line.
    pub status: Option<String>,
    /// Error messages.
    pub errors: Vec<String>,
    pub terminal_width: u16,
    pub terminal_height: u16,
    theme: ColorTheme,
}

impl TuiApp {
    /// Create a new TUI app over `ctx`, exporting through `sink`.
    #[must_use]
    pub fn new(ctx: DashboardContext, rx: Receiver<TuiMessage>, sink: Box<dyn DownloadSink>) -> Self {
        Self {
            should_quit: false,
            ctx,
            rx,
            bridge: None,
            sink,
            logs: LogPanel::new(),
            show_logs: true,
            active_table: TableId::Developers,
            refreshing: false,
            queued: None,
            pulse: false,
            status: None,
            errors: Vec::new(),
            terminal_width: 80,
            terminal_height: 24,
            theme: ColorTheme::default(),
        }
    }

    /// Run refreshes through `bridge`.
    #[must_use]
    pub fn with_bridge(mut self, bridge: RefreshBridge) -> Self {
        self.bridge = Some(bridge);
        self
    }

    #[must_use]
    pub fn ctx(&self) -> &DashboardContext {
        &self.ctx
    }

    /// Drain pending messages (Elm Update).
    pub fn update(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    /// Handle a single message.
    pub fn handle_message(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::RefreshStarted(reason) => {
                self.refreshing = true;
                self.logs.push(format!("refresh started: {}", reason_label(reason)));
            }
            TuiMessage::RefreshComplete {
                dataset,
                sources,
                elapsed,
            } => {
                for source in &sources {
                    if let Some(err) = &source.error {
                        self.logs.push(format!("[WARN] {}: {err}", source.name));
                    }
                }
                self.ctx.apply_refresh(*dataset);
                self.logs.push(format!(
                    "refreshed from {} sources in {elapsed:.3?}",
                    sources.len()
                ));
                self.status = Some(format!("updated {}", self.ctx.last_updated_label()));
                self.finish_refresh();
            }
            TuiMessage::RefreshFailed(err) => {
                self.handle_message(TuiMessage::Error(format!("refresh failed: {err}")));
                self.finish_refresh();
            }
            TuiMessage::Log(line) => {
                self.logs.push(line);
            }
            TuiMessage::Pulse => {
                self.pulse = true;
            }
            TuiMessage::Tick => {
                self.pulse = false;
            }
            TuiMessage::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
            }
            TuiMessage::KeyPress(action) => {
                self.handle_key_action(action);
            }
            TuiMessage::Error(err) => {
                self.logs.push(format!("[ERROR] {err}"));
                self.status = Some(err.clone());
                self.errors.push(err);
            }
            TuiMessage::Quit => {
                self.quit();
            }
        }
    }

    /// Handle a keyboard action.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit | KeyAction::Cancel => self.quit(),
            KeyAction::SelectMetric(key) => {
                self.run_command(Command::SelectMetric(key.as_str().to_string()));
            }
            KeyAction::CycleTeam => {
                let next = self
                    .ctx
                    .team()
                    .cycle(&self.ctx.dataset().team_productivity.teams);
                self.run_command(Command::FilterTeam(next));
            }
            KeyAction::PreviousRange => {
                self.run_command(Command::ChangeTimeRange(self.ctx.range().previous()));
            }
            KeyAction::NextRange => {
                self.run_command(Command::ChangeTimeRange(self.ctx.range().next()));
            }
            KeyAction::Refresh => self.run_command(Command::Refresh),
            KeyAction::Export => self.run_command(Command::ExportTable(self.active_table)),
            KeyAction::SwitchTable => {
                let i = TableId::ALL
                    .iter()
                    .position(|t| *t == self.active_table)
                    .unwrap_or(0);
                self.active_table = TableId::ALL[(i + 1) % TableId::ALL.len()];
            }
            KeyAction::ToggleLogs => self.show_logs = !self.show_logs,
            KeyAction::ScrollUp => self.logs.scroll_up(),
            KeyAction::ScrollDown => self.logs.scroll_down(),
            KeyAction::PageUp => self.logs.page_up(LOG_PAGE),
            KeyAction::PageDown => self.logs.page_down(LOG_PAGE),
            KeyAction::Home => self.logs.home(),
            KeyAction::End => self.logs.end(),
            KeyAction::None => {}
        }
    }

    fn run_command(&mut self, command: Command) {
        match dispatch(&mut self.ctx, command, self.sink.as_ref()) {
            Ok(Outcome::Exported(receipt)) => {
                let line = format!(
                    "exported {} rows to {}",
                    receipt.rows,
                    receipt.path.display()
                );
                self.logs.push(line.clone());
                self.status = Some(line);
            }
            Ok(Outcome::Updated | Outcome::Unchanged | Outcome::RefreshRequested(_)) => {}
            Err(e) => self.handle_message(TuiMessage::Error(e.to_string())),
        }
        if let Some(reason) = self.ctx.take_pending_refresh() {
            self.start_refresh(reason);
        }
    }

    fn start_refresh(&mut self, reason: RefreshReason) {
        if self.refreshing {
            tracing::debug!(?reason, "refresh queued");
            self.queued = Some(reason);
            return;
        }
        let Some(bridge) = &self.bridge else {
            self.logs.push("[WARN] no metrics sources configured");
            return;
        };
        match bridge.spawn(reason, self.ctx.range()) {
            Ok(_) => self.refreshing = true,
            Err(e) => self.handle_message(TuiMessage::Error(format!("refresh thread: {e}"))),
        }
    }

    fn finish_refresh(&mut self) {
        self.refreshing = false;
        if let Some(reason) = self.queued.take() {
            self.start_refresh(reason);
        }
    }

    fn quit(&mut self) {
        self.should_quit = true;
        if let Some(bridge) = &self.bridge {
            bridge.cancel();
        }
    }

    /// Split the screen into dashboard regions.
    #[must_use]
    pub fn compute_layout(area: Rect, show_logs: bool) -> DashboardLayout {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // header
                Constraint::Length(3),  // cards
                Constraint::Min(10),    // charts
                Constraint::Length(10), // table + logs
                Constraint::Length(2),  // footer
            ])
            .split(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(outer[2]);
        let thirds = [
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ];
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(thirds)
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(thirds)
            .split(rows[1]);

        let (table, logs) = if show_logs {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(outer[3]);
            (split[0], Some(split[1]))
        } else {
            (outer[3], None)
        };

        DashboardLayout {
            header: outer[0],
            cards: outer[1],
            charts: [top[0], top[1], top[2], bottom[0], bottom[1], bottom[2]],
            table,
            logs,
            footer: outer[4],
        }
    }

    /// Render the full TUI view.
    pub fn render(&self, frame: &mut Frame) {
        let layout = Self::compute_layout(frame.area(), self.show_logs);

        render_header(frame, layout.header, &self.ctx, self.refreshing, &self.theme);
        render_cards(
            frame,
            layout.cards,
            &metric_cards(self.ctx.dataset()),
            self.pulse,
            &self.theme,
        );

        let team_chart = self.ctx.team_chart();
        for (id, area) in ChartId::ALL.into_iter().zip(layout.charts) {
            let spec = if id == ChartId::TeamProductivity {
                team_chart.as_ref()
            } else {
                self.ctx.chart(id)
            };
            if let Some(spec) = spec {
                render_chart(frame, area, spec, &self.theme);
            }
        }

        render_table(
            frame,
            layout.table,
            self.active_table,
            &self.ctx.table(self.active_table),
            &self.theme,
        );
        if let Some(area) = layout.logs {
            render_logs(frame, area, &self.logs, &self.theme);
        }
        render_footer(frame, layout.footer, self.status.as_deref(), &self.theme);
    }

    /// Set up the terminal for TUI mode.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    /// Tear down the terminal, restoring normal mode.
    pub fn teardown_terminal(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the TUI event loop.
    ///
    /// The terminal is restored even when drawing fails.
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        Self::teardown_terminal(&mut terminal)?;
        result
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            if self.should_quit {
                return Ok(());
            }

            if event::poll(TICK_RATE)? {
                match event::read()? {
                    Event::Key(key_event) => self.handle_key_action(map_key(key_event)),
                    Event::Resize(width, height) => {
                        self.handle_message(TuiMessage::Resize { width, height });
                    }
                    _ => {}
                }
            } else {
                self.handle_message(TuiMessage::Tick);
            }

            self.update();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use crossbeam_channel::{unbounded, Sender};
    use devpulse_core::controls::{TeamFilter, TimeRange};
    use devpulse_core::dataset::Dataset;
    use devpulse_core::progress::CancellationToken;
    use devpulse_core::series::MetricKey;
    use devpulse_core::source::{MetricsSource, StaticSource};
    use parking_lot::Mutex;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::messages::SourceStatus;

    #[derive(Default)]
    struct MemorySink {
        files: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl DownloadSink for MemorySink {
        fn offer_download(&self, content: &str, filename: &str, _: &str) -> io::Result<PathBuf> {
            self.files
                .lock()
                .push((filename.to_string(), content.to_string()));
            Ok(PathBuf::from("/downloads").join(filename))
        }
    }

    struct ReadOnlySink;

    impl DownloadSink for ReadOnlySink {
        fn offer_download(&self, _: &str, _: &str, _: &str) -> io::Result<PathBuf> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    fn make_app() -> (TuiApp, Sender<TuiMessage>) {
        let (tx, rx) = unbounded();
        let app = TuiApp::new(DashboardContext::default(), rx, Box::<MemorySink>::default());
        (app, tx)
    }

    fn with_bridge() -> (TuiApp, Sender<TuiMessage>) {
        let (tx, rx) = unbounded();
        let sources: Vec<Arc<dyn MetricsSource>> =
            vec![Arc::new(StaticSource::new("github", Duration::ZERO))];
        let bridge =
            RefreshBridge::new(tx.clone(), sources, CancellationToken::new()).with_pacing(false);
        let app = TuiApp::new(DashboardContext::default(), rx, Box::<MemorySink>::default())
            .with_bridge(bridge);
        (app, tx)
    }

    /// Drain messages until the in-flight refresh settles.
    fn settle(app: &mut TuiApp) {
        for _ in 0..200 {
            app.update();
            if !app.refreshing {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("refresh did not finish");
    }

    #[test]
    fn initial_state() {
        let (app, _tx) = make_app();
        assert!(!app.should_quit);
        assert!(app.show_logs);
        assert!(!app.refreshing);
        assert!(!app.pulse);
        assert!(app.logs.is_empty());
        assert_eq!(app.active_table, TableId::Developers);
        assert_eq!(app.ctx().metric(), MetricKey::Lines);
    }

    #[test]
    fn handle_log_message() {
        let (mut app, tx) = make_app();
        tx.send(TuiMessage::Log("test log".to_string())).unwrap();
        app.update();
        assert_eq!(app.logs.len(), 1);
        assert_eq!(app.logs.last().unwrap().text, "test log");
    }

    #[test]
    fn handle_quit() {
        let (mut app, tx) = make_app();
        tx.send(TuiMessage::Quit).unwrap();
        app.update();
        assert!(app.should_quit);
    }

    #[test]
    fn handle_resize() {
        let (mut app, _tx) = make_app();
        app.handle_message(TuiMessage::Resize {
            width: 120,
            height: 40,
        });
        assert_eq!(app.terminal_width, 120);
        assert_eq!(app.terminal_height, 40);
    }

    #[test]
    fn handle_error() {
        let (mut app, _tx) = make_app();
        app.handle_message(TuiMessage::Error("something broke".to_string()));
        assert_eq!(app.errors, ["something broke"]);
        assert!(app.logs.iter().any(|l| l.text.contains("something broke")));
        assert_eq!(app.status.as_deref(), Some("something broke"));
    }

    #[test]
    fn pulse_lasts_one_tick() {
        let (mut app, _tx) = make_app();
        app.handle_message(TuiMessage::Pulse);
        assert!(app.pulse);
        app.handle_message(TuiMessage::Tick);
        assert!(!app.pulse);
    }

    #[test]
    fn refresh_messages_update_context() {
        let (mut app, _tx) = make_app();
        app.handle_message(TuiMessage::RefreshStarted(RefreshReason::Manual));
        assert!(app.refreshing);

        let mut data = Dataset::sample();
        data.dora.mttr_hours = 1.5;
        app.handle_message(TuiMessage::RefreshComplete {
            dataset: Box::new(data),
            sources: vec![SourceStatus {
                name: "atlassian".into(),
                error: Some("timed out".into()),
                duration: Duration::from_millis(7),
            }],
            elapsed: Duration::from_millis(7),
        });
        assert!(!app.refreshing);
        assert!((app.ctx().dataset().dora.mttr_hours - 1.5).abs() < f64::EPSILON);
        assert!(app.ctx().last_updated().is_some());
        assert!(app
            .logs
            .iter()
            .any(|l| l.text == "[WARN] atlassian: timed out"));
    }

    #[test]
    fn refresh_failure_is_reported() {
        let (mut app, _tx) = make_app();
        app.handle_message(TuiMessage::RefreshStarted(RefreshReason::TimeRangeChanged));
        app.handle_message(TuiMessage::RefreshFailed("fetch cancelled".into()));
        assert!(!app.refreshing);
        assert_eq!(app.errors, ["refresh failed: fetch cancelled"]);
    }

    #[test]
    fn metric_keys_switch_series() {
        let (mut app, _tx) = make_app();
        app.handle_message(TuiMessage::KeyPress(KeyAction::SelectMetric(
            MetricKey::Acceptance,
        )));
        assert_eq!(app.ctx().metric(), MetricKey::Acceptance);
        let chart = app.ctx().chart(ChartId::AiGeneration).unwrap();
        assert_eq!(chart.datasets[0].label, "Acceptance Rate %");
    }

    #[test]
    fn team_key_cycles_filter() {
        let (mut app, _tx) = make_app();
        let teams = app.ctx().dataset().team_productivity.teams.clone();
        app.handle_key_action(KeyAction::CycleTeam);
        assert_eq!(app.ctx().team(), &TeamFilter::Team(teams[0].clone()));
        for _ in 1..teams.len() {
            app.handle_key_action(KeyAction::CycleTeam);
        }
        app.handle_key_action(KeyAction::CycleTeam);
        assert_eq!(app.ctx().team(), &TeamFilter::All);
    }

    #[test]
    fn range_keys_without_sources_warn() {
        let (mut app, _tx) = make_app();
        app.handle_key_action(KeyAction::NextRange);
        assert_eq!(app.ctx().range(), TimeRange::Quarter);
        assert!(!app.refreshing);
        assert!(app.logs.last().unwrap().text.contains("no metrics sources"));

        app.handle_key_action(KeyAction::PreviousRange);
        app.handle_key_action(KeyAction::PreviousRange);
        assert_eq!(app.ctx().range(), TimeRange::Week);
    }

    #[test]
    fn refresh_key_runs_bridge() {
        let (mut app, _tx) = with_bridge();
        app.handle_key_action(KeyAction::Refresh);
        assert!(app.refreshing);
        settle(&mut app);
        assert!(app.ctx().last_updated().is_some());
        assert!(app.logs.iter().any(|l| l.text.starts_with("refreshed from 1 sources")));
    }

    #[test]
    fn refresh_during_refresh_is_queued() {
        let (mut app, _tx) = with_bridge();
        app.handle_key_action(KeyAction::Refresh);
        app.handle_key_action(KeyAction::NextRange);
        assert_eq!(app.queued, Some(RefreshReason::TimeRangeChanged));
        settle(&mut app);
        assert!(app.queued.is_none());
    }

    #[test]
    fn export_key_writes_active_table() {
        let sink = MemorySink::default();
        let files = Arc::clone(&sink.files);
        let (_tx, rx) = unbounded();
        let mut app = TuiApp::new(DashboardContext::default(), rx, Box::new(sink));

        app.handle_key_action(KeyAction::SwitchTable);
        assert_eq!(app.active_table, TableId::Projects);
        app.handle_key_action(KeyAction::Export);

        let files = files.lock();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "projects.csv");
        assert!(files[0].1.starts_with("\"Project\",\"AI Adoption\""));
        assert_eq!(
            app.status.as_deref(),
            Some("exported 4 rows to /downloads/projects.csv")
        );
    }

    #[test]
    fn export_failure_becomes_error() {
        let (_tx, rx) = unbounded();
        let mut app = TuiApp::new(DashboardContext::default(), rx, Box::new(ReadOnlySink));
        app.handle_key_action(KeyAction::Export);
        assert_eq!(app.errors.len(), 1);
        assert!(app.errors[0].contains("read-only"));
    }

    #[test]
    fn switch_table_wraps() {
        let (mut app, _tx) = make_app();
        app.handle_key_action(KeyAction::SwitchTable);
        app.handle_key_action(KeyAction::SwitchTable);
        assert_eq!(app.active_table, TableId::Developers);
    }

    #[test]
    fn toggle_logs_and_scroll() {
        let (mut app, _tx) = make_app();
        app.handle_key_action(KeyAction::ToggleLogs);
        assert!(!app.show_logs);
        app.handle_key_action(KeyAction::ToggleLogs);
        assert!(app.show_logs);

        for i in 0..30 {
            app.handle_message(TuiMessage::Log(format!("line {i}")));
        }
        app.handle_key_action(KeyAction::PageUp);
        assert_eq!(app.logs.offset, 19);
        assert!(!app.logs.auto_scroll);
        app.handle_key_action(KeyAction::ScrollUp);
        assert_eq!(app.logs.offset, 18);
        app.handle_key_action(KeyAction::ScrollDown);
        app.handle_key_action(KeyAction::Home);
        assert_eq!(app.logs.offset, 0);
        app.handle_key_action(KeyAction::PageDown);
        assert_eq!(app.logs.offset, 10);
        app.handle_key_action(KeyAction::End);
        assert!(app.logs.auto_scroll);
    }

    #[test]
    fn cancel_key_quits_and_stops_bridge() {
        let (mut app, _tx) = with_bridge();
        app.handle_key_action(KeyAction::None);
        assert!(!app.should_quit);
        app.handle_key_action(KeyAction::Cancel);
        assert!(app.should_quit);
    }

    #[test]
    fn layout_has_every_region() {
        let area = Rect::new(0, 0, 120, 48);
        let layout = TuiApp::compute_layout(area, true);
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.cards.height, 3);
        assert_eq!(layout.footer.height, 2);
        assert!(layout.logs.is_some());
        assert!(layout.charts.iter().all(|r| r.width > 0 && r.height > 0));
        assert_eq!(layout.charts[0].y, layout.charts[2].y);
        assert!(layout.charts[3].y > layout.charts[0].y);

        let no_logs = TuiApp::compute_layout(area, false);
        assert!(no_logs.logs.is_none());
        assert_eq!(no_logs.table.width, 120);
    }

    #[test]
    fn render_full_dashboard() {
        let (app, _tx) = make_app();
        let backend = TestBackend::new(160, 50);
        let mut terminal = Terminal::new(backend).unwrap();
        let buf = terminal.draw(|frame| app.render(frame)).unwrap().buffer.clone();
        let screen: String = (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("DevPulse"));
        assert!(screen.contains("AI Code Generation Trends"));
        assert!(screen.contains("Sarah Chen"));
        assert!(screen.contains("q: quit"));
    }

    #[test]
    fn render_small_terminal_does_not_panic() {
        let (app, _tx) = make_app();
        let backend = TestBackend::new(20, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
