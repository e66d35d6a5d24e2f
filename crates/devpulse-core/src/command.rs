//! User commands and their dispatch against a [`DashboardContext`].

use crate::context::DashboardContext;
use crate::controls::{TeamFilter, TimeRange};
use crate::download::{export_table, DownloadSink, ExportReceipt};
use crate::error::DashError;
use crate::refresh::RefreshReason;
use crate::series::select_series_from;
use crate::table::TableId;

/// An action requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Point the AI generation chart at a metric by registry token.
    SelectMetric(String),
    /// Restrict team charts to one team.
    FilterTeam(TeamFilter),
    /// Change the reporting window.
    ChangeTimeRange(TimeRange),
    /// Export a table as CSV.
    ExportTable(TableId),
    /// Re-fetch the dataset.
    Refresh,
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed.
    Unchanged,
    /// The context was updated in place.
    Updated,
    /// A table was written.
    Exported(ExportReceipt),
    /// The caller should run a refresh and feed the result to
    /// [`DashboardContext::apply_refresh`].
    RefreshRequested(RefreshReason),
}

/// Apply `command` to `ctx`.
///
/// Exports go through `sink`; its failure is returned as
/// [`DashError::Export`] and leaves the context untouched.
pub fn dispatch(
    ctx: &mut DashboardContext,
    command: Command,
    sink: &dyn DownloadSink,
) -> Result<Outcome, DashError> {
    tracing::debug!(?command, "dispatch");
    match command {
        Command::SelectMetric(key) => {
            let Some(series) = select_series_from(ctx.dataset(), &key) else {
                return Ok(Outcome::Unchanged);
            };
            ctx.set_metric(&series);
            Ok(Outcome::Updated)
        }
        Command::FilterTeam(team) => {
            if let Some(name) = team.team() {
                if !ctx.has_team(name) {
                    return Err(DashError::Config(format!("unknown team: {name}")));
                }
            }
            if *ctx.team() == team {
                return Ok(Outcome::Unchanged);
            }
            ctx.set_team(team);
            Ok(Outcome::Updated)
        }
        Command::ChangeTimeRange(range) => {
            if ctx.range() == range {
                return Ok(Outcome::Unchanged);
            }
            ctx.set_range(range);
            ctx.request_refresh(RefreshReason::TimeRangeChanged);
            Ok(Outcome::RefreshRequested(RefreshReason::TimeRangeChanged))
        }
        Command::ExportTable(id) => {
            let table = ctx.table(id);
            let receipt = export_table(&table, ctx.quoting(), sink)?;
            Ok(Outcome::Exported(receipt))
        }
        Command::Refresh => {
            ctx.request_refresh(RefreshReason::Manual);
            Ok(Outcome::RefreshRequested(RefreshReason::Manual))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use parking_lot::Mutex;

    use super::*;
    use crate::chart::ChartId;
    use crate::export::Quoting;
    use crate::palette::PaletteColor;
    use crate::series::MetricKey;

    #[derive(Default)]
    struct MemorySink {
        files: Mutex<Vec<(String, String)>>,
    }

    impl DownloadSink for MemorySink {
        fn offer_download(&self, content: &str, filename: &str, _: &str) -> io::Result<PathBuf> {
            self.files.lock().push((filename.into(), content.into()));
            Ok(PathBuf::from(filename))
        }
    }

    struct ReadOnlySink;

    impl DownloadSink for ReadOnlySink {
        fn offer_download(&self, _: &str, _: &str, _: &str) -> io::Result<PathBuf> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn select_metric_repoints_chart() {
        let mut ctx = DashboardContext::default();
        let out = dispatch(
            &mut ctx,
            Command::SelectMetric("acceptance".into()),
            &MemorySink::default(),
        )
        .unwrap();
        assert_eq!(out, Outcome::Updated);
        let ds = &ctx.chart(ChartId::AiGeneration).unwrap().datasets[0];
        assert_eq!(ds.label, "Acceptance Rate %");
        assert_eq!(ds.values, vec![68.0, 71.0, 73.0, 75.0, 78.0, 73.0]);
        assert_eq!(ds.colors, vec![PaletteColor::Success]);
        assert_eq!(ctx.metric(), MetricKey::Acceptance);
    }

    #[test]
    fn unknown_metric_leaves_context_untouched() {
        let mut ctx = DashboardContext::default();
        dispatch(
            &mut ctx,
            Command::SelectMetric("suggestions".into()),
            &MemorySink::default(),
        )
        .unwrap();
        let before = ctx.clone();

        for key in ["bogus", "", "Lines", " lines"] {
            let out = dispatch(
                &mut ctx,
                Command::SelectMetric(key.into()),
                &MemorySink::default(),
            )
            .unwrap();
            assert_eq!(out, Outcome::Unchanged, "key {key:?}");
        }
        assert_eq!(ctx, before);
    }

    #[test]
    fn filter_team() {
        let mut ctx = DashboardContext::default();
        let sink = MemorySink::default();
        let out = dispatch(
            &mut ctx,
            Command::FilterTeam(TeamFilter::Team("Mobile".into())),
            &sink,
        )
        .unwrap();
        assert_eq!(out, Outcome::Updated);
        assert_eq!(ctx.team_chart().unwrap().labels, vec!["Mobile".to_string()]);

        let again = dispatch(
            &mut ctx,
            Command::FilterTeam(TeamFilter::Team("Mobile".into())),
            &sink,
        )
        .unwrap();
        assert_eq!(again, Outcome::Unchanged);

        dispatch(&mut ctx, Command::FilterTeam(TeamFilter::All), &sink).unwrap();
        assert_eq!(ctx.team_chart().unwrap().labels.len(), 4);
    }

    #[test]
    fn filter_unknown_team_is_config_error() {
        let mut ctx = DashboardContext::default();
        let err = dispatch(
            &mut ctx,
            Command::FilterTeam(TeamFilter::Team("Data".into())),
            &MemorySink::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DashError::Config(_)));
        assert_eq!(ctx.team(), &TeamFilter::All);
    }

    #[test]
    fn change_time_range_requests_refresh() {
        let mut ctx = DashboardContext::default();
        let sink = MemorySink::default();
        let out = dispatch(&mut ctx, Command::ChangeTimeRange(TimeRange::Quarter), &sink).unwrap();
        assert_eq!(
            out,
            Outcome::RefreshRequested(RefreshReason::TimeRangeChanged)
        );
        assert_eq!(ctx.range(), TimeRange::Quarter);
        assert_eq!(
            ctx.pending_refresh(),
            Some(RefreshReason::TimeRangeChanged)
        );

        ctx.take_pending_refresh();
        let same = dispatch(&mut ctx, Command::ChangeTimeRange(TimeRange::Quarter), &sink).unwrap();
        assert_eq!(same, Outcome::Unchanged);
        assert!(ctx.pending_refresh().is_none());
    }

    #[test]
    fn refresh_is_manual() {
        let mut ctx = DashboardContext::default();
        let out = dispatch(&mut ctx, Command::Refresh, &MemorySink::default()).unwrap();
        assert_eq!(out, Outcome::RefreshRequested(RefreshReason::Manual));
        assert_eq!(ctx.pending_refresh(), Some(RefreshReason::Manual));
    }

    #[test]
    fn export_writes_named_csv() {
        let mut ctx = DashboardContext::default();
        let sink = MemorySink::default();
        let out = dispatch(&mut ctx, Command::ExportTable(TableId::Projects), &sink).unwrap();
        let Outcome::Exported(receipt) = out else {
            panic!("expected export outcome");
        };
        assert_eq!(receipt.path, PathBuf::from("projects.csv"));
        assert_eq!(receipt.rows, 4);

        let files = sink.files.lock();
        assert_eq!(files[0].0, "projects.csv");
        assert!(files[0]
            .1
            .starts_with("\"Project\",\"AI Adoption\",\"Test Coverage\""));
        assert_eq!(files[0].1.lines().count(), 5);
    }

    #[test]
    fn export_uses_context_quoting() {
        let mut data = crate::dataset::Dataset::sample();
        data.developers[0].name = "Sarah \"SC\" Chen".into();
        let sink = MemorySink::default();

        let mut escaped = DashboardContext::new(data.clone());
        dispatch(&mut escaped, Command::ExportTable(TableId::Developers), &sink).unwrap();
        let mut legacy = DashboardContext::new(data).with_quoting(Quoting::Legacy);
        dispatch(&mut legacy, Command::ExportTable(TableId::Developers), &sink).unwrap();

        let files = sink.files.lock();
        assert!(files[0].1.contains("\"Sarah \"\"SC\"\" Chen\""));
        assert!(files[1].1.contains("\"Sarah \"SC\" Chen\""));
    }

    #[test]
    fn export_failure_surfaces() {
        let mut ctx = DashboardContext::default();
        let before = ctx.clone();
        let err = dispatch(&mut ctx, Command::ExportTable(TableId::Developers), &ReadOnlySink)
            .unwrap_err();
        assert!(matches!(err, DashError::Export(_)));
        assert_eq!(ctx, before);
    }
}
