//! Dashboard state owned by the caller and passed to every handler.

use chrono::{DateTime, Local};

use crate::chart::{ChartId, ChartSet, ChartSpec};
use crate::controls::{TeamFilter, TimeRange};
use crate::dataset::Dataset;
use crate::export::Quoting;
use crate::refresh::RefreshReason;
use crate::series::{MetricKey, MetricSeries};
use crate::table::{Table, TableId};

/// Live dashboard state: the data, the charts drawn from it, and the
/// current control selections.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardContext {
    dataset: Dataset,
    charts: ChartSet,
    metric: MetricKey,
    team: TeamFilter,
    range: TimeRange,
    quoting: Quoting,
    last_updated: Option<DateTime<Local>>,
    pending_refresh: Option<RefreshReason>,
}

impl DashboardContext {
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        let charts = ChartSet::build(&dataset);
        Self {
            dataset,
            charts,
            metric: MetricKey::Lines,
            team: TeamFilter::All,
            range: TimeRange::default(),
            quoting: Quoting::default(),
            last_updated: None,
            pending_refresh: None,
        }
    }

    #[must_use]
    pub fn with_quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    #[must_use]
    pub fn chart(&self, id: ChartId) -> Option<&ChartSpec> {
        self.charts.get(id)
    }

    #[must_use]
    pub fn metric(&self) -> MetricKey {
        self.metric
    }

    #[must_use]
    pub fn team(&self) -> &TeamFilter {
        &self.team
    }

    #[must_use]
    pub fn range(&self) -> TimeRange {
        self.range
    }

    #[must_use]
    pub fn quoting(&self) -> Quoting {
        self.quoting
    }

    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    /// Human readable "last updated" stamp, e.g. `2024-05-01 at 09:30:00`.
    #[must_use]
    pub fn last_updated_label(&self) -> String {
        self.last_updated.map_or_else(
            || "never".to_string(),
            |at| format!("{} at {}", at.format("%Y-%m-%d"), at.format("%H:%M:%S")),
        )
    }

    #[must_use]
    pub fn pending_refresh(&self) -> Option<RefreshReason> {
        self.pending_refresh
    }

    /// Take the pending refresh request, clearing it.
    pub fn take_pending_refresh(&mut self) -> Option<RefreshReason> {
        self.pending_refresh.take()
    }

    pub(crate) fn request_refresh(&mut self, reason: RefreshReason) {
        self.pending_refresh = Some(reason);
    }

    /// The team productivity chart with the team filter applied.
    #[must_use]
    pub fn team_chart(&self) -> Option<ChartSpec> {
        let chart = self.charts.get(ChartId::TeamProductivity)?;
        Some(match self.team.team() {
            Some(team) => chart.only_category(team),
            None => chart.clone(),
        })
    }

    /// Build a table from the current dataset.
    #[must_use]
    pub fn table(&self, id: TableId) -> Table {
        id.build(&self.dataset)
    }

    /// Whether `name` is one of the dataset's teams.
    #[must_use]
    pub fn has_team(&self, name: &str) -> bool {
        self.dataset.team_productivity.teams.iter().any(|t| t == name)
    }

    pub(crate) fn set_metric(&mut self, series: &MetricSeries) {
        self.metric = series.key;
        if let Some(chart) = self.charts.get_mut(ChartId::AiGeneration) {
            chart.set_primary(series);
        }
    }

    pub(crate) fn set_team(&mut self, team: TeamFilter) {
        self.team = team;
    }

    pub(crate) fn set_range(&mut self, range: TimeRange) {
        self.range = range;
    }

    /// Replace the dataset with freshly fetched data and redraw.
    ///
    /// The selected metric and filters survive the refresh.
    pub fn apply_refresh(&mut self, dataset: Dataset) {
        self.apply_refresh_at(dataset, Local::now());
    }

    /// As [`apply_refresh`](Self::apply_refresh) with an explicit timestamp.
    pub fn apply_refresh_at(&mut self, dataset: Dataset, at: DateTime<Local>) {
        let mut charts = ChartSet::build(&dataset);
        let series = MetricSeries::from_dataset(self.metric, &dataset);
        if let Some(chart) = charts.get_mut(ChartId::AiGeneration) {
            chart.set_primary(&series);
        }
        let revision = self.charts.iter().map(|c| c.revision).max().unwrap_or(0);
        for id in ChartId::ALL {
            if let Some(chart) = charts.get_mut(id) {
                chart.revision = revision;
            }
        }
        charts.touch_all();
        self.dataset = dataset;
        self.charts = charts;
        self.pending_refresh = None;
        self.last_updated = Some(at);
        tracing::debug!(range = %self.range, "dashboard refreshed");
    }

    /// Stamp the dashboard as up to date without new data.
    pub fn mark_updated(&mut self, at: DateTime<Local>) {
        self.last_updated = Some(at);
    }
}

impl Default for DashboardContext {
    fn default() -> Self {
        Self::new(Dataset::sample())
    }
}
