//! Chart specifications built from a dataset.
//!
//! A `ChartSpec` describes what to draw, not how. Rendering backends
//! (terminal, text) consume these specs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::RADAR_PRODUCTIVITY_SCALE;
use crate::dataset::Dataset;
use crate::palette::PaletteColor;
use crate::series::MetricSeries;

/// Visual chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Doughnut,
    Bar,
    Radar,
    Pie,
}

impl ChartKind {
    /// Whether each label is a slice of a whole rather than an axis position.
    #[must_use]
    pub fn is_proportional(self) -> bool {
        matches!(self, Self::Doughnut | Self::Pie)
    }
}

/// Identifier of each dashboard chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartId {
    AiGeneration,
    Dora,
    PrPerformance,
    TeamProductivity,
    CodeQuality,
    UsagePatterns,
}

impl ChartId {
    /// All charts in layout order.
    pub const ALL: [Self; 6] = [
        Self::AiGeneration,
        Self::Dora,
        Self::PrPerformance,
        Self::TeamProductivity,
        Self::CodeQuality,
        Self::UsagePatterns,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AiGeneration => "ai-generation",
            Self::Dora => "dora",
            Self::PrPerformance => "pr-performance",
            Self::TeamProductivity => "team-productivity",
            Self::CodeQuality => "code-quality",
            Self::UsagePatterns => "usage-patterns",
        }
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trace of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub values: Vec<f64>,
    /// One color for the whole trace, or one per value for proportional charts.
    pub colors: Vec<PaletteColor>,
}

impl ChartDataset {
    fn single(label: &str, values: Vec<f64>, color: PaletteColor) -> Self {
        Self {
            label: label.to_string(),
            values,
            colors: vec![color],
        }
    }

    /// Color of the value at `index`.
    #[must_use]
    pub fn color_at(&self, index: usize) -> PaletteColor {
        match self.colors.len() {
            0 => PaletteColor::Text,
            1 => self.colors[0],
            n => self.colors[index % n],
        }
    }

    /// Largest value in the trace, or 0 when empty.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Everything needed to draw a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub id: ChartId,
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    /// Incremented every time the chart is redrawn with new data.
    pub revision: u64,
}

impl ChartSpec {
    fn new(id: ChartId, title: &str, kind: ChartKind, labels: &[String]) -> Self {
        Self {
            id,
            title: title.to_string(),
            kind,
            labels: labels.to_vec(),
            datasets: Vec::new(),
            revision: 0,
        }
    }

    fn dataset(mut self, dataset: ChartDataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    /// Point the primary dataset at a different series.
    pub fn set_primary(&mut self, series: &MetricSeries) {
        let dataset = ChartDataset::single(&series.label, series.values.clone(), series.color);
        if let Some(first) = self.datasets.first_mut() {
            *first = dataset;
        } else {
            self.datasets.push(dataset);
        }
        self.touch();
    }

    /// Mark the chart as updated.
    pub fn touch(&mut self) {
        self.revision += 1;
    }

    /// A copy restricted to the category named `label`.
    ///
    /// Returns an unfiltered copy when no category matches.
    #[must_use]
    pub fn only_category(&self, label: &str) -> Self {
        let Some(index) = self.labels.iter().position(|l| l == label) else {
            return self.clone();
        };
        let mut view = self.clone();
        view.labels = vec![self.labels[index].clone()];
        for dataset in &mut view.datasets {
            dataset.values = dataset.values.get(index).copied().into_iter().collect();
            if dataset.colors.len() > 1 {
                dataset.colors = vec![dataset.color_at(index)];
            }
        }
        view
    }
}

/// The six dashboard charts, addressable by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    charts: Vec<ChartSpec>,
}

impl ChartSet {
    /// Build every chart from a dataset.
    #[must_use]
    pub fn build(data: &Dataset) -> Self {
        Self {
            charts: build_charts(data),
        }
    }

    #[must_use]
    pub fn get(&self, id: ChartId) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: ChartId) -> Option<&mut ChartSpec> {
        self.charts.iter_mut().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartSpec> {
        self.charts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Redraw every chart.
    pub fn touch_all(&mut self) {
        for chart in &mut self.charts {
            chart.touch();
        }
    }
}

/// Build the six dashboard charts in layout order.
#[must_use]
pub fn build_charts(data: &Dataset) -> Vec<ChartSpec> {
    let ai = &data.ai_generation;
    let dora = &data.dora;
    let pr = &data.pr_performance;
    let teams = &data.team_productivity;
    let quality = &data.code_quality;
    let usage = &data.usage_patterns;

    let dora_labels: Vec<String> = ["Deployment Frequency", "Lead Time", "MTTR", "Change Failure"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();

    vec![
        ChartSpec::new(
            ChartId::AiGeneration,
            "AI Code Generation Trends",
            ChartKind::Line,
            &ai.labels,
        )
        .dataset(ChartDataset::single(
            "Lines Generated",
            ai.lines_generated.clone(),
            PaletteColor::Primary,
        )),
        ChartSpec::new(ChartId::Dora, "DORA Metrics", ChartKind::Doughnut, &dora_labels).dataset(
            ChartDataset {
                label: "DORA".to_string(),
                values: vec![
                    dora.deployment_frequency,
                    dora.lead_time_days,
                    dora.mttr_hours,
                    dora.change_failure_pct,
                ],
                colors: vec![
                    PaletteColor::Success,
                    PaletteColor::Primary,
                    PaletteColor::Warning,
                    PaletteColor::Error,
                ],
            },
        ),
        ChartSpec::new(
            ChartId::PrPerformance,
            "Pull Request Performance",
            ChartKind::Bar,
            &pr.labels,
        )
        .dataset(ChartDataset::single(
            "PRs Created",
            pr.created.clone(),
            PaletteColor::Primary,
        ))
        .dataset(ChartDataset::single(
            "PRs Merged",
            pr.merged.clone(),
            PaletteColor::Success,
        )),
        ChartSpec::new(
            ChartId::TeamProductivity,
            "Team Productivity",
            ChartKind::Radar,
            &teams.teams,
        )
        .dataset(ChartDataset::single(
            "AI Adoption %",
            teams.ai_adoption.clone(),
            PaletteColor::Primary,
        ))
        .dataset(ChartDataset::single(
            "Productivity Gain",
            teams
                .productivity
                .iter()
                .map(|x| x * RADAR_PRODUCTIVITY_SCALE)
                .collect(),
            PaletteColor::Secondary,
        )),
        ChartSpec::new(
            ChartId::CodeQuality,
            "Code Quality Impact",
            ChartKind::Bar,
            &quality.labels,
        )
        .dataset(ChartDataset::single(
            "Bug Density",
            quality.bug_density.clone(),
            PaletteColor::Error,
        ))
        .dataset(ChartDataset::single(
            "Review Time (hours)",
            quality.code_reviews.clone(),
            PaletteColor::Warning,
        ))
        .dataset(ChartDataset::single(
            "Test Coverage %",
            quality.test_coverage.clone(),
            PaletteColor::Success,
        )),
        ChartSpec::new(
            ChartId::UsagePatterns,
            "AI Usage Patterns",
            ChartKind::Pie,
            &usage.labels,
        )
        .dataset(ChartDataset {
            label: "Usage".to_string(),
            values: usage.shares.clone(),
            colors: vec![
                PaletteColor::Primary,
                PaletteColor::Secondary,
                PaletteColor::Success,
                PaletteColor::Warning,
                PaletteColor::Error,
            ],
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::select_series;

    #[test]
    fn only_doughnut_and_pie_are_proportional() {
        let proportional: Vec<ChartId> = build_charts(&Dataset::sample())
            .iter()
            .filter(|c| c.kind.is_proportional())
            .map(|c| c.id)
            .collect();
        assert_eq!(proportional, [ChartId::Dora, ChartId::UsagePatterns]);
    }

    #[test]
    fn builds_six_charts_in_order() {
        let charts = build_charts(&Dataset::sample());
        let ids: Vec<ChartId> = charts.iter().map(|c| c.id).collect();
        assert_eq!(ids, ChartId::ALL);
        let kinds: Vec<ChartKind> = charts.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            [
                ChartKind::Line,
                ChartKind::Doughnut,
                ChartKind::Bar,
                ChartKind::Radar,
                ChartKind::Bar,
                ChartKind::Pie
            ]
        );
    }

    #[test]
    fn radar_scales_productivity() {
        let set = ChartSet::build(&Dataset::sample());
        let radar = set.get(ChartId::TeamProductivity).unwrap();
        assert_eq!(radar.datasets[1].label, "Productivity Gain");
        assert!((radar.datasets[1].values[0] - 60.0).abs() < 1e-9);
        assert!((radar.datasets[1].values[1] - 70.0).abs() < 1e-9);
    }

    #[test]
    fn set_primary_repoints_first_dataset() {
        let mut set = ChartSet::build(&Dataset::sample());
        let chart = set.get_mut(ChartId::AiGeneration).unwrap();
        let series = select_series("suggestions").unwrap();
        chart.set_primary(&series);
        assert_eq!(chart.datasets.len(), 1);
        assert_eq!(chart.datasets[0].label, "Suggestions Made");
        assert_eq!(chart.datasets[0].colors, vec![PaletteColor::Secondary]);
        assert_eq!(chart.revision, 1);
    }

    #[test]
    fn only_category_filters_values() {
        let set = ChartSet::build(&Dataset::sample());
        let radar = set.get(ChartId::TeamProductivity).unwrap();
        let view = radar.only_category("Mobile");
        assert_eq!(view.labels, vec!["Mobile".to_string()]);
        assert_eq!(view.datasets[0].values, vec![76.0]);
        assert_eq!(view.datasets.len(), 2);
    }

    #[test]
    fn only_category_unknown_label_is_identity() {
        let set = ChartSet::build(&Dataset::sample());
        let radar = set.get(ChartId::TeamProductivity).unwrap();
        assert_eq!(&radar.only_category("QA"), radar);
    }

    #[test]
    fn color_at_cycles_per_value_colors() {
        let set = ChartSet::build(&Dataset::sample());
        let dora = set.get(ChartId::Dora).unwrap();
        assert_eq!(dora.datasets[0].color_at(3), PaletteColor::Error);
        let pr = set.get(ChartId::PrPerformance).unwrap();
        assert_eq!(pr.datasets[0].color_at(5), PaletteColor::Primary);
    }

    #[test]
    fn touch_all_bumps_revisions() {
        let mut set = ChartSet::build(&Dataset::sample());
        set.touch_all();
        assert!(set.iter().all(|c| c.revision == 1));
        assert_eq!(set.len(), 6);
    }
}
