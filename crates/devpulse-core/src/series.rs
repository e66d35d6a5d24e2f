//! Metric series registry for the AI generation chart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::DashError;
use crate::palette::PaletteColor;

/// Keys accepted by the series registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    Lines,
    Acceptance,
    Suggestions,
}

impl MetricKey {
    /// All registered keys, in toggle order.
    pub const ALL: [Self; 3] = [Self::Lines, Self::Acceptance, Self::Suggestions];

    /// Registry token for the key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Acceptance => "acceptance",
            Self::Suggestions => "suggestions",
        }
    }

    /// Look up a key by its exact token. Returns `None` for anything else.
    #[must_use]
    pub fn lookup(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == token)
    }

    /// Display label of the series.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Lines => "Lines Generated",
            Self::Acceptance => "Acceptance Rate %",
            Self::Suggestions => "Suggestions Made",
        }
    }

    /// Display color of the series.
    #[must_use]
    pub fn color(self) -> PaletteColor {
        match self {
            Self::Lines => PaletteColor::Primary,
            Self::Acceptance => PaletteColor::Success,
            Self::Suggestions => PaletteColor::Secondary,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| DashError::UnknownMetric(s.to_string()))
    }
}

/// A named numeric sequence plotted as one chart trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub key: MetricKey,
    pub label: String,
    pub values: Vec<f64>,
    pub color: PaletteColor,
}

impl MetricSeries {
    /// Build the series for `key` from a dataset.
    #[must_use]
    pub fn from_dataset(key: MetricKey, data: &Dataset) -> Self {
        let ai = &data.ai_generation;
        let values = match key {
            MetricKey::Lines => &ai.lines_generated,
            MetricKey::Acceptance => &ai.acceptance_rate,
            MetricKey::Suggestions => &ai.suggestions,
        };
        Self {
            key,
            label: key.label().to_string(),
            values: values.clone(),
            color: key.color(),
        }
    }
}

/// Select a series from the sample dataset by registry token.
///
/// Unknown tokens yield `None`; the caller keeps its current chart state.
#[must_use]
pub fn select_series(key: &str) -> Option<MetricSeries> {
    select_series_from(&Dataset::sample(), key)
}

/// Select a series from an arbitrary dataset by registry token.
#[must_use]
pub fn select_series_from(data: &Dataset, key: &str) -> Option<MetricSeries> {
    let series = MetricKey::lookup(key).map(|k| MetricSeries::from_dataset(k, data));
    if series.is_none() {
        tracing::debug!(key, "metric key not in registry");
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceptance_series() {
        let series = select_series("acceptance").unwrap();
        assert_eq!(series.label, "Acceptance Rate %");
        assert_eq!(series.color, PaletteColor::Success);
        assert!(!series.values.is_empty());
        assert_eq!(series.values, vec![68.0, 71.0, 73.0, 75.0, 78.0, 73.0]);
    }

    #[test]
    fn lines_series() {
        let series = select_series("lines").unwrap();
        assert_eq!(series.label, "Lines Generated");
        assert_eq!(series.color, PaletteColor::Primary);
        assert_eq!(series.values[5], 3200.0);
    }

    #[test]
    fn suggestions_series() {
        let series = select_series("suggestions").unwrap();
        assert_eq!(series.label, "Suggestions Made");
        assert_eq!(series.color, PaletteColor::Secondary);
        assert_eq!(series.values.len(), 6);
    }

    #[test]
    fn unknown_key() {
        assert!(select_series("bogus").is_none());
        assert!(select_series("").is_none());
    }

    #[test]
    fn lookup_is_exact() {
        assert!(MetricKey::lookup("Lines").is_none());
        assert!(MetricKey::lookup(" lines").is_none());
        assert_eq!(MetricKey::lookup("lines"), Some(MetricKey::Lines));
    }

    #[test]
    fn from_str_reports_unknown_metric() {
        assert!(matches!(
            "bogus".parse::<MetricKey>(),
            Err(DashError::UnknownMetric(k)) if k == "bogus"
        ));
    }

    #[test]
    fn select_from_custom_dataset() {
        let mut data = Dataset::sample();
        data.ai_generation.suggestions = vec![1.0, 2.0];
        let series = select_series_from(&data, "suggestions").unwrap();
        assert_eq!(series.values, vec![1.0, 2.0]);
    }
}
