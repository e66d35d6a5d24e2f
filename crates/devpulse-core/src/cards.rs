//! Headline metric cards shown above the charts.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::palette::PaletteColor;
use crate::table::format_thousands;

/// One headline figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub color: PaletteColor,
}

impl MetricCard {
    fn new(title: &str, value: String, color: PaletteColor) -> Self {
        Self {
            title: title.to_string(),
            value,
            color,
        }
    }
}

/// Headline cards: the four DORA figures followed by the latest AI week.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn metric_cards(data: &Dataset) -> Vec<MetricCard> {
    let dora = &data.dora;
    let ai = &data.ai_generation;
    let latest = |values: &[f64]| values.last().copied();

    vec![
        MetricCard::new(
            "Deployment Frequency",
            format!("{}/week", dora.deployment_frequency),
            PaletteColor::Success,
        ),
        MetricCard::new(
            "Lead Time",
            format!("{} days", dora.lead_time_days),
            PaletteColor::Primary,
        ),
        MetricCard::new("MTTR", format!("{} hours", dora.mttr_hours), PaletteColor::Warning),
        MetricCard::new(
            "Change Failure Rate",
            format!("{}%", dora.change_failure_pct),
            PaletteColor::Error,
        ),
        MetricCard::new(
            "AI Lines (latest)",
            latest(&ai.lines_generated)
                .map_or_else(|| "n/a".into(), |v| format_thousands(v.max(0.0) as u64)),
            PaletteColor::Primary,
        ),
        MetricCard::new(
            "AI Acceptance (latest)",
            latest(&ai.acceptance_rate).map_or_else(|| "n/a".into(), |v| format!("{v}%")),
            PaletteColor::Success,
        ),
    ]
}
