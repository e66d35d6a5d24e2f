//! Chart widgets.
//!
//! Trend charts draw as line plots. Category charts (bar and radar) draw
//! as grouped bars, one group per category. Proportional charts (doughnut
//! and pie) draw as horizontal bars, one per slice.

use ratatui::layout::{Direction, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType};
use ratatui::Frame;

use devpulse_core::chart::{ChartDataset, ChartKind, ChartSpec};
use devpulse_core::table::format_value;

use crate::styles::{palette_color, ColorTheme};

/// Bars carry integer heights; values are scaled to keep two decimals.
const BAR_SCALE: f64 = 100.0;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_height(v: f64) -> u64 {
    (v.max(0.0) * BAR_SCALE).round() as u64
}

fn chart_block<'a>(spec: &'a ChartSpec, theme: &ColorTheme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", spec.title), theme.title_style()))
        .border_style(theme.border_style())
}

/// Legend line listing each dataset in its color.
fn legend(spec: &ChartSpec) -> Line<'static> {
    let mut spans = Vec::new();
    for dataset in &spec.datasets {
        spans.push(Span::styled(
            "■ ",
            Style::default().fg(palette_color(dataset.color_at(0))),
        ));
        spans.push(Span::raw(format!("{}  ", dataset.label)));
    }
    Line::from(spans)
}

/// Render one chart into `area`.
pub fn render_chart(frame: &mut Frame, area: Rect, spec: &ChartSpec, theme: &ColorTheme) {
    match spec.kind {
        kind if kind.is_proportional() => render_slices(frame, area, spec, theme),
        ChartKind::Line => render_line(frame, area, spec, theme),
        _ => render_grouped(frame, area, spec, theme),
    }
}

#[allow(clippy::cast_precision_loss)]
fn render_line(frame: &mut Frame, area: Rect, spec: &ChartSpec, theme: &ColorTheme) {
    let points: Vec<Vec<(f64, f64)>> = spec
        .datasets
        .iter()
        .map(|d| {
            d.values
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, *v))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = spec
        .datasets
        .iter()
        .zip(&points)
        .map(|(d, data)| {
            Dataset::default()
                .name(d.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(palette_color(d.color_at(0))))
                .data(data)
        })
        .collect();

    let max = spec
        .datasets
        .iter()
        .map(ChartDataset::max)
        .fold(0.0_f64, f64::max);
    let y_top = if max > 0.0 { max * 1.1 } else { 1.0 };
    let x_max = spec.labels.len().saturating_sub(1).max(1) as f64;

    let x_labels: Vec<Span> = match (spec.labels.first(), spec.labels.last()) {
        (Some(first), Some(last)) if spec.labels.len() > 1 => {
            vec![Span::raw(first.clone()), Span::raw(last.clone())]
        }
        (Some(only), _) => vec![Span::raw(only.clone())],
        _ => Vec::new(),
    };

    let chart = Chart::new(datasets)
        .block(chart_block(spec, theme))
        .x_axis(
            Axis::default()
                .style(theme.muted_style())
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.muted_style())
                .bounds([0.0, y_top])
                .labels(vec![Span::raw("0"), Span::raw(format_value(y_top.round()))]),
        );
    frame.render_widget(chart, area);
}

fn render_grouped(frame: &mut Frame, area: Rect, spec: &ChartSpec, theme: &ColorTheme) {
    let groups: Vec<BarGroup> = spec
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let bars: Vec<Bar> = spec
                .datasets
                .iter()
                .filter_map(|d| {
                    let v = *d.values.get(i)?;
                    Some(
                        Bar::default()
                            .value(bar_height(v))
                            .text_value(format_value(v))
                            .style(Style::default().fg(palette_color(d.color_at(i)))),
                    )
                })
                .collect();
            BarGroup::default()
                .label(Line::from(label.clone()))
                .bars(&bars)
        })
        .collect();

    let series = spec.datasets.len().max(1);
    let inner_width = usize::from(area.width.saturating_sub(2));
    let per_group = inner_width / spec.labels.len().max(1);
    let bar_width = u16::try_from((per_group.saturating_sub(2) / series).clamp(1, 8)).unwrap_or(1);

    let mut chart = BarChart::default()
        .block(chart_block(spec, theme).title_bottom(legend(spec)))
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(1)
        .value_style(theme.text_style());
    for group in groups {
        chart = chart.data(group);
    }
    frame.render_widget(chart, area);
}

fn render_slices(frame: &mut Frame, area: Rect, spec: &ChartSpec, theme: &ColorTheme) {
    let Some(dataset) = spec.datasets.first() else {
        frame.render_widget(chart_block(spec, theme), area);
        return;
    };
    let total: f64 = dataset.values.iter().filter(|v| **v > 0.0).sum();
    let bars: Vec<Bar> = spec
        .labels
        .iter()
        .zip(&dataset.values)
        .enumerate()
        .map(|(i, (label, v))| {
            let text = if spec.kind == ChartKind::Pie && total > 0.0 {
                format!("{:.0}%", v / total * 100.0)
            } else {
                format_value(*v)
            };
            Bar::default()
                .label(Line::from(label.clone()))
                .value(bar_height(*v))
                .text_value(text)
                .style(Style::default().fg(palette_color(dataset.color_at(i))))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(spec, theme))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .value_style(theme.text_style())
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}
