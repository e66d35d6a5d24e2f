//! CLI presenters for the dashboard, series, exports and refreshes.

use std::io::{self, Write};

use serde_json::json;

use devpulse_core::cards::metric_cards;
use devpulse_core::chart::{ChartId, ChartSpec};
use devpulse_core::context::DashboardContext;
use devpulse_core::download::ExportReceipt;
use devpulse_core::refresh::FetchResult;
use devpulse_core::series::MetricSeries;
use devpulse_core::table::{format_value, Table, TableId};

use crate::output::format_duration;
use crate::ui::Theme;

/// Renders command results for the terminal.
pub trait Presenter {
    /// Cards, charts and tables for the current context.
    fn present_dashboard(&self, ctx: &DashboardContext, out: &mut dyn Write) -> io::Result<()>;

    /// A single metric series.
    fn present_series(&self, series: &MetricSeries, out: &mut dyn Write) -> io::Result<()>;

    /// The result of a table export.
    fn present_export(&self, receipt: &ExportReceipt, out: &mut dyn Write) -> io::Result<()>;

    /// Per-source refresh results.
    fn present_refresh(&self, results: &[FetchResult], out: &mut dyn Write) -> io::Result<()>;
}

/// Human readable presenter.
pub struct TextPresenter {
    verbose: bool,
    quiet: bool,
    theme: Theme,
}

impl TextPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool, theme: Theme) -> Self {
        Self {
            verbose,
            quiet,
            theme,
        }
    }

    fn write_chart(&self, chart: &ChartSpec, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "{} {}",
            self.theme.section(&chart.title),
            self.theme.dim(&format!("({:?})", chart.kind).to_lowercase())
        )?;
        for dataset in &chart.datasets {
            let points: Vec<String> = chart
                .labels
                .iter()
                .zip(&dataset.values)
                .map(|(label, v)| format!("{label}={}", format_value(*v)))
                .collect();
            let label = self.theme.palette(dataset.color_at(0), &dataset.label);
            writeln!(out, "  {label}: {}", points.join(", "))?;
        }
        if self.verbose {
            writeln!(out, "  {}", self.theme.dim(&format!("revision {}", chart.revision)))?;
        }
        Ok(())
    }

    fn write_table(&self, title: &str, table: &Table, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.theme.section(title))?;
        let columns = table.rows().iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|c| {
                table
                    .rows()
                    .iter()
                    .filter_map(|row| row.get(c))
                    .map(|cell| cell.trimmed().chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        for row in table.rows() {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:<w$}", cell.trimmed(), w = *w))
                .collect();
            writeln!(out, "  {}", line.join("  ").trim_end())?;
        }
        Ok(())
    }
}

impl Presenter for TextPresenter {
    fn present_dashboard(&self, ctx: &DashboardContext, out: &mut dyn Write) -> io::Result<()> {
        if !self.quiet {
            writeln!(out, "{}", self.theme.header("DevPulse: AI Engineering Analytics"))?;
            writeln!(
                out,
                "Range: {} | Team: {} | Updated: {}",
                ctx.range().label(),
                ctx.team(),
                ctx.last_updated_label()
            )?;
            writeln!(out)?;
            for card in metric_cards(ctx.dataset()) {
                writeln!(
                    out,
                    "  {:<24}{}",
                    card.title,
                    self.theme.palette(card.color, &card.value)
                )?;
            }
            writeln!(out)?;
            for chart in ctx.charts().iter() {
                if chart.id == ChartId::TeamProductivity {
                    if let Some(view) = ctx.team_chart() {
                        self.write_chart(&view, out)?;
                    }
                } else {
                    self.write_chart(chart, out)?;
                }
            }
            writeln!(out)?;
        }
        for id in TableId::ALL {
            self.write_table(id.title(), &ctx.table(id), out)?;
        }
        Ok(())
    }

    fn present_series(&self, series: &MetricSeries, out: &mut dyn Write) -> io::Result<()> {
        if self.quiet {
            for v in &series.values {
                writeln!(out, "{v}")?;
            }
            return Ok(());
        }
        writeln!(
            out,
            "{} [{}]",
            self.theme.palette(series.color, &series.label),
            series.key
        )?;
        let values: Vec<String> = series.values.iter().map(|v| format_value(*v)).collect();
        writeln!(out, "  {}", values.join(", "))
    }

    fn present_export(&self, receipt: &ExportReceipt, out: &mut dyn Write) -> io::Result<()> {
        if self.quiet {
            return writeln!(out, "{}", receipt.path.display());
        }
        writeln!(
            out,
            "{}",
            self.theme.success(&format!(
                "exported {} rows ({} bytes) to {}",
                receipt.rows,
                receipt.bytes,
                receipt.path.display()
            ))
        )
    }

    fn present_refresh(&self, results: &[FetchResult], out: &mut dyn Write) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(out, "{}", self.theme.section("Sources"))?;
        for result in results {
            let status = match &result.outcome {
                Ok(_) => self.theme.success(""),
                Err(e) => self.theme.error(&e.to_string()),
            };
            writeln!(
                out,
                "  {:<12} {:>10} {}",
                result.source,
                format_duration(result.duration),
                status.trim_end()
            )?;
        }
        Ok(())
    }
}

/// Machine readable presenter; one JSON document per call.
pub struct JsonPresenter;

fn table_json(table: &Table) -> serde_json::Value {
    let rows: Vec<Vec<&str>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(|c| c.trimmed()).collect())
        .collect();
    json!(rows)
}

fn emit(out: &mut dyn Write, value: &serde_json::Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

impl Presenter for JsonPresenter {
    fn present_dashboard(&self, ctx: &DashboardContext, out: &mut dyn Write) -> io::Result<()> {
        let tables: serde_json::Map<String, serde_json::Value> = TableId::ALL
            .into_iter()
            .map(|id| (id.as_str().to_string(), table_json(&ctx.table(id))))
            .collect();
        let charts: Vec<&ChartSpec> = ctx.charts().iter().collect();
        emit(
            out,
            &json!({
                "range": ctx.range(),
                "range_days": ctx.range().days(),
                "team": ctx.team().team(),
                "metric": ctx.metric(),
                "last_updated": ctx.last_updated().map(|t| t.to_rfc3339()),
                "cards": metric_cards(ctx.dataset()),
                "charts": charts,
                "tables": tables,
            }),
        )
    }

    fn present_series(&self, series: &MetricSeries, out: &mut dyn Write) -> io::Result<()> {
        emit(out, &json!(series))
    }

    fn present_export(&self, receipt: &ExportReceipt, out: &mut dyn Write) -> io::Result<()> {
        emit(
            out,
            &json!({
                "path": receipt.path,
                "rows": receipt.rows,
                "bytes": receipt.bytes,
            }),
        )
    }

    fn present_refresh(&self, results: &[FetchResult], out: &mut dyn Write) -> io::Result<()> {
        let sources: Vec<serde_json::Value> = results
            .iter()
            .map(|r| {
                json!({
                    "source": r.source,
                    "ok": r.outcome.is_ok(),
                    "error": r.outcome.as_ref().err().map(ToString::to_string),
                    "duration_ms": u64::try_from(r.duration.as_millis()).unwrap_or(u64::MAX),
                })
            })
            .collect();
        emit(out, &json!({ "sources": sources }))
    }
}
