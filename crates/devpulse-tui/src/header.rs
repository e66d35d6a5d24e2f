//! TUI header panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use devpulse_core::context::DashboardContext;

use crate::styles::ColorTheme;

/// Render the header: title, filters, last update and refresh state.
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    ctx: &DashboardContext,
    refreshing: bool,
    theme: &ColorTheme,
) {
    let mut spans = vec![
        Span::styled("DevPulse", theme.title_style()),
        Span::raw(format!(
            " | Range: {} | Team: {} | Metric: {} | Updated: {}",
            ctx.range().label(),
            ctx.team(),
            ctx.metric().label(),
            ctx.last_updated_label()
        )),
    ];
    if refreshing {
        spans.push(Span::styled("  ⟳ refreshing…", theme.warning_style()));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .title(" DevPulse: AI Engineering Analytics ")
        .border_style(theme.border_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn content_row(ctx: &DashboardContext, refreshing: bool) -> String {
        let backend = TestBackend::new(140, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let buf = terminal
            .draw(|frame| {
                let area = frame.area();
                render_header(frame, area, ctx, refreshing, &ColorTheme::default());
            })
            .unwrap();
        (0..buf.area.width)
            .map(|x| buf.buffer[(x, 1)].symbol().to_string())
            .collect()
    }

    #[test]
    fn shows_filters() {
        let row = content_row(&DashboardContext::default(), false);
        assert!(row.starts_with("DevPulse"));
        assert!(row.contains("Range: Last 30 days"));
        assert!(row.contains("Team: All Teams"));
        assert!(row.contains("Updated: never"));
        assert!(!row.contains("refreshing"));
    }

    #[test]
    fn shows_refresh_state() {
        let row = content_row(&DashboardContext::default(), true);
        assert!(row.contains("refreshing"));
    }
}
