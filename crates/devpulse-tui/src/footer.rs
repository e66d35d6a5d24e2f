//! TUI footer panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::styles::ColorTheme;

const HINTS: [(&str, &str); 8] = [
    ("q", "quit"),
    ("1-3", "metric"),
    ("t", "team"),
    ("[ ]", "range"),
    ("r", "refresh"),
    ("e", "export"),
    ("Tab", "table"),
    ("l", "logs"),
];

/// Render the footer panel with keyboard shortcuts.
pub fn render_footer(frame: &mut Frame, area: Rect, status: Option<&str>, theme: &ColorTheme) {
    let mut spans = Vec::new();
    for (i, (key, action)) in HINTS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(*key, theme.key_style()));
        spans.push(Span::raw(format!(": {action}")));
    }
    if let Some(status) = status {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(status.to_string(), theme.muted_style()));
    }

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border_style());
    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
