//! Metric card row.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use devpulse_core::cards::MetricCard;

use crate::styles::ColorTheme;

/// Render one bordered box per card, side by side.
///
/// While `pulse` is set the card borders are drawn in the highlight color.
pub fn render_cards(
    frame: &mut Frame,
    area: Rect,
    cards: &[MetricCard],
    pulse: bool,
    theme: &ColorTheme,
) {
    if cards.is_empty() {
        return;
    }
    let count = u32::try_from(cards.len()).unwrap_or(u32::MAX);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(cards.iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);

    let border = if pulse {
        theme.selected_style()
    } else {
        theme.border_style()
    };

    for (card, column) in cards.iter().zip(columns.iter()) {
        let value = Line::styled(
            card.value.clone(),
            theme.series_style(card.color).add_modifier(Modifier::BOLD),
        );
        let paragraph = Paragraph::new(value).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::styled(format!(" {} ", card.title), theme.muted_style()))
                .border_style(border),
        );
        frame.render_widget(paragraph, *column);
    }
}
