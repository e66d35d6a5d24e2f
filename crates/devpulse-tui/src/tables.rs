//! Tabbed table panel.

use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Row, Table as TableWidget};
use ratatui::Frame;

use devpulse_core::table::{Table, TableId};

use crate::styles::ColorTheme;

/// Tab strip naming every table, with `active` highlighted.
fn tab_line(active: TableId, theme: &ColorTheme) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for id in TableId::ALL {
        let style = if id == active {
            theme.selected_style()
        } else {
            theme.muted_style()
        };
        spans.push(Span::styled(id.title(), style));
        spans.push(Span::raw(" │ "));
    }
    spans.pop();
    spans.push(Span::raw(" "));
    Line::from(spans)
}

/// Column widths sized to the longest cell in each column.
fn column_widths(table: &Table) -> Vec<Constraint> {
    let columns = table.rows().iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|c| {
            let width = table
                .rows()
                .iter()
                .filter_map(|row| row.get(c))
                .map(|cell| cell.trimmed().chars().count())
                .max()
                .unwrap_or(0);
            Constraint::Length(u16::try_from(width).unwrap_or(u16::MAX))
        })
        .collect()
}

/// Render `table` (header row first) under a tab strip.
pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    active: TableId,
    table: &Table,
    theme: &ColorTheme,
) {
    let mut rows = table.rows().iter().map(|row| {
        Row::new(
            row.iter()
                .map(|cell| cell.trimmed().to_string())
                .collect::<Vec<_>>(),
        )
    });
    let header = rows.next().map(|row| row.style(theme.title_style()));
    let body: Vec<Row> = rows.collect();

    let mut widget = TableWidget::new(body, column_widths(table))
        .column_spacing(2)
        .style(theme.text_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(tab_line(active, theme))
                .title_bottom(Line::from(" e: export  Tab: switch ").right_aligned())
                .border_style(theme.border_style()),
        );
    if let Some(header) = header {
        widget = widget.header(header);
    }
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use devpulse_core::dataset::Dataset;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(width: u16, height: u16, active: TableId, table: &Table) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let frame = terminal
            .draw(|frame| {
                let area = frame.area();
                render_table(frame, area, active, table, &ColorTheme::default());
            })
            .unwrap();
        let buf = frame.buffer;
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn developers_table_renders_rows() {
        let table = TableId::Developers.build(&Dataset::sample());
        let out = screen(100, 10, TableId::Developers, &table);
        assert!(out.contains("Developer"));
        assert!(out.contains("Sarah Chen"));
        assert!(out.contains("4,200"));
        assert!(out.contains("Project AI Impact"));
    }

    #[test]
    fn projects_table_renders_rows() {
        let table = TableId::Projects.build(&Dataset::sample());
        let out = screen(110, 8, TableId::Projects, &table);
        assert!(out.contains("API Gateway"));
        assert!(out.contains("2.3/week"));
    }

    #[test]
    fn empty_table_renders() {
        screen(40, 5, TableId::Projects, &Table::new());
    }

    #[test]
    fn widths_follow_longest_cell() {
        let table = Table::from_rows(vec![vec!["a", " bbb "], vec!["cccc"]]);
        assert_eq!(
            column_widths(&table),
            vec![Constraint::Length(4), Constraint::Length(3)]
        );
    }
}
