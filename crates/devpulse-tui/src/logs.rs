//! Log panel: capped entry buffer, scrolling, rendering.

use std::collections::VecDeque;

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Maximum number of retained log entries.
pub const MAX_LOG_ENTRIES: usize = 500;

/// Severity of a log entry, inferred from its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn detect(text: &str) -> Self {
        let trimmed = text.trim_start();
        if trimmed.starts_with("[ERROR]") || trimmed.contains(" ERROR ") {
            Self::Error
        } else if trimmed.starts_with("[WARN]") || trimmed.contains(" WARN ") {
            Self::Warn
        } else {
            Self::Info
        }
    }
}

/// One line in the log panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub time: String,
    pub level: LogLevel,
    pub text: String,
}

/// Log buffer with a scroll position.
///
/// `offset` is the index of the first visible entry. While `auto_scroll`
/// is set, new entries move the view to the bottom.
#[derive(Debug, Clone)]
pub struct LogPanel {
    entries: VecDeque<LogEntry>,
    pub offset: usize,
    pub auto_scroll: bool,
}

impl LogPanel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            offset: 0,
            auto_scroll: true,
        }
    }

    /// Append a line stamped with the local time.
    pub fn push(&mut self, text: impl Into<String>) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        self.push_at(time, text.into());
    }

    fn push_at(&mut self, time: String, text: String) {
        let text = text.trim_end().to_string();
        self.entries.push_back(LogEntry {
            time,
            level: LogLevel::detect(&text),
            text,
        });
        if self.entries.len() > MAX_LOG_ENTRIES {
            self.entries.pop_front();
            self.offset = self.offset.saturating_sub(1);
        }
        if self.auto_scroll {
            self.offset = self.last_index();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    fn last_index(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    pub fn scroll_up(&mut self) {
        self.page_up(1);
    }

    pub fn scroll_down(&mut self) {
        self.page_down(1);
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.auto_scroll = false;
        self.offset = self.offset.saturating_sub(page_size);
    }

    pub fn page_down(&mut self, page_size: usize) {
        self.offset = (self.offset + page_size).min(self.last_index());
        if self.offset >= self.last_index() {
            self.auto_scroll = true;
        }
    }

    pub fn home(&mut self) {
        self.auto_scroll = false;
        self.offset = 0;
    }

    pub fn end(&mut self) {
        self.auto_scroll = true;
        self.offset = self.last_index();
    }
}

impl Default for LogPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the log panel.
///
/// With auto-scroll on, the newest entries fill the panel; otherwise the
/// view starts at `offset`.
pub fn render_logs(frame: &mut Frame, area: Rect, panel: &LogPanel, theme: &ColorTheme) {
    let visible = area.height.saturating_sub(2) as usize;
    let total = panel.len();
    let start = if panel.auto_scroll {
        total.saturating_sub(visible)
    } else {
        panel.offset.min(total.saturating_sub(1))
    };

    let items: Vec<ListItem> = panel
        .iter()
        .skip(start)
        .take(visible)
        .map(|entry| {
            let style = match entry.level {
                LogLevel::Error => theme.error_style(),
                LogLevel::Warn => theme.warning_style(),
                LogLevel::Info => theme.text_style(),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", entry.time), theme.muted_style()),
                Span::styled(entry.text.clone(), style),
            ]))
        })
        .collect();

    let title = if total > visible && !panel.auto_scroll {
        format!(" Logs ({}/{total}) ", start + 1)
    } else {
        " Logs ".to_string()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.border_style()),
    );
    frame.render_widget(list, area);
}
