//! Terminal styling for CLI display.

use console::{Color, Style};

use devpulse_core::palette::PaletteColor;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Nearest terminal color for a palette entry.
#[must_use]
pub fn terminal_color(color: PaletteColor) -> Color {
    match color {
        PaletteColor::Primary => Color::Blue,
        PaletteColor::Secondary => Color::Magenta,
        PaletteColor::Success => Color::Green,
        PaletteColor::Warning => Color::Yellow,
        PaletteColor::Error => Color::Red,
        PaletteColor::Background => Color::Black,
        PaletteColor::Text => Color::White,
    }
}

/// Styles text, or passes it through unchanged when color is off.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    colors: bool,
}

impl Theme {
    #[must_use]
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    /// Colors unless `NO_COLOR` is set or stdout is not a terminal.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(!is_color_disabled() && console::colors_enabled())
    }

    /// Theme that never emits escape codes.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(self, style: &Style, text: &str) -> String {
        if self.colors {
            style.apply_to(text).force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }

    #[must_use]
    pub fn header(self, text: &str) -> String {
        self.paint(&Style::new().bold().cyan(), &format!("=== {text} ==="))
    }

    #[must_use]
    pub fn section(self, text: &str) -> String {
        self.paint(&Style::new().bold(), text)
    }

    #[must_use]
    pub fn dim(self, text: &str) -> String {
        self.paint(&Style::new().dim(), text)
    }

    #[must_use]
    pub fn palette(self, color: PaletteColor, text: &str) -> String {
        self.paint(&Style::new().fg(terminal_color(color)), text)
    }

    #[must_use]
    pub fn success(self, text: &str) -> String {
        format!("{} {text}", self.paint(&Style::new().green().bold(), "[OK]"))
    }

    #[must_use]
    pub fn warning(self, text: &str) -> String {
        format!("{} {text}", self.paint(&Style::new().yellow().bold(), "[WARN]"))
    }

    #[must_use]
    pub fn error(self, text: &str) -> String {
        format!("{} {text}", self.paint(&Style::new().red().bold(), "[ERROR]"))
    }
}

/// Print an error message to stderr.
pub fn print_error(text: &str) {
    let theme = if is_color_disabled() || !console::colors_enabled_stderr() {
        Theme::plain()
    } else {
        Theme::new(true)
    };
    eprintln!("{}", theme.error(text));
}
