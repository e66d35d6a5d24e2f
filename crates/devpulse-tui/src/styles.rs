//! TUI styles and color themes.

use ratatui::style::{Color, Modifier, Style};

use devpulse_core::palette::PaletteColor;

/// Terminal color for a palette entry.
#[must_use]
pub fn palette_color(color: PaletteColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// Color theme for the TUI.
pub struct ColorTheme {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub highlight: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            accent: palette_color(PaletteColor::Primary),
            text: palette_color(PaletteColor::Text),
            muted: Color::DarkGray,
            border: Color::Gray,
            highlight: palette_color(PaletteColor::Secondary),
            success: palette_color(PaletteColor::Success),
            warning: palette_color(PaletteColor::Warning),
            error: palette_color(PaletteColor::Error),
        }
    }
}

impl ColorTheme {
    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for a value drawn in a palette color.
    #[must_use]
    pub fn series_style(&self, color: PaletteColor) -> Style {
        Style::default().fg(palette_color(color))
    }

    /// Key hint in the footer.
    #[must_use]
    pub fn key_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected tab or active control.
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }
}
