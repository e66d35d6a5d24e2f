//! Dashboard color palette.

use serde::{Deserialize, Serialize};

/// Named color from the dashboard palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteColor {
    Primary,
    Secondary,
    Success,
    Warning,
    Error,
    Background,
    Text,
}

impl PaletteColor {
    /// Hex value of the color.
    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            Self::Primary => "#7c3aed",
            Self::Secondary => "#06b6d4",
            Self::Success => "#10b981",
            Self::Warning => "#f59e0b",
            Self::Error => "#ef4444",
            Self::Background => "#21262d",
            Self::Text => "#f0f6fc",
        }
    }

    /// Palette name of the color.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Background => "background",
            Self::Text => "text",
        }
    }

    /// RGB components parsed from the hex value.
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        let hex = &self.hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}
