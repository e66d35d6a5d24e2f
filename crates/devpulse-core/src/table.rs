//! Tabular data as rendered on the dashboard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::DashError;

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    text: String,
}

impl Cell {
    /// Create a cell with the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Raw text as rendered, including surrounding whitespace.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text with surrounding whitespace and byte order marks removed.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.text
            .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Ordered rows of cells. Rows may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    id: Option<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table without an identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with an identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            rows: Vec::new(),
        }
    }

    /// Build a table from rows of anything convertible to cells.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Self {
            id: None,
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Append a row.
    pub fn push_row<C: Into<Cell>>(&mut self, row: impl IntoIterator<Item = C>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Table identifier, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// All rows, header included.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Tables exposed for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableId {
    Developers,
    Projects,
}

impl TableId {
    /// All exportable tables.
    pub const ALL: [Self; 2] = [Self::Developers, Self::Projects];

    /// Stable identifier used for filenames and CLI arguments.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Developers => "developers",
            Self::Projects => "projects",
        }
    }

    /// Heading shown above the table.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Developers => "Top AI-Assisted Developers",
            Self::Projects => "Project AI Impact",
        }
    }

    /// Build the table from a dataset.
    #[must_use]
    pub fn build(self, data: &Dataset) -> Table {
        match self {
            Self::Developers => developers_table(data),
            Self::Projects => projects_table(data),
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableId {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "developers" | "devs" => Ok(Self::Developers),
            "projects" => Ok(Self::Projects),
            other => Err(DashError::UnknownTable(other.to_string())),
        }
    }
}

/// Format an integer with comma thousand separators.
#[must_use]
pub fn format_thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format a chart value: whole numbers get thousand separators, fractions
/// are printed as-is.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub fn format_value(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v >= 0.0 && v < 1e15 {
        format_thousands(v as u64)
    } else {
        format!("{v}")
    }
}

/// Build the developer leaderboard table (header row first).
#[must_use]
pub fn developers_table(data: &Dataset) -> Table {
    let mut table = Table::with_id(TableId::Developers.as_str());
    table.push_row([
        "Developer",
        "AI Lines",
        "Acceptance",
        "PRs",
        "Cycle Time",
        "Score",
    ]);
    for dev in &data.developers {
        table.push_row([
            dev.name.clone(),
            format_thousands(dev.ai_lines),
            format!("{}%", dev.acceptance),
            dev.prs.to_string(),
            dev.cycle_time.clone(),
            dev.score.label().to_string(),
        ]);
    }
    table
}

/// Build the project impact table (header row first).
#[must_use]
pub fn projects_table(data: &Dataset) -> Table {
    let mut table = Table::with_id(TableId::Projects.as_str());
    table.push_row([
        "Project",
        "AI Adoption",
        "Test Coverage",
        "Bug Density",
        "Deploy Frequency",
        "Lead Time",
    ]);
    for project in &data.projects {
        table.push_row([
            project.name.clone(),
            format!("{}%", project.adoption),
            format!("{}%", project.coverage),
            project.bug_density.to_string(),
            project.deploy_freq.clone(),
            project.lead_time.clone(),
        ]);
    }
    table
}
