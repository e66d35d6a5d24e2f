//! Shared helpers for workspace-level integration tests.

use serde::Deserialize;

use devpulse_core::{Dataset, Quoting, Table, TableId};

/// Contents of `tests/testdata/export_golden.json`.
#[derive(Debug, Deserialize)]
pub struct GoldenFile {
    pub description: String,
    pub cases: Vec<GoldenCase>,
}

/// One expected export: either a named sample table or literal rows.
#[derive(Debug, Deserialize)]
pub struct GoldenCase {
    pub name: String,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub rows: Option<Vec<Vec<String>>>,
    pub quoting: Quoting,
    pub expected: String,
}

impl GoldenCase {
    /// The table this case serializes.
    ///
    /// # Panics
    ///
    /// Panics when the case names an unknown table.
    #[must_use]
    pub fn table(&self) -> Table {
        match (&self.table, &self.rows) {
            (Some(id), _) => {
                let id: TableId = id
                    .parse()
                    .unwrap_or_else(|e| panic!("case {}: {e}", self.name));
                id.build(&Dataset::sample())
            }
            (None, Some(rows)) => Table::from_rows(rows.iter().map(|r| r.iter().map(String::as_str))),
            (None, None) => Table::new(),
        }
    }
}

/// Load the export golden file.
///
/// # Panics
///
/// Panics when the file is missing or malformed.
#[must_use]
pub fn load_export_golden() -> GoldenFile {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/export_golden.json");
    let data = std::fs::read_to_string(path).expect("failed to read golden file");
    serde_json::from_str(&data).expect("failed to parse golden JSON")
}
