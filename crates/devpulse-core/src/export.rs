//! Table to delimited text conversion.
//!
//! Every field is wrapped in double quotes, fields are joined with `,`
//! and rows with `\n`. There is no trailing newline. Ragged rows are
//! written as-is.

use serde::{Deserialize, Serialize};

use crate::constants::{CSV_EXTENSION, DEFAULT_EXPORT_STEM};
use crate::table::Table;

/// Field delimiter.
pub const DELIMITER: char = ',';

/// Row terminator.
pub const LINE_TERMINATOR: char = '\n';

/// How embedded quote characters are handled inside a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quoting {
    /// Double every embedded `"` (RFC 4180).
    #[default]
    Escaped,
    /// Insert the trimmed text verbatim between the quotes.
    ///
    /// Byte-compatible with exports produced by the web dashboard, but
    /// yields malformed CSV for cells containing `"`.
    Legacy,
}

/// Serialize a table with the default quoting mode.
#[must_use]
pub fn serialize(table: &Table) -> String {
    serialize_with(table, Quoting::default())
}

/// Serialize a table with an explicit quoting mode.
#[must_use]
pub fn serialize_with(table: &Table, quoting: Quoting) -> String {
    let mut out = String::new();
    for (i, row) in table.rows().iter().enumerate() {
        if i > 0 {
            out.push(LINE_TERMINATOR);
        }
        for (j, cell) in row.iter().enumerate() {
            if j > 0 {
                out.push(DELIMITER);
            }
            push_field(&mut out, cell.trimmed(), quoting);
        }
    }
    out
}

fn push_field(out: &mut String, text: &str, quoting: Quoting) {
    out.push('"');
    match quoting {
        Quoting::Escaped => {
            for c in text.chars() {
                if c == '"' {
                    out.push('"');
                }
                out.push(c);
            }
        }
        Quoting::Legacy => out.push_str(text),
    }
    out.push('"');
}

/// Filename an exported table is offered under.
#[must_use]
pub fn export_filename(table: &Table) -> String {
    let stem = table
        .id()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_EXPORT_STEM);
    format!("{stem}.{CSV_EXTENSION}")
}
