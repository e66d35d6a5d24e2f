//! Boundary for offering exported documents to the user.

use std::io;
use std::path::PathBuf;

use crate::constants::CSV_MIME;
use crate::export::{export_filename, serialize_with, Quoting};
use crate::table::Table;

/// Receives a finished document and makes it available to the user.
///
/// Implementations make a single attempt and report failure through the
/// returned error; no handle to the content is kept after returning.
pub trait DownloadSink: Send + Sync {
    /// Offer `content` under `filename`. Returns where the document landed.
    fn offer_download(&self, content: &str, filename: &str, mime_type: &str)
        -> io::Result<PathBuf>;
}

/// Summary of a completed table export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub path: PathBuf,
    /// Data rows written; the header row is not counted.
    pub rows: usize,
    pub bytes: usize,
}

/// Serialize `table` and hand it to `sink` as CSV.
pub fn export_table(
    table: &Table,
    quoting: Quoting,
    sink: &dyn DownloadSink,
) -> io::Result<ExportReceipt> {
    let content = serialize_with(table, quoting);
    let filename = export_filename(table);
    let path = sink.offer_download(&content, &filename, CSV_MIME)?;
    let rows = table.len().saturating_sub(1);
    tracing::info!(path = %path.display(), rows, ?quoting, "table exported");
    Ok(ExportReceipt {
        path,
        rows,
        bytes: content.len(),
    })
}
