#![no_main]

use libfuzzer_sys::fuzz_target;

use devpulse_core::export::{serialize_with, Quoting};
use devpulse_core::table::Table;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Rows are newline separated, cells tab separated.
    let rows: Vec<Vec<&str>> = text
        .split('\n')
        .take(64)
        .map(|line| line.split('\t').take(16).collect())
        .collect();
    let table = Table::from_rows(rows);

    let escaped = serialize_with(&table, Quoting::Escaped);
    let legacy = serialize_with(&table, Quoting::Legacy);

    // No cell holds a newline, so each row is exactly one line.
    assert_eq!(escaped.split('\n').count(), table.len().max(1));
    assert!(escaped.len() >= legacy.len());
    assert_eq!(escaped, serialize_with(&table, Quoting::Escaped));
});
