//! Golden file integration tests.
//!
//! Reads tests/testdata/export_golden.json and checks every case against
//! the serializer, the dispatcher and a CSV reader.

use std::io;
use std::path::PathBuf;

use parking_lot::Mutex;

use devpulse_core::{
    dispatch, serialize_with, Command, DashboardContext, DownloadSink, Outcome, Quoting, TableId,
};
use devpulse_tests::load_export_golden;

#[derive(Default)]
struct MemorySink {
    files: Mutex<Vec<(String, String)>>,
}

impl DownloadSink for MemorySink {
    fn offer_download(&self, content: &str, filename: &str, _: &str) -> io::Result<PathBuf> {
        self.files
            .lock()
            .push((filename.to_string(), content.to_string()));
        Ok(PathBuf::from(filename))
    }
}

#[test]
fn golden_file_has_cases() {
    let golden = load_export_golden();
    assert!(!golden.description.is_empty());
    assert!(golden.cases.len() >= 6);
}

#[test]
fn serializer_matches_golden() {
    for case in load_export_golden().cases {
        let actual = serialize_with(&case.table(), case.quoting);
        assert_eq!(actual, case.expected, "case {}", case.name);
    }
}

#[test]
fn dispatch_export_matches_golden() {
    for case in load_export_golden().cases {
        let Some(name) = &case.table else { continue };
        let id: TableId = name.parse().unwrap();
        let mut ctx = DashboardContext::default().with_quoting(case.quoting);
        let sink = MemorySink::default();

        let outcome = dispatch(&mut ctx, Command::ExportTable(id), &sink).unwrap();
        let Outcome::Exported(receipt) = outcome else {
            panic!("case {}: expected export, got {outcome:?}", case.name);
        };
        assert_eq!(receipt.bytes, case.expected.len());

        let files = sink.files.lock();
        assert_eq!(files[0].0, format!("{name}.csv"));
        assert_eq!(files[0].1, case.expected, "case {}", case.name);
    }
}

#[test]
fn escaped_cases_parse_as_csv() {
    for case in load_export_golden().cases {
        if case.quoting != Quoting::Escaped || case.expected.is_empty() {
            continue;
        }
        let table = case.table();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(case.expected.as_bytes());
        let parsed: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        let expected: Vec<Vec<String>> = table
            .rows()
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| row.iter().map(|c| c.trimmed().to_string()).collect())
            .collect();
        assert_eq!(parsed, expected, "case {}", case.name);
    }
}
