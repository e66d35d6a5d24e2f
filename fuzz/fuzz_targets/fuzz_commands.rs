#![no_main]

use std::io;
use std::path::PathBuf;

use libfuzzer_sys::fuzz_target;

use devpulse_core::command::{dispatch, Command, Outcome};
use devpulse_core::context::DashboardContext;
use devpulse_core::controls::TeamFilter;
use devpulse_core::download::DownloadSink;

struct NullSink;

impl DownloadSink for NullSink {
    fn offer_download(&self, _: &str, filename: &str, _: &str) -> io::Result<PathBuf> {
        Ok(PathBuf::from(filename))
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(token) = std::str::from_utf8(data) else {
        return;
    };
    let mut ctx = DashboardContext::default();
    let before = ctx.clone();

    // Unknown metric keys leave the context untouched.
    if let Ok(Outcome::Unchanged) = dispatch(&mut ctx, Command::SelectMetric(token.into()), &NullSink) {
        assert_eq!(ctx, before);
    }

    if let Ok(team) = token.parse::<TeamFilter>() {
        let _ = dispatch(&mut ctx, Command::FilterTeam(team), &NullSink);
    }
});
