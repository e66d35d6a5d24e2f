//! CLI output formatting and the filesystem download sink.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use devpulse_core::download::DownloadSink;

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Pick the directory exports are written to.
///
/// Order: `explicit`, `$XDG_DOWNLOAD_DIR`, `$HOME/Downloads` when it
/// exists, then the working directory.
#[must_use]
pub fn resolve_download_dir(explicit: Option<&Path>) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_download_dir_from(
        explicit,
        std::env::var_os("XDG_DOWNLOAD_DIR"),
        std::env::var_os("HOME"),
        cwd,
    )
}

fn resolve_download_dir_from(
    explicit: Option<&Path>,
    xdg: Option<OsString>,
    home: Option<OsString>,
    cwd: PathBuf,
) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    xdg.filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            home.map(|home| PathBuf::from(home).join("Downloads"))
                .filter(|d| d.is_dir())
        })
        .unwrap_or(cwd)
}

/// Write `content` to `path`, creating parent directories.
pub fn write_to_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

/// Download sink that drops files into a directory.
#[derive(Debug, Clone)]
pub struct FileSystemDownloader {
    dir: PathBuf,
}

impl FileSystemDownloader {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Sink writing to the resolved download directory.
    #[must_use]
    pub fn from_env(explicit: Option<&Path>) -> Self {
        Self::new(resolve_download_dir(explicit))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for FileSystemDownloader {
    fn offer_download(
        &self,
        content: &str,
        filename: &str,
        mime_type: &str,
    ) -> io::Result<PathBuf> {
        if filename.is_empty()
            || filename.contains(['/', '\\'])
            || filename == "."
            || filename == ".."
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid download filename: {filename:?}"),
            ));
        }
        let path = self.dir.join(filename);
        tracing::debug!(path = %path.display(), mime_type, bytes = content.len(), "writing download");
        write_to_file(&path, content)?;
        Ok(path)
    }
}
