//! # devpulse-cli
//!
//! Non-interactive output: text and JSON presenters, the filesystem
//! download sink, the refresh spinner, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod spinner;
pub mod ui;

pub use output::FileSystemDownloader;
pub use presenter::{JsonPresenter, Presenter, TextPresenter};
