//! # devpulse-tui
//!
//! Interactive terminal dashboard using ratatui with Elm architecture.

pub mod bridge;
pub mod cards;
pub mod charts;
pub mod footer;
pub mod header;
pub mod keymap;
pub mod logs;
pub mod messages;
pub mod model;
pub mod styles;
pub mod tables;

pub use bridge::{spawn_pulse, ChannelWriter, RefreshBridge};
pub use keymap::KeyAction;
pub use logs::LogPanel;
pub use messages::TuiMessage;
pub use model::TuiApp;
