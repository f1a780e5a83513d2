//! TUI Module
//!
//! - event_loop: entry point, key handling and the async message pump
//! - render: header, conversation, status bar and input drawing
//! - chart: chart messages as text lines and as native widgets
//! - layout: panel geometry
//! - utils: wrapping and the help overlay

pub mod chart;
mod event_loop;
pub mod layout;
mod render;
pub mod utils;

pub use event_loop::{handle_key, run, TuiMessage};
