//! Labctl library - exposes modules for testing

pub mod errors;
pub mod logging;
pub mod oneshot;
pub mod tui;
pub mod tui_state;
pub mod turns;
