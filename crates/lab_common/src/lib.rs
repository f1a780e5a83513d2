//! Lab Common - shared types and logic for the lab assistant
//!
//! Everything here is free of terminal concerns so both the TUI and the
//! one-shot command drive the same transcript, responder and turn script.

pub mod chart;
pub mod chat;
pub mod config;
pub mod datasets;
pub mod error;
pub mod responder;
pub mod router;
pub mod script;

pub use chat::{ChartKind, ChatMessage, Role, Transcript};
pub use datasets::DatasetBundle;
pub use error::LabError;
