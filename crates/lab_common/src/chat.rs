//! Chat transcript model
//!
//! The transcript is append-only. The only other mutation is a full reset
//! back to the greeting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Greeting shown at startup and after every reset
pub const GREETING: &str = "Hello! I’m your Lab AI Agent. How can I help you today?";

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Ai,
    Chart,
}

/// Dataset a chart message draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Reagents,
    Operations,
    Results,
    Inventory,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Reagents,
        ChartKind::Operations,
        ChartKind::Results,
        ChartKind::Inventory,
    ];

    /// Dataset key, also the JSON file stem
    pub fn key(&self) -> &'static str {
        match self {
            Self::Reagents => "reagents",
            Self::Operations => "operations",
            Self::Results => "results",
            Self::Inventory => "inventory",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Reagents => "Reagent stock vs daily usage",
            Self::Operations => "Daily tests and turnaround",
            Self::Results => "Normal vs abnormal results",
            Self::Inventory => "Stock vs threshold",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "chartType", skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartKind>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: Some(text.into()),
            chart: None,
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            role: Role::Ai,
            text: Some(text.into()),
            chart: None,
        }
    }

    /// A chart entry. `kind` may be `None` when the question was not
    /// routed to any dataset; such an entry renders nothing.
    pub fn chart(kind: Option<ChartKind>) -> Self {
        Self {
            role: Role::Chart,
            text: None,
            chart: kind,
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Ordered log of chat messages, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::ai(GREETING)],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Drop everything and start over from the greeting
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(ChatMessage::ai(GREETING));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}
