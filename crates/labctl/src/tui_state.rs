//! TUI State Management - Central state for the lab assistant's terminal interface
//!
//! Everything drawn on screen comes from this struct.

use crate::turns::TurnEvent;
use lab_common::chart::ChartView;
use lab_common::{ChatMessage, DatasetBundle, Role, Transcript};

/// Input history is capped at this many entries
const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct LabTuiState {
    /// Chat transcript, oldest first
    pub transcript: Transcript,

    /// Datasets, empty until the background load finishes
    pub datasets: DatasetBundle,

    /// Whether the dataset load has finished (successfully or not)
    pub datasets_loaded: bool,

    /// Current input buffer
    pub input: String,

    /// Cursor position in chars
    pub cursor_pos: usize,

    /// Scroll offset for conversation pane, `usize::MAX` pins to bottom
    pub scroll_offset: usize,

    /// Input history for ↑/↓ navigation
    pub input_history: Vec<String>,

    /// Current position in history
    pub history_index: Option<usize>,

    /// Whether help overlay is shown
    pub show_help: bool,

    /// Animation frame for the thinking indicator
    pub thinking_frame: usize,

    /// Session epoch; turn output from older epochs is dropped
    pub epoch: u64,

    /// Turns submitted in this epoch that have not finished
    pub pending_turns: usize,
}

impl Default for LabTuiState {
    fn default() -> Self {
        Self {
            transcript: Transcript::new(),
            datasets: DatasetBundle::default(),
            datasets_loaded: false,
            input: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            input_history: Vec::new(),
            history_index: None,
            show_help: false,
            thinking_frame: 0,
            epoch: 0,
            pending_turns: 0,
        }
    }
}

impl LabTuiState {
    pub fn is_thinking(&self) -> bool {
        self.pending_turns > 0
    }

    pub fn set_datasets(&mut self, datasets: DatasetBundle) {
        self.datasets = datasets;
        self.datasets_loaded = true;
    }

    /// Append the user's question to the transcript and history
    pub fn add_user_message(&mut self, message: String) {
        self.transcript.push(ChatMessage::user(message.clone()));

        if !message.trim().is_empty() {
            self.input_history.push(message);
            if self.input_history.len() > HISTORY_LIMIT {
                self.input_history.remove(0);
            }
        }

        self.history_index = None;
        self.scroll_to_bottom();
    }

    /// Count a turn the runner accepted
    pub fn begin_turn(&mut self) {
        self.pending_turns += 1;
    }

    /// Apply a scripted step. Returns false if it belonged to a cleared session.
    pub fn apply_turn_event(&mut self, event: TurnEvent) -> bool {
        if event.epoch != self.epoch {
            return false;
        }

        self.transcript.push(event.message);
        if event.last {
            self.pending_turns = self.pending_turns.saturating_sub(1);
        }
        self.scroll_to_bottom();
        true
    }

    /// Reset to the greeting and move to a new epoch
    pub fn clear_chat(&mut self, epoch: u64) {
        self.transcript.reset();
        self.input.clear();
        self.cursor_pos = 0;
        self.scroll_offset = 0;
        self.history_index = None;
        self.pending_turns = 0;
        self.epoch = epoch;
    }

    /// Take the input buffer, leaving it empty
    pub fn take_input(&mut self) -> String {
        self.cursor_pos = 0;
        std::mem::take(&mut self.input)
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor_pos);
        self.input.insert(at, c);
        self.cursor_pos += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos == 0 {
            return;
        }
        let at = self.byte_index(self.cursor_pos - 1);
        self.input.remove(at);
        self.cursor_pos -= 1;
    }

    pub fn cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor_pos = (self.cursor_pos + 1).min(self.input.chars().count());
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    /// Most recent chart message that has something to draw
    pub fn latest_chart(&self) -> Option<ChartView> {
        self.transcript
            .messages()
            .iter()
            .rev()
            .filter(|m| m.role == Role::Chart)
            .find_map(|m| m.chart.and_then(|kind| ChartView::build(kind, &self.datasets)))
    }

    pub fn scroll_to_bottom(&mut self) {
        // Rendering clamps this to the real maximum
        self.scroll_offset = usize::MAX;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn history_up(&mut self) {
        if self.input_history.is_empty() {
            return;
        }

        match self.history_index {
            None => {
                let last = self.input_history.len() - 1;
                self.history_index = Some(last);
                self.input = self.input_history[last].clone();
            }
            Some(idx) if idx > 0 => {
                self.history_index = Some(idx - 1);
                self.input = self.input_history[idx - 1].clone();
            }
            _ => {}
        }
        self.cursor_pos = self.input.chars().count();
    }

    pub fn history_down(&mut self) {
        match self.history_index {
            Some(idx) if idx + 1 < self.input_history.len() => {
                self.history_index = Some(idx + 1);
                self.input = self.input_history[idx + 1].clone();
            }
            Some(_) => {
                // Past the newest entry, back to an empty prompt
                self.history_index = None;
                self.input.clear();
            }
            None => {}
        }
        self.cursor_pos = self.input.chars().count();
    }
}
