//! One-shot mode - play a single turn to stdout
//!
//! Same turn script as the TUI, printed line by line as each step comes
//! due. Charts print as text.

use crate::tui::chart::{chart_lines, plain_text};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use lab_common::chart::ChartView;
use lab_common::config::LabConfig;
use lab_common::datasets::{self, DatasetBundle};
use lab_common::script::TurnScript;
use lab_common::{ChatMessage, Role};
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use tracing::info;

/// Width used for text charts
const CHART_WIDTH: usize = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    /// One JSON object per transcript entry
    Json,
}

pub struct OneShot {
    pub format: OutputFormat,
    pub color: bool,
    pub spinner: bool,
}

impl OneShot {
    pub fn for_stdout(format: OutputFormat) -> Self {
        let tty = io::stdout().is_terminal();
        Self {
            format,
            color: tty && format == OutputFormat::Text,
            spinner: tty && format == OutputFormat::Text,
        }
    }

    /// Play `script` for `question`, writing each entry to `out`
    pub async fn play<W: Write>(
        &self,
        out: &mut W,
        question: &str,
        script: TurnScript,
        data: &DatasetBundle,
    ) -> Result<()> {
        self.emit(out, &ChatMessage::user(question), data)?;

        for step in script.steps {
            self.wait(step.delay).await;
            self.emit(out, &step.message, data)?;
        }
        Ok(())
    }

    async fn wait(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        if !self.spinner {
            tokio::time::sleep(delay).await;
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                .template("{spinner:.magenta} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("lab agent (thinking)...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        tokio::time::sleep(delay).await;
        spinner.finish_and_clear();
    }

    fn emit<W: Write>(&self, out: &mut W, message: &ChatMessage, data: &DatasetBundle) -> Result<()> {
        if self.format == OutputFormat::Json {
            writeln!(out, "{}", serde_json::to_string(message)?)?;
            return Ok(());
        }

        match message.role {
            Role::User => {
                if self.color {
                    writeln!(out, "{} {}", "You:".bright_blue().bold(), message.text())?;
                } else {
                    writeln!(out, "You: {}", message.text())?;
                }
            }
            Role::Ai => {
                if self.color {
                    writeln!(out, "{} {}", "Agent:".bright_green().bold(), message.text())?;
                } else {
                    writeln!(out, "Agent: {}", message.text())?;
                }
            }
            Role::Chart => {
                let view = message.chart.and_then(|kind| ChartView::build(kind, data));
                if let Some(view) = view {
                    for line in plain_text(&chart_lines(&view, CHART_WIDTH)) {
                        writeln!(out, "{}", line)?;
                    }
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}

/// `labctl ask`: load datasets, play one turn on stdout
pub async fn ask(config: &LabConfig, question: &str, format: OutputFormat) -> Result<()> {
    if question.trim().is_empty() {
        anyhow::bail!("Question is empty");
    }

    let data = datasets::load_or_empty(&config.data_source()).await;
    let script = TurnScript::plan(question, &mut rand::thread_rng()).scaled(config.pace);
    info!(steps = script.len(), "Playing one-shot turn");

    let oneshot = OneShot::for_stdout(format);
    let mut stdout = io::stdout();
    oneshot.play(&mut stdout, question, script, &data).await
}
