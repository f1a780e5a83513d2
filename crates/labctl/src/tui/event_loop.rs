//! Event Loop - TUI entry point and event handling

use crate::tui_state::LabTuiState;
use crate::turns::{TurnEvent, TurnRunner};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lab_common::config::LabConfig;
use lab_common::datasets::{self, DatasetBundle};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::render::draw_ui;

/// Messages from background tasks
#[derive(Debug)]
pub enum TuiMessage {
    DatasetsLoaded(DatasetBundle),
}

const TICK: Duration = Duration::from_millis(100);
const WHEEL_LINES: usize = 3;

pub async fn run(config: LabConfig) -> Result<()> {
    enable_raw_mode().map_err(|e| {
        anyhow::anyhow!(
            "Failed to enable raw mode: {}. Ensure you're running in a real terminal (TTY).",
            e
        )
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|e| {
        let _ = disable_raw_mode();
        anyhow::anyhow!("Failed to initialize terminal: {}", e)
    })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, config).await;

    // Always attempt cleanup
    let cleanup_result = restore_terminal(&mut terminal);

    result.and(cleanup_result)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: LabConfig,
) -> Result<()> {
    let mut state = LabTuiState::default();
    let (runner, mut turn_rx) = TurnRunner::spawn(config.pace);
    let (tx, mut rx) = mpsc::channel(4);

    // Datasets load in the background so the greeting shows immediately
    let source = config.data_source();
    tokio::spawn(async move {
        let bundle = datasets::load_or_empty(&source).await;
        let _ = tx.send(TuiMessage::DatasetsLoaded(bundle)).await;
    });

    info!(pace = config.pace, "TUI started");

    loop {
        if state.is_thinking() {
            state.thinking_frame = (state.thinking_frame + 1) % 8;
        }

        while let Ok(msg) = rx.try_recv() {
            match msg {
                TuiMessage::DatasetsLoaded(bundle) => state.set_datasets(bundle),
            }
        }

        while let Ok(event) = turn_rx.try_recv() {
            apply_turn_event(&mut state, event);
        }

        terminal.draw(|f| draw_ui(f, &state))?;

        if !event::poll(TICK)? {
            continue;
        }

        match event::read()? {
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => state.scroll_up(WHEEL_LINES),
                MouseEventKind::ScrollDown => state.scroll_down(WHEEL_LINES),
                _ => {}
            },
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                let page = terminal
                    .size()
                    .map(|s| (s.height / 2) as usize)
                    .unwrap_or(10)
                    .max(1);
                if handle_key(&mut state, &runner, key, page) {
                    break;
                }
            }
            _ => {}
        }
    }

    info!("TUI exiting");
    Ok(())
}

fn apply_turn_event(state: &mut LabTuiState, event: TurnEvent) {
    let epoch = event.epoch;
    if !state.apply_turn_event(event) {
        warn!(epoch, current = state.epoch, "Dropped output from a cleared session");
    }
}

/// Apply one key press. Returns true when the user asked to exit.
pub fn handle_key(
    state: &mut LabTuiState,
    runner: &TurnRunner,
    key: KeyEvent,
    page: usize,
) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => return true,
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
            let epoch = runner.clear();
            state.clear_chat(epoch);
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => state.clear_input(),
        (KeyCode::F(1), _) => state.show_help = !state.show_help,
        (KeyCode::Enter, _) => submit_input(state, runner),
        (KeyCode::Backspace, _) => state.backspace(),
        (KeyCode::Left, _) => state.cursor_left(),
        (KeyCode::Right, _) => state.cursor_right(),
        (KeyCode::Up, _) => state.history_up(),
        (KeyCode::Down, _) => state.history_down(),
        (KeyCode::PageUp, _) => state.scroll_up(page),
        (KeyCode::PageDown, _) => state.scroll_down(page),
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            state.insert_char(c)
        }
        _ => {}
    }
    false
}

fn submit_input(state: &mut LabTuiState, runner: &TurnRunner) {
    if state.input.trim().is_empty() {
        return;
    }

    let question = state.take_input();
    let queued = runner.submit(&question);
    state.add_user_message(question);
    if queued {
        state.begin_turn();
    } else {
        warn!("Turn worker is gone, question was not queued");
    }
}
