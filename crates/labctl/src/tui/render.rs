//! Rendering - header, conversation, input bar and status bar

use crate::tui_state::LabTuiState;
use lab_common::chart::ChartView;
use lab_common::{ChartKind, Role};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::chart::{chart_lines, draw_chart_panel};
use super::layout::{self, clamp_scroll};
use super::utils::{draw_help_overlay, wrap_text};

pub const INPUT_PLACEHOLDER: &str =
    "Ask me about reagents, lab ops, test results, inventory, or root causes...";

const THINKING_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub fn draw_ui(f: &mut Frame, state: &LabTuiState) {
    let size = f.size();
    let latest_chart = state.latest_chart();
    let grid = layout::compute_layout(size, latest_chart.is_some());

    draw_header(f, grid.header);
    draw_conversation_panel(f, grid.conversation, state);
    if let Some(view) = &latest_chart {
        if grid.chart_panel.area() > 0 {
            draw_chart_panel(f, grid.chart_panel, view);
        }
    }
    draw_input_bar(f, grid.input, state);
    draw_status_bar(f, grid.status_bar, state);

    if state.show_help {
        draw_help_overlay(f, size);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            "Lab AI Agent",
            Style::default()
                .fg(Color::Rgb(150, 200, 255))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  v{}", env!("LABCTL_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled("   F1 help · Ctrl+L clear chat", Style::default().fg(Color::DarkGray)),
    ]))
    .style(Style::default().bg(Color::Rgb(0, 0, 0)));

    f.render_widget(header, area);
}

/// Build every transcript line at the given content width
pub fn conversation_lines(state: &LabTuiState, content_width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let bubble_width = (content_width * 3 / 4).max(20).min(content_width.max(1));

    for msg in state.transcript.messages() {
        match msg.role {
            Role::User => {
                for wrapped in wrap_text(msg.text(), bubble_width) {
                    lines.push(
                        Line::from(Span::styled(
                            wrapped,
                            Style::default()
                                .fg(Color::White)
                                .bg(Color::Rgb(59, 130, 246)),
                        ))
                        .alignment(Alignment::Right),
                    );
                }
            }
            Role::Ai => {
                let is_answer = msg.text().starts_with("Final Answer:");
                let style = if is_answer {
                    Style::default().fg(Color::Rgb(100, 255, 100))
                } else {
                    Style::default().fg(Color::Rgb(200, 200, 200))
                };
                for wrapped in wrap_text(msg.text(), bubble_width) {
                    lines.push(Line::from(Span::styled(wrapped, style)));
                }
            }
            Role::Chart => {
                lines.extend(chart_message_lines(state, msg.chart, content_width));
            }
        }
        lines.push(Line::from(""));
    }

    lines
}

/// A chart with no kind or no data renders nothing
fn chart_message_lines(
    state: &LabTuiState,
    kind: Option<ChartKind>,
    width: usize,
) -> Vec<Line<'static>> {
    kind.and_then(|k| ChartView::build(k, &state.datasets))
        .map(|view| chart_lines(&view, width))
        .unwrap_or_default()
}

fn draw_conversation_panel(f: &mut Frame, area: Rect, state: &LabTuiState) {
    let content_width = area.width.saturating_sub(4) as usize;
    let lines = conversation_lines(state, content_width);

    let total_lines = lines.len();
    let visible_lines = area.height.saturating_sub(2) as usize;
    let scroll = clamp_scroll(state.scroll_offset, total_lines, visible_lines);

    let can_scroll_up = scroll > 0;
    let can_scroll_down = scroll + visible_lines < total_lines;
    let indicator = if total_lines > visible_lines {
        format!(
            " {}{} ",
            if can_scroll_up { "▲" } else { " " },
            if can_scroll_down { "▼" } else { " " }
        )
    } else {
        String::new()
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" Conversation{} ", indicator))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(80, 180, 255))),
        )
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));

    f.render_widget(paragraph, area);
}

/// Visible slice of the input and the cursor column inside it. The line
/// scrolls horizontally so the cursor always stays within `width` columns.
pub fn input_window(input: &str, cursor_pos: usize, width: usize) -> (String, usize) {
    let width = width.max(1);
    let skip = (cursor_pos + 1).saturating_sub(width);
    let visible = input.chars().skip(skip).take(width).collect();
    (visible, cursor_pos - skip)
}

fn draw_input_bar(f: &mut Frame, area: Rect, state: &LabTuiState) {
    // Borders plus the "> " prompt
    let text_width = area.width.saturating_sub(4) as usize;
    let (visible, cursor_col) = input_window(&state.input, state.cursor_pos, text_width);

    let content = if state.input.is_empty() {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(visible),
        ])
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Send (Enter) ")
            .border_style(Style::default().fg(Color::Rgb(59, 130, 246))),
    );
    f.render_widget(input, area);

    let col = u16::try_from(cursor_col).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(3).saturating_add(col);
    if x < area.right().saturating_sub(1) {
        f.set_cursor(x, area.y + 1);
    }
}

/// Status bar text, kept separate so it can be tested without a terminal
pub fn status_text(state: &LabTuiState, time: &str) -> String {
    let activity = if state.is_thinking() {
        format!(
            "{} thinking ({} queued)",
            THINKING_FRAMES[state.thinking_frame % THINKING_FRAMES.len()],
            state.pending_turns
        )
    } else {
        "✓ ready".to_string()
    };

    let data = if !state.datasets_loaded {
        "Datasets: loading…".to_string()
    } else if state.datasets.is_empty() {
        "Datasets: unavailable".to_string()
    } else {
        let [r, o, res, i] = state.datasets.counts();
        format!("Datasets: reagents {} · operations {} · results {} · inventory {}", r, o, res, i)
    };

    format!("{} | {} | {}", time, activity, data)
}

fn draw_status_bar(f: &mut Frame, area: Rect, state: &LabTuiState) {
    let time = chrono::Local::now().format("%H:%M:%S").to_string();
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(status_text(state, &time), Style::default().fg(Color::Rgb(180, 180, 180))),
    ]))
    .style(Style::default().bg(Color::Rgb(20, 20, 20)));

    f.render_widget(status, area);
}
