//! Layout - TUI panel geometry
//!
//! Header and status bar are one line each, the input bar three. The chart
//! panel sits to the right of the conversation and is only given space on
//! wide terminals when there is a chart to show.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuiLayout {
    pub header: Rect,
    pub conversation: Rect,
    /// Zero-sized when hidden
    pub chart_panel: Rect,
    pub input: Rect,
    pub status_bar: Rect,
}

const HEADER_HEIGHT: u16 = 1;
const STATUS_BAR_HEIGHT: u16 = 1;
const INPUT_HEIGHT: u16 = 3;

/// Narrower terminals keep the conversation full width
pub const MIN_WIDTH_FOR_CHART_PANEL: u16 = 100;
/// Shorter terminals keep the conversation full width
pub const MIN_HEIGHT_FOR_CHART_PANEL: u16 = 16;

pub fn compute_layout(area: Rect, has_chart: bool) -> TuiLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    let body = rows[1];
    let show_chart = has_chart
        && area.width >= MIN_WIDTH_FOR_CHART_PANEL
        && area.height >= MIN_HEIGHT_FOR_CHART_PANEL;

    let (conversation, chart_panel) = if show_chart {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body);
        (cols[0], cols[1])
    } else {
        (body, Rect::new(0, 0, 0, 0))
    };

    TuiLayout {
        header: rows[0],
        conversation,
        chart_panel,
        input: rows[2],
        status_bar: rows[3],
    }
}

/// Clamp a requested scroll offset to the content
pub fn clamp_scroll(requested: usize, total_lines: usize, visible_lines: usize) -> usize {
    let max_scroll = total_lines.saturating_sub(visible_lines);
    requested.min(max_scroll)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_terminal() {
        let layout = compute_layout(Rect::new(0, 0, 80, 24), true);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.input.height, 3);
        assert_eq!(layout.conversation.height, 19);
        assert_eq!(layout.conversation.width, 80);
        // 80 columns is too narrow for the side panel
        assert_eq!(layout.chart_panel.area(), 0);
    }

    #[test]
    fn test_wide_terminal_with_chart() {
        let layout = compute_layout(Rect::new(0, 0, 160, 40), true);
        assert!(layout.chart_panel.width > 0);
        assert_eq!(layout.conversation.width + layout.chart_panel.width, 160);
        assert_eq!(layout.conversation.y, layout.chart_panel.y);
    }

    #[test]
    fn test_wide_terminal_without_chart() {
        let layout = compute_layout(Rect::new(0, 0, 160, 40), false);
        assert_eq!(layout.chart_panel.area(), 0);
        assert_eq!(layout.conversation.width, 160);
    }

    #[test]
    fn test_panels_do_not_overlap_vertically() {
        let layout = compute_layout(Rect::new(0, 0, 120, 30), true);
        assert_eq!(layout.header.bottom(), layout.conversation.y);
        assert_eq!(layout.conversation.bottom(), layout.input.y);
        assert_eq!(layout.input.bottom(), layout.status_bar.y);
    }

    #[test]
    fn test_clamp_scroll() {
        assert_eq!(clamp_scroll(usize::MAX, 50, 20), 30);
        assert_eq!(clamp_scroll(5, 50, 20), 5);
        assert_eq!(clamp_scroll(5, 10, 20), 0);
    }
}
