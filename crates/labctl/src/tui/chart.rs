//! Chart rendering - chart messages as transcript lines and as widgets
//!
//! The transcript gets a compact text rendering that scrolls with the
//! conversation. The side panel draws the latest chart with ratatui's
//! `BarChart` and `Chart` widgets.

use lab_common::chart::{ChartShape, ChartView};
use lab_common::ChartKind;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

const GREEN: Color = Color::Rgb(130, 202, 157);
const PURPLE: Color = Color::Rgb(136, 132, 216);
const RED: Color = Color::Rgb(255, 127, 127);

const SPARK_TICKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Series colours follow the dashboard palette per chart
pub fn series_color(kind: ChartKind, index: usize) -> Color {
    let palette = match kind {
        ChartKind::Reagents => [GREEN, PURPLE],
        ChartKind::Operations => [PURPLE, GREEN],
        ChartKind::Results => [GREEN, RED],
        ChartKind::Inventory => [PURPLE, RED],
    };
    palette[index % palette.len()]
}

pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn bar(value: f64, max: f64, width: usize) -> String {
    let len = if max > 0.0 {
        ((value.max(0.0) / max) * width as f64).round() as usize
    } else {
        0
    };
    "█".repeat(len.min(width))
}

fn sparkline(values: &[f64]) -> String {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    values
        .iter()
        .map(|v| {
            let idx = if span > 0.0 {
                (((v - min) / span) * (SPARK_TICKS.len() - 1) as f64).round() as usize
            } else {
                SPARK_TICKS.len() / 2
            };
            SPARK_TICKS[idx.min(SPARK_TICKS.len() - 1)]
        })
        .collect()
}

fn title_line(view: &ChartView) -> Line<'static> {
    Line::from(Span::styled(
        format!("▌ {}", view.kind.title()),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
}

fn legend_line(view: &ChartView) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (i, series) in view.series.iter().enumerate() {
        spans.push(Span::styled("■ ", Style::default().fg(series_color(view.kind, i))));
        spans.push(Span::styled(
            format!("{}   ", series.name),
            Style::default().fg(Color::Gray),
        ));
    }
    Line::from(spans)
}

/// Text rendering of a chart for the transcript, `width` in columns
pub fn chart_lines(view: &ChartView, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![title_line(view)];
    match view.shape {
        ChartShape::Bar => bar_lines(view, width, &mut lines),
        ChartShape::Line => trend_lines(view, width, &mut lines),
        ChartShape::Pie => share_lines(view, width, &mut lines),
    }
    lines
}

fn label_width(view: &ChartView, cap: usize) -> usize {
    view.labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .min(cap)
}

fn fit(label: &str, width: usize) -> String {
    let truncated: String = label.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}

fn bar_lines(view: &ChartView, width: usize, lines: &mut Vec<Line<'static>>) {
    lines.push(legend_line(view));

    let label_w = label_width(view, 16);
    let value_w = view
        .series
        .iter()
        .flat_map(|s| s.values.iter().map(|v| format_value(*v).len()))
        .max()
        .unwrap_or(1);
    let bar_w = width.saturating_sub(label_w + value_w + 4).max(1);
    let max = view.max_value();

    for (i, label) in view.labels.iter().enumerate() {
        for (s, series) in view.series.iter().enumerate() {
            let value = series.values.get(i).copied().unwrap_or(0.0);
            let name = if s == 0 { fit(label, label_w) } else { " ".repeat(label_w) };
            lines.push(Line::from(vec![
                Span::raw(format!("  {} ", name)),
                Span::styled(bar(value, max, bar_w), Style::default().fg(series_color(view.kind, s))),
                Span::raw(format!(" {}", format_value(value))),
            ]));
        }
    }
}

fn trend_lines(view: &ChartView, width: usize, lines: &mut Vec<Line<'static>>) {
    if let (Some(first), Some(last)) = (view.labels.first(), view.labels.last()) {
        lines.push(Line::from(Span::styled(
            format!("  {} → {}", first, last),
            Style::default().fg(Color::Gray),
        )));
    }

    let name_w = view.series.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for (s, series) in view.series.iter().enumerate() {
        let min = series.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = series.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let latest = series.values.last().copied().unwrap_or(0.0);
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<w$} ", series.name, w = name_w)),
            Span::styled(sparkline(&series.values), Style::default().fg(series_color(view.kind, s))),
            Span::styled(
                format!(
                    "  latest {}  range {}–{}",
                    format_value(latest),
                    format_value(min),
                    format_value(max)
                ),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    // Per-day rows, one bar per series, each series scaled to its own max
    let label_w = label_width(view, 12);
    let per_series_w = (width.saturating_sub(label_w + 4) / view.series.len().max(1))
        .saturating_sub(8)
        .max(1);
    for (i, label) in view.labels.iter().enumerate() {
        let mut spans = vec![Span::raw(format!("  {} ", fit(label, label_w)))];
        for (s, series) in view.series.iter().enumerate() {
            let max = series.values.iter().copied().fold(1.0, f64::max);
            let value = series.values.get(i).copied().unwrap_or(0.0);
            let drawn = bar(value, max, per_series_w);
            let pad = per_series_w - drawn.chars().count();
            spans.push(Span::styled(drawn, Style::default().fg(series_color(view.kind, s))));
            spans.push(Span::raw(format!("{} {:<6}", " ".repeat(pad), format_value(value))));
        }
        lines.push(Line::from(spans));
    }
}

fn share_lines(view: &ChartView, width: usize, lines: &mut Vec<Line<'static>>) {
    let total = view.total();
    let label_w = label_width(view, 12);
    let bar_w = width.saturating_sub(label_w + 18).max(1);
    let values = view.series.first().map(|s| s.values.as_slice()).unwrap_or(&[]);

    for (i, label) in view.labels.iter().enumerate() {
        let value = values.get(i).copied().unwrap_or(0.0);
        let pct = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        lines.push(Line::from(vec![
            Span::raw(format!("  {} ", fit(label, label_w))),
            Span::styled(bar(value, total, bar_w), Style::default().fg(series_color(view.kind, i))),
            Span::raw(format!(" {} ({:.1}%)", format_value(value), pct)),
        ]));
    }
}

/// Flatten styled lines for plain output
pub fn plain_text(lines: &[Line<'_>]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
        .collect()
}

/// Draw the latest chart with native widgets
pub fn draw_chart_panel(f: &mut Frame, area: Rect, view: &ChartView) {
    let block = Block::default()
        .title(format!(" {} ", view.kind.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(80, 180, 255)));

    match view.shape {
        ChartShape::Bar => draw_bar_widget(f, area, view, block),
        ChartShape::Line => draw_line_widget(f, area, view, block),
        ChartShape::Pie => draw_share_widget(f, area, view, block),
    }
}

fn draw_bar_widget(f: &mut Frame, area: Rect, view: &ChartView, block: Block<'_>) {
    let groups = view.labels.len().max(1) as u16;
    let per_group = view.series.len().max(1) as u16;
    let inner_w = area.width.saturating_sub(2);
    let bar_width = (inner_w.saturating_sub(groups) / (groups * per_group)).clamp(1, 6);

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(1);

    for (i, label) in view.labels.iter().enumerate() {
        let bars: Vec<Bar> = view
            .series
            .iter()
            .enumerate()
            .map(|(s, series)| {
                let value = series.values.get(i).copied().unwrap_or(0.0);
                Bar::default()
                    .value(value.max(0.0).round() as u64)
                    .text_value(String::new())
                    .style(Style::default().fg(series_color(view.kind, s)))
            })
            .collect();
        chart = chart.data(BarGroup::default().label(Line::from(label.clone())).bars(&bars));
    }

    f.render_widget(chart, area);
}

fn draw_line_widget(f: &mut Frame, area: Rect, view: &ChartView, block: Block<'_>) {
    let points: Vec<Vec<(f64, f64)>> = view
        .series
        .iter()
        .map(|s| s.values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect())
        .collect();

    let datasets: Vec<Dataset> = view
        .series
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(s, (series, data))| {
            Dataset::default()
                .name(series.name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series_color(view.kind, s)))
                .data(data)
        })
        .collect();

    let x_max = (view.labels.len().saturating_sub(1)).max(1) as f64;
    let y_max = view.max_value() * 1.1;
    let first = view.labels.first().cloned().unwrap_or_default();
    let last = view.labels.last().cloned().unwrap_or_default();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(vec![Span::raw("0"), Span::raw(format_value(y_max.round()))]),
        );

    f.render_widget(chart, area);
}

fn draw_share_widget(f: &mut Frame, area: Rect, view: &ChartView, block: Block<'_>) {
    let total = view.total();
    let values = view.series.first().map(|s| s.values.as_slice()).unwrap_or(&[]);
    let bar_width = (area.width.saturating_sub(6) / 2).clamp(1, 20);

    let bars: Vec<Bar> = view
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let value = values.get(i).copied().unwrap_or(0.0);
            let pct = if total > 0.0 { value / total * 100.0 } else { 0.0 };
            Bar::default()
                .value(value.round() as u64)
                .label(Line::from(label.clone()))
                .text_value(format!("{} ({:.0}%)", format_value(value), pct))
                .style(Style::default().fg(series_color(view.kind, i)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}
