//! Log-log time-vs-amount chart of a [`Report`], drawn with ratatui.
//!
//! The chart is rendered into an off-screen buffer and returned as text, so it
//! can be printed or saved without a terminal. Both axes are log10-scaled:
//! points are plotted at (log10 amount, log10 seconds) and the axis labels
//! show the matching powers of ten.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget};

use super::{Report, Series};

pub const DEFAULT_WIDTH: u16 = 100;
pub const DEFAULT_HEIGHT: u16 = 30;

const COLORS: [Color; 4] = [Color::Blue, Color::Red, Color::Cyan, Color::Magenta];

/// Series points in log10 space. Zero amounts and durations are dropped.
fn log_points(series: &Series) -> Vec<(f64, f64)> {
    series
        .points
        .iter()
        .filter(|p| p.amount > 0 && p.seconds > 0.0)
        .map(|p| ((p.amount as f64).log10(), p.seconds.log10()))
        .collect()
}

/// Whole decades covering `values`, at least one decade wide.
fn decade_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let (lo, hi) = (lo.floor(), hi.ceil());
    if hi > lo {
        [lo, hi]
    } else {
        [lo, lo + 1.0]
    }
}

/// One `1e<k>` label per decade between the bounds.
fn decade_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let (lo, hi) = (bounds[0] as i32, bounds[1] as i32);
    (lo..=hi).map(|k| Span::raw(format!("1e{k}"))).collect()
}

/// Legend entry: series label with its fitted slope and expected class.
fn legend_name(series: &Series) -> String {
    match series.trend.slope {
        Some(slope) => format!(
            "{} slope {slope:.2}, {}",
            series.label, series.trend.complexity
        ),
        None => format!("{} slope n/a, {}", series.label, series.trend.complexity),
    }
}

/// Draws the report into a `width` x `height` buffer.
pub fn render_buffer(report: &Report, width: u16, height: u16) -> Buffer {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);

    let points: Vec<Vec<(f64, f64)>> = report.series.iter().map(log_points).collect();
    let x_bounds = decade_bounds(points.iter().flatten().map(|&(x, _)| x));
    let y_bounds = decade_bounds(points.iter().flatten().map(|&(_, y)| y));

    let datasets: Vec<Dataset<'_>> = report
        .series
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (series, data))| {
            Dataset::default()
                .name(legend_name(series))
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(COLORS[i % COLORS.len()]))
                .data(data)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Greedy vs dynamic programming (log-log) "),
        )
        .x_axis(
            Axis::default()
                .title("amount")
                .bounds(x_bounds)
                .labels(decade_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("time (s)")
                .bounds(y_bounds)
                .labels(decade_labels(y_bounds)),
        )
        .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)));

    chart.render(area, &mut buf);
    buf
}

/// Draws the report and returns the chart as lines of text.
pub fn render_chart(report: &Report, width: u16, height: u16) -> String {
    let buf = render_buffer(report, width, height);
    let width = usize::from(buf.area.width.max(1));

    let mut out = String::new();
    for row in buf.content.chunks(width) {
        let line: String = row.iter().map(|cell| cell.symbol()).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
