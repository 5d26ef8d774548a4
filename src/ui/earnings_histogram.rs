//! Histogram of final earnings relative to the average gambler.

use crate::simulator::{signed_dollars, SimReport};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

const BAR_COLOR: Color = Color::Rgb(31, 119, 180);
const MEAN_COLOR: Color = Color::White;
const MEDIAN_COLOR: Color = Color::Red;

#[derive(Debug, Clone)]
pub struct EarningsPlot {
    /// Step outline tracing every bar of the histogram
    pub outline: Vec<(f64, f64)>,
    pub mean_marker: [(f64, f64); 2],
    pub median_marker: [(f64, f64); 2],
    pub x_bounds: [f64; 2],
    pub y_max: f64,
    pub caption: String,
}

impl EarningsPlot {
    pub fn from_report(report: &SimReport) -> Self {
        let hist = &report.earnings_histogram;
        let earnings = &report.earnings;

        let mut outline = Vec::with_capacity(hist.counts.len() * 4);
        for (idx, &count) in hist.counts.iter().enumerate() {
            let (left, right) = hist.bin_edges(idx);
            let height = count as f64;
            outline.push((left, 0.0));
            outline.push((left, height));
            outline.push((right, height));
            outline.push((right, 0.0));
        }

        let y_max = (hist.max_count() as f64 * 1.1).max(1.0);
        let caption = format!(
            "mean: {}, median {}, std dev: ±${:.2}",
            signed_dollars(earnings.mean),
            signed_dollars(earnings.median),
            earnings.std_dev
        );

        Self {
            outline,
            mean_marker: [(earnings.mean, 0.0), (earnings.mean, y_max)],
            median_marker: [(earnings.median, 0.0), (earnings.median, y_max)],
            x_bounds: [hist.lower, hist.upper],
            y_max,
            caption,
        }
    }
}

pub fn render_earnings(frame: &mut Frame, area: Rect, plot: &EarningsPlot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Chart
            Constraint::Length(1), // Legend
        ])
        .split(area);

    let datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(BAR_COLOR))
            .data(&plot.outline),
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(MEAN_COLOR).add_modifier(Modifier::BOLD))
            .data(&plot.mean_marker),
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(MEDIAN_COLOR).add_modifier(Modifier::BOLD))
            .data(&plot.median_marker),
    ];

    let [x_lo, x_hi] = plot.x_bounds;
    let x_labels = vec![
        Span::raw(signed_dollars(x_lo)),
        Span::raw(signed_dollars((x_lo + x_hi) / 2.0)),
        Span::raw(signed_dollars(x_hi)),
    ];
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{:.0}", plot.y_max / 2.0)),
        Span::raw(format!("{:.0}", plot.y_max)),
    ];

    let title = format!(" Distribution of earnings | {} ", plot.caption);
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title("Earnings ($)")
                .style(Style::default().fg(Color::Gray))
                .bounds(plot.x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Frequency")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, plot.y_max])
                .labels(y_labels),
        )
        .legend_position(None);
    frame.render_widget(chart, chunks[0]);

    let legend = Paragraph::new(Line::from(vec![
        Span::styled(" ━ ", Style::default().fg(MEAN_COLOR)),
        Span::raw("mean   "),
        Span::styled("━ ", Style::default().fg(MEDIAN_COLOR)),
        Span::raw("median"),
    ]));
    frame.render_widget(legend, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::{run_simulation, SimConfig};
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_outline_traces_each_bin() {
        let report = run_simulation(&SimConfig::quick(11)).unwrap();
        let plot = EarningsPlot::from_report(&report);

        // 500 gamblers -> 5 bins, 4 points per bar
        assert_eq!(report.earnings_histogram.counts.len(), 5);
        assert_eq!(plot.outline.len(), 20);
        let tallest = plot.outline.iter().map(|&(_, y)| y).fold(0.0, f64::max);
        assert_eq!(tallest, report.earnings_histogram.max_count() as f64);
        assert!(plot.y_max > tallest);
    }

    #[test]
    fn test_markers_sit_at_mean_and_median() {
        let report = run_simulation(&SimConfig::quick(3)).unwrap();
        let plot = EarningsPlot::from_report(&report);
        assert_eq!(plot.mean_marker[0].0, report.earnings.mean);
        assert_eq!(plot.median_marker[1].0, report.earnings.median);
        assert!(plot.caption.starts_with("mean: "));
    }

    #[test]
    fn test_renders_without_panicking() {
        let report = run_simulation(&SimConfig::quick(8)).unwrap();
        let plot = EarningsPlot::from_report(&report);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| render_earnings(frame, frame.size(), &plot))
            .unwrap();
    }
}
