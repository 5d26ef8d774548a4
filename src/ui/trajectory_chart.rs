//! Balance trajectories of every gambler, with the mean and starting line.
//!
//! Gamblers share most of their path (the same losing run, the same flat
//! line after a win at the same spin), so trajectories are reduced to their
//! distinct segments once and painted onto a single canvas.

use crate::simulator::SimReport;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Line as CanvasLine},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::HashSet;

/// Line colors cycled across gamblers.
const PALETTE: [Color; 10] = [
    Color::Rgb(31, 119, 180),
    Color::Rgb(255, 127, 14),
    Color::Rgb(44, 160, 44),
    Color::Rgb(214, 39, 40),
    Color::Rgb(148, 103, 189),
    Color::Rgb(140, 86, 75),
    Color::Rgb(227, 119, 194),
    Color::Rgb(127, 127, 127),
    Color::Rgb(188, 189, 34),
    Color::Rgb(23, 190, 207),
];

const MEAN_COLOR: Color = Color::White;
const BASELINE_COLOR: Color = Color::Yellow;

/// One spin's step of a trajectory: balance `from` to `to` ending at `spin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub spin: usize,
    pub from: u64,
    pub to: u64,
    pub color: Color,
}

/// Chart-ready geometry, built once per report.
#[derive(Debug, Clone)]
pub struct TrajectoryPlot {
    /// Distinct trajectory steps, colored by the first gambler to take them
    pub segments: Vec<Segment>,
    pub mean: Vec<(f64, f64)>,
    pub baseline: [(f64, f64); 2],
    pub x_max: f64,
    pub y_max: f64,
    pub title: String,
    pub annotation: Vec<String>,
}

impl TrajectoryPlot {
    pub fn from_report(report: &SimReport) -> Self {
        let start = report.starting_balance;
        let x_max = report.config.total_spins() as f64;

        let mut seen = HashSet::new();
        let mut segments = Vec::new();
        for (idx, trajectory) in report.trajectories.iter().enumerate() {
            let mut previous = start;
            for (offset, &balance) in trajectory.iter().enumerate() {
                let spin = offset + 1;
                if seen.insert((spin, previous, balance)) {
                    segments.push(Segment {
                        spin,
                        from: previous,
                        to: balance,
                        color: PALETTE[idx % PALETTE.len()],
                    });
                }
                previous = balance;
            }
        }

        let mean = report
            .average_trajectory
            .iter()
            .enumerate()
            .map(|(spin, &balance)| (spin as f64, balance))
            .collect();

        let peak = report
            .trajectories
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap_or(0)
            .max(start) as f64;

        let games = report.config.games;
        let title = format!(
            " Simulated returns for {} game{} | N={} | Starting balance ${} ",
            games,
            if games == 1 { "" } else { "s" },
            report.num_gamblers,
            start
        );
        let annotation = vec![
            format!("Average final balance = {:.2}", report.mean_final_balance),
            format!(
                "{} gamblers made money, {} lost money, (win rate {:.2}%)",
                report.gamblers_ahead,
                report.gamblers_behind,
                report.win_rate() * 100.0
            ),
        ];

        Self {
            segments,
            mean,
            baseline: [(0.0, start as f64), (x_max, start as f64)],
            x_max: x_max.max(1.0),
            y_max: (peak * 1.05).max(1.0),
            title,
            annotation,
        }
    }
}

/// Render the trajectory chart into `area`.
pub fn render_trajectories(frame: &mut Frame, area: Rect, plot: &TrajectoryPlot) {
    let block = Block::default()
        .title(plot.title.as_str())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let y_labels = [
        format!("{:.0}", plot.y_max),
        format!("{:.0}", plot.y_max / 2.0),
        "0".to_string(),
    ];
    let label_width = y_labels.iter().map(|l| l.len()).max().unwrap_or(1) as u16 + 1;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Y axis title
            Constraint::Min(0),    // Plot
            Constraint::Length(1), // X labels
            Constraint::Length(1), // X axis title
        ])
        .split(inner);
    let plot_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(label_width), Constraint::Min(0)])
        .split(rows[1]);
    let x_label_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(label_width), Constraint::Min(0)])
        .split(rows[2]);

    let axis_style = Style::default().fg(Color::Gray);
    frame.render_widget(
        Paragraph::new("Account Balance ($)").style(axis_style),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new("number of spins")
            .style(axis_style)
            .alignment(Alignment::Center),
        rows[3],
    );
    render_y_labels(frame, plot_row[0], &y_labels);
    render_x_labels(frame, x_label_row[1], plot.x_max);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, plot.x_max])
        .y_bounds([0.0, plot.y_max])
        .paint(|ctx| {
            for segment in &plot.segments {
                ctx.draw(&CanvasLine {
                    x1: (segment.spin - 1) as f64,
                    y1: segment.from as f64,
                    x2: segment.spin as f64,
                    y2: segment.to as f64,
                    color: segment.color,
                });
            }
            // Separate layer so the summary lines sit on top of the gamblers
            ctx.layer();
            let [(bx1, by1), (bx2, by2)] = plot.baseline;
            ctx.draw(&CanvasLine {
                x1: bx1,
                y1: by1,
                x2: bx2,
                y2: by2,
                color: BASELINE_COLOR,
            });
            for pair in plot.mean.windows(2) {
                ctx.draw(&CanvasLine {
                    x1: pair[0].0,
                    y1: pair[0].1,
                    x2: pair[1].0,
                    y2: pair[1].1,
                    color: MEAN_COLOR,
                });
            }
        });
    frame.render_widget(canvas, plot_row[1]);

    render_annotation(frame, inner, &plot.annotation);
}

/// Max, middle and zero labels pinned to the top, middle and bottom rows.
fn render_y_labels(frame: &mut Frame, area: Rect, labels: &[String; 3]) {
    if area.height == 0 {
        return;
    }
    let mut lines = vec![Line::from(""); area.height as usize];
    let last = lines.len() - 1;
    lines[0] = Line::from(labels[0].as_str());
    lines[last / 2] = Line::from(labels[1].as_str());
    lines[last] = Line::from(labels[2].as_str());
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Right),
        area,
    );
}

fn render_x_labels(frame: &mut Frame, area: Rect, x_max: f64) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);
    let style = Style::default().fg(Color::Gray);
    let labels = [
        ("0".to_string(), Alignment::Left),
        (format!("{:.0}", x_max / 2.0), Alignment::Center),
        (format!("{:.0}", x_max), Alignment::Right),
    ];
    for ((text, alignment), column) in labels.into_iter().zip(columns.iter()) {
        frame.render_widget(
            Paragraph::new(text).style(style).alignment(alignment),
            *column,
        );
    }
}

/// Boxed summary in the bottom-right corner of the chart.
fn render_annotation(frame: &mut Frame, area: Rect, annotation: &[String]) {
    let width = annotation
        .iter()
        .map(|line| line.chars().count() as u16 + 4)
        .max()
        .unwrap_or(0)
        .min(area.width.saturating_sub(2));
    let height = (annotation.len() as u16 + 2).min(area.height.saturating_sub(2));
    if width == 0 || height == 0 {
        return;
    }

    let x = area.x + area.width.saturating_sub(width + 1);
    let y = area.y + area.height.saturating_sub(height + 3);
    let box_area = Rect::new(x, y, width, height);

    let lines: Vec<Line> = annotation
        .iter()
        .map(|line| Line::from(Span::styled(line.clone(), Style::default().fg(Color::White))))
        .collect();
    let text = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(Clear, box_area);
    frame.render_widget(text, box_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::{run_simulation, SimConfig};
    use ratatui::{backend::TestBackend, Terminal};

    fn small_report() -> SimReport {
        run_simulation(&SimConfig {
            gamblers: 20,
            ..SimConfig::quick(5)
        })
        .unwrap()
    }

    #[test]
    fn test_segments_start_from_starting_balance() {
        let report = small_report();
        let plot = TrajectoryPlot::from_report(&report);

        let first_spin: Vec<&Segment> = plot.segments.iter().filter(|s| s.spin == 1).collect();
        assert!(!first_spin.is_empty());
        assert!(first_spin.iter().all(|s| s.from == 350));
        assert!(plot.segments.iter().all(|s| (1..=56).contains(&s.spin)));
        assert_eq!(plot.mean.len(), 57);
        assert_eq!(plot.baseline, [(0.0, 350.0), (56.0, 350.0)]);
        assert!(plot.y_max >= 350.0);
    }

    #[test]
    fn test_every_trajectory_step_is_covered() {
        let report = small_report();
        let plot = TrajectoryPlot::from_report(&report);
        let drawn: HashSet<(usize, u64, u64)> = plot
            .segments
            .iter()
            .map(|s| (s.spin, s.from, s.to))
            .collect();
        assert_eq!(drawn.len(), plot.segments.len());

        for trajectory in &report.trajectories {
            let mut previous = report.starting_balance;
            for (offset, &balance) in trajectory.iter().enumerate() {
                assert!(drawn.contains(&(offset + 1, previous, balance)));
                previous = balance;
            }
        }
    }

    #[test]
    fn test_annotation_reports_counts() {
        let report = small_report();
        let plot = TrajectoryPlot::from_report(&report);
        assert!(plot.annotation[1].contains(&format!(
            "{} gamblers made money, {} lost money",
            report.gamblers_ahead, report.gamblers_behind
        )));
        assert!(plot.title.contains("1 game |"));
    }

    #[test]
    fn test_renders_without_panicking() {
        let plot = TrajectoryPlot::from_report(&small_report());
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|frame| render_trajectories(frame, frame.size(), &plot))
            .unwrap();
    }

    #[test]
    fn test_default_scale_collapses_to_few_segments() {
        // 10,000 gamblers share their losing run and their post-win flat lines
        let report = run_simulation(&SimConfig {
            seed: Some(1),
            ..Default::default()
        })
        .unwrap();
        let plot = TrajectoryPlot::from_report(&report);
        assert!(plot.segments.len() < 5_000, "{} segments", plot.segments.len());

        let mut terminal = Terminal::new(TestBackend::new(200, 50)).unwrap();
        terminal
            .draw(|frame| render_trajectories(frame, frame.size(), &plot))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let title: String = (1..60).map(|x| buffer.get(x, 0).symbol().to_string()).collect();
        assert!(title.contains("Simulated returns"));
    }
}
