//! Interactive terminal viewer for simulation charts.

pub mod earnings_histogram;
pub mod trajectory_chart;

use crate::simulator::SimReport;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use earnings_histogram::{render_earnings, EarningsPlot};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use trajectory_chart::{render_trajectories, TrajectoryPlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartScreen {
    Trajectories,
    Earnings,
}

impl ChartScreen {
    pub fn toggled(self) -> Self {
        match self {
            ChartScreen::Trajectories => ChartScreen::Earnings,
            ChartScreen::Earnings => ChartScreen::Trajectories,
        }
    }
}

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Show(ChartScreen),
    Quit,
    Ignore,
}

/// Charts are shown in order: Enter/Space moves on and closes after the
/// last one, Tab and arrows flip back and forth.
pub fn handle_key(screen: ChartScreen, key: KeyCode) -> ViewerAction {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ViewerAction::Quit,
        KeyCode::Enter | KeyCode::Char(' ') => match screen {
            ChartScreen::Trajectories => ViewerAction::Show(ChartScreen::Earnings),
            ChartScreen::Earnings => ViewerAction::Quit,
        },
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
            ViewerAction::Show(screen.toggled())
        }
        _ => ViewerAction::Ignore,
    }
}

/// Restores the terminal on drop, including on early return.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = stdout.execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = io::stdout().execute(LeaveAlternateScreen);
                Err(e)
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = self.terminal.backend_mut().execute(LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Show both charts until the user closes the viewer.
pub fn show_charts(report: &SimReport) -> io::Result<()> {
    let trajectories = TrajectoryPlot::from_report(report);
    let earnings = EarningsPlot::from_report(report);

    let mut guard = TerminalGuard::enter()?;
    let mut screen = ChartScreen::Trajectories;
    let mut dirty = true;

    loop {
        if dirty {
            guard.terminal.draw(|frame| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)])
                    .split(frame.size());

                match screen {
                    ChartScreen::Trajectories => {
                        render_trajectories(frame, chunks[0], &trajectories)
                    }
                    ChartScreen::Earnings => render_earnings(frame, chunks[0], &earnings),
                }

                let help = Paragraph::new(" [Enter] Next  [Tab] Switch chart  [Q] Quit")
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(help, chunks[1]);
            })?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match handle_key(screen, key.code) {
                        ViewerAction::Show(next) => {
                            dirty = next != screen;
                            screen = next;
                        }
                        ViewerAction::Quit => break,
                        ViewerAction::Ignore => {}
                    }
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }

    Ok(())
}
