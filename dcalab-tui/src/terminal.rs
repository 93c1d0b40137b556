//! Blocking full-screen chart renderer on crossterm.
//!
//! Opens the alternate screen, draws the chart, and waits for a close key.
//! The terminal is restored on every exit path, including panics.

use std::io::{self, Stdout};
use std::sync::Once;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use tracing::debug;

use dcalab_core::chart::{ChartData, ChartRenderer, RenderError};

use crate::chart_view;
use crate::theme::Theme;

/// Renders the chart in the terminal and blocks until the user closes it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalChartRenderer {
    theme: Theme,
}

impl TerminalChartRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl ChartRenderer for TerminalChartRenderer {
    fn render(&mut self, chart: &ChartData) -> Result<(), RenderError> {
        show(chart, &self.theme).map_err(|e| RenderError::Backend(format!("{e:#}")))
    }
}

/// Restores the terminal when dropped.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stderr(), LeaveAlternateScreen);
            default_hook(info);
        }));
    });
}

fn show(chart: &ChartData, theme: &Theme) -> Result<()> {
    install_panic_hook();

    enable_raw_mode().context("failed to enable raw mode")?;
    let _guard = TerminalGuard;
    let mut stdout: Stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout)).context("failed to open terminal")?;
    terminal.clear()?;

    debug!(title = %chart.title, "chart view opened");
    run_view(&mut terminal, chart, theme, event::read).context("chart view failed")?;
    terminal.show_cursor()?;
    debug!("chart view closed");
    Ok(())
}

/// Draw until `next_event` yields a close key. Redraws after every other event
/// (resizes included).
pub fn run_view<B, F>(
    terminal: &mut Terminal<B>,
    chart: &ChartData,
    theme: &Theme,
    mut next_event: F,
) -> io::Result<()>
where
    B: Backend,
    F: FnMut() -> io::Result<Event>,
{
    loop {
        terminal.draw(|f| chart_view::render(f, f.area(), chart, theme))?;

        if let Event::Key(key) = next_event()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl_c =
                key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter) {
                return Ok(());
            }
        }
    }
}
