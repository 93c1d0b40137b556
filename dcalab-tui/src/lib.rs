//! DCA Lab TUI — terminal chart of a DCA simulation.
//!
//! Draws portfolio value against the cumulative invested amount with ratatui,
//! and provides the blocking `TerminalChartRenderer` used by the CLI.

pub mod chart_view;
pub mod terminal;
pub mod theme;

pub use terminal::{run_view, TerminalChartRenderer};
pub use theme::Theme;
