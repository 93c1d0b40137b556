//! Parrot/neon theme tokens for the DCA Lab chart.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (portfolio value line, title)
//! - **Warning**: Neon orange (invested amount line)
//! - **Positive** / **Negative**: gain or loss at the last purchase
//! - **Grid**: dim charcoal, drawn under the data

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Electric cyan accent (portfolio line, title)
    pub accent: Color,
    /// Neon orange (invested line)
    pub warning: Color,
    /// Neon green (gains)
    pub positive: Color,
    /// Hot pink (losses)
    pub negative: Color,
    /// Steel blue (axes, secondary text)
    pub muted: Color,
    /// Dim charcoal (grid lines)
    pub grid: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 255),
            warning: Color::Rgb(255, 140, 0),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            muted: Color::Rgb(100, 149, 237),
            grid: Color::Rgb(60, 60, 66),
        }
    }

    /// Gain = green, loss = pink.
    pub fn gain_color(&self, gain: f64) -> Color {
        if gain >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn grid_style(&self) -> Style {
        Style::default().fg(self.grid)
    }
}
