//! Chart data for renderers, and the renderer capability.
//!
//! `ChartData` is built purely from contribution events so it can be checked
//! in tests without a display. Renderers (the terminal view, or nothing at
//! all) only draw what they are given.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ContributionEvent;

pub const PORTFOLIO_SERIES: &str = "Portfolio Value";
pub const INVESTED_SERIES: &str = "Invested Amount";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("chart rendering failed: {0}")]
    Backend(String),
}

/// Draws a chart. Implementations may block (an interactive view) or do nothing.
pub trait ChartRenderer {
    fn render(&mut self, chart: &ChartData) -> Result<(), RenderError>;
}

/// Renderer used when no chart is wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl ChartRenderer for NullRenderer {
    fn render(&mut self, _chart: &ChartData) -> Result<(), RenderError> {
        Ok(())
    }
}

/// One named line over the shared date axis. `x` is days since the common era.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// Everything a renderer needs to draw portfolio value against money invested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ChartSeries>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

impl ChartData {
    pub fn from_events(ticker: &str, events: &[ContributionEvent]) -> Self {
        let portfolio: Vec<(f64, f64)> = events
            .iter()
            .map(|e| (date_to_x(e.date), e.portfolio_value))
            .collect();
        let invested: Vec<(f64, f64)> = events
            .iter()
            .map(|e| (date_to_x(e.date), e.cumulative_invested))
            .collect();

        let x_bounds = match (events.first(), events.last()) {
            (Some(first), Some(last)) if first.date < last.date => {
                [date_to_x(first.date), date_to_x(last.date)]
            }
            (Some(only), _) => [date_to_x(only.date) - 1.0, date_to_x(only.date) + 1.0],
            _ => [0.0, 1.0],
        };

        let (min_y, max_y) = portfolio
            .iter()
            .chain(invested.iter())
            .map(|&(_, y)| y)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });

        let y_bounds = if min_y.is_finite() && max_y.is_finite() {
            let range = max_y - min_y;
            let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
            [min_y - pad, max_y + pad]
        } else {
            [0.0, 1.0]
        };

        Self {
            title: format!("Dollar Cost Averaging for {ticker}"),
            x_label: "Date".into(),
            y_label: "Value in $".into(),
            series: vec![
                ChartSeries {
                    name: PORTFOLIO_SERIES.into(),
                    points: portfolio,
                },
                ChartSeries {
                    name: INVESTED_SERIES.into(),
                    points: invested,
                },
            ],
            x_bounds,
            y_bounds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// `count` evenly spaced positions across the x axis, endpoints included.
    pub fn x_ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.x_bounds, count)
    }

    /// `count` evenly spaced positions across the y axis, endpoints included.
    pub fn y_ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.y_bounds, count)
    }

    pub fn x_labels(&self, count: usize) -> Vec<String> {
        self.x_ticks(count)
            .into_iter()
            .map(|x| match x_to_date(x) {
                Some(date) => format!("{}-{:02}", date.year(), date.month()),
                None => String::new(),
            })
            .collect()
    }

    pub fn y_labels(&self, count: usize) -> Vec<String> {
        self.y_ticks(count)
            .into_iter()
            .map(|y| format!("{y:.0}"))
            .collect()
    }
}

fn ticks(bounds: [f64; 2], count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![bounds[0]],
        _ => {
            let step = (bounds[1] - bounds[0]) / (count - 1) as f64;
            (0..count).map(|i| bounds[0] + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(y: i32, m: u32, day: u32, value: f64, invested: f64) -> ContributionEvent {
        ContributionEvent {
            date: NaiveDate::from_ymd_opt(y, m, day).unwrap(),
            price: 1.0,
            shares_bought: 1.0,
            cumulative_shares: value,
            cumulative_invested: invested,
            portfolio_value: value,
        }
    }

    #[test]
    fn builds_two_named_series_with_title() {
        let events = vec![
            event(2024, 1, 2, 100.0, 100.0),
            event(2024, 4, 1, 300.0, 200.0),
            event(2024, 7, 1, 700.0, 300.0),
        ];
        let chart = ChartData::from_events("TSLA", &events);

        assert_eq!(chart.title, "Dollar Cost Averaging for TSLA");
        assert_eq!(chart.x_label, "Date");
        assert_eq!(chart.y_label, "Value in $");
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "Portfolio Value");
        assert_eq!(chart.series[1].name, "Invested Amount");
        assert_eq!(chart.series[0].points[2].1, 700.0);
        assert_eq!(chart.series[1].points[2].1, 300.0);
        // Both series share the x axis.
        assert_eq!(chart.series[0].points[1].0, chart.series[1].points[1].0);
    }

    #[test]
    fn bounds_cover_all_points_with_padding() {
        let events = vec![event(2024, 1, 2, 100.0, 100.0), event(2024, 7, 1, 700.0, 300.0)];
        let chart = ChartData::from_events("TSLA", &events);
        assert!(chart.y_bounds[0] <= 100.0);
        assert!(chart.y_bounds[1] > 700.0);
        assert_eq!(chart.x_bounds[0], chart.series[0].points[0].0);
        assert_eq!(chart.x_bounds[1], chart.series[0].points[1].0);
    }

    #[test]
    fn x_labels_are_dates() {
        let events = vec![event(2024, 1, 2, 100.0, 100.0), event(2024, 7, 1, 700.0, 300.0)];
        let chart = ChartData::from_events("TSLA", &events);
        let labels = chart.x_labels(2);
        assert_eq!(labels, vec!["2024-01".to_string(), "2024-07".to_string()]);
    }

    #[test]
    fn single_event_has_non_degenerate_bounds() {
        let chart = ChartData::from_events("TSLA", &[event(2024, 1, 2, 100.0, 100.0)]);
        assert!(chart.x_bounds[0] < chart.x_bounds[1]);
        assert!(chart.y_bounds[0] < chart.y_bounds[1]);
    }

    #[test]
    fn empty_events_give_empty_chart() {
        let chart = ChartData::from_events("TSLA", &[]);
        assert!(chart.is_empty());
        assert_eq!(chart.x_bounds, [0.0, 1.0]);
        assert_eq!(chart.y_bounds, [0.0, 1.0]);
    }

    #[test]
    fn ticks_include_endpoints() {
        assert_eq!(ticks([0.0, 10.0], 3), vec![0.0, 5.0, 10.0]);
        assert_eq!(ticks([0.0, 10.0], 1), vec![0.0]);
        assert!(ticks([0.0, 10.0], 0).is_empty());
    }

    #[test]
    fn null_renderer_does_nothing() {
        let chart = ChartData::from_events("TSLA", &[]);
        assert!(NullRenderer.render(&chart).is_ok());
    }
}
