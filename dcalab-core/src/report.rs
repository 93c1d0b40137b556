//! Final-value and profit reporting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use tracing::{info, warn};

use crate::domain::{ContributionEvent, PriceSeries};

/// Outcome of a simulation, valued at the most recent known price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub event_count: usize,
    pub cumulative_shares: f64,
    pub total_invested: f64,
    /// Last price of the full daily series (not the last purchase price).
    pub last_price: Option<f64>,
    /// Truncated toward zero.
    pub final_value: i64,
    /// Truncated toward zero.
    pub total_profit: i64,
}

/// Value the final holding at the last known daily price.
///
/// With no events both figures are zero.
pub fn summarize(events: &[ContributionEvent], daily: &PriceSeries) -> Summary {
    let Some(last_event) = events.last() else {
        warn!("no contribution events; nothing was invested");
        return Summary {
            event_count: 0,
            cumulative_shares: 0.0,
            total_invested: 0.0,
            last_price: daily.last_price(),
            final_value: 0,
            total_profit: 0,
        };
    };

    let last_price = daily.last_price().unwrap_or(last_event.price);
    let final_value = (last_event.cumulative_shares * last_price).trunc();
    let total_profit = (final_value - last_event.cumulative_invested).trunc();

    let summary = Summary {
        event_count: events.len(),
        cumulative_shares: last_event.cumulative_shares,
        total_invested: last_event.cumulative_invested,
        last_price: Some(last_price),
        final_value: final_value as i64,
        total_profit: total_profit as i64,
    };

    info!(
        events = summary.event_count,
        shares = summary.cumulative_shares,
        invested = summary.total_invested,
        final_value = summary.final_value,
        profit = summary.total_profit,
        "simulation summary"
    );

    summary
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final Value {}", self.final_value)?;
        write!(f, "Total Profit {}", self.total_profit)
    }
}

/// Print the two report lines.
pub fn write_report<W: Write>(summary: &Summary, out: &mut W) -> io::Result<()> {
    writeln!(out, "{summary}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;
    use crate::simulate::simulate;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(points: &[(NaiveDate, f64)]) -> PriceSeries {
        PriceSeries::new(points.iter().map(|&(date, price)| PricePoint::new(date, price)).collect())
            .unwrap()
    }

    #[test]
    fn three_purchase_scenario_profit() {
        let daily = series(&[
            (d(2024, 1, 2), 10.0),
            (d(2024, 4, 1), 20.0),
            (d(2024, 7, 1), 40.0),
        ]);
        let events = simulate(&daily, 100.0).unwrap();
        let summary = summarize(&events, &daily);
        assert_eq!(summary.final_value, 700);
        assert_eq!(summary.total_profit, 400);
        assert_eq!(summary.event_count, 3);
    }

    #[test]
    fn values_at_last_daily_price_not_last_purchase() {
        let purchases = series(&[(d(2024, 1, 2), 10.0)]);
        let daily = series(&[(d(2024, 1, 2), 10.0), (d(2024, 1, 31), 12.5)]);
        let events = simulate(&purchases, 300.0).unwrap();
        let summary = summarize(&events, &daily);
        // 30 shares × 12.5 = 375
        assert_eq!(summary.final_value, 375);
        assert_eq!(summary.total_profit, 75);
    }

    #[test]
    fn single_event_profit() {
        let purchases = series(&[(d(2024, 1, 2), 7.0)]);
        let daily = series(&[(d(2024, 1, 2), 7.0), (d(2024, 3, 1), 9.0)]);
        let events = simulate(&purchases, 100.0).unwrap();
        let summary = summarize(&events, &daily);
        let expected = (100.0_f64 / 7.0 * 9.0).trunc() - 100.0;
        assert_eq!(summary.total_profit, expected as i64);
    }

    #[test]
    fn values_are_truncated_toward_zero() {
        let purchases = series(&[(d(2024, 1, 2), 3.0)]);
        // 100/3 shares × 2.0 = 66.67 → 66; 66 - 100 = -34
        let daily = series(&[(d(2024, 1, 2), 3.0), (d(2024, 2, 1), 2.0)]);
        let events = simulate(&purchases, 100.0).unwrap();
        let summary = summarize(&events, &daily);
        assert_eq!(summary.final_value, 66);
        assert_eq!(summary.total_profit, -34);
    }

    #[test]
    fn empty_events_report_zero() {
        let summary = summarize(&[], &PriceSeries::empty());
        assert_eq!(summary.event_count, 0);
        assert_eq!(summary.final_value, 0);
        assert_eq!(summary.total_profit, 0);
        assert_eq!(summary.last_price, None);
    }

    #[test]
    fn report_is_two_lines() {
        let summary = Summary {
            event_count: 3,
            cumulative_shares: 17.5,
            total_invested: 300.0,
            last_price: Some(40.0),
            final_value: 700,
            total_profit: 400,
        };
        let mut out = Vec::new();
        write_report(&summary, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Final Value 700\nTotal Profit 400\n");
    }
}
