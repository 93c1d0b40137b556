//! Row cleaning: raw provider bars → ordered adjusted-close price series.

use tracing::{debug, warn};

use super::provider::{DataError, RawBar};
use crate::domain::{PricePoint, PriceSeries};

/// What the cleaning step did, for logging and run summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanReport {
    pub kept: usize,
    pub dropped: usize,
    /// Complete rows replaced by a later row for the same date.
    pub superseded: usize,
}

/// Drop every bar with a missing field and keep the adjusted close.
///
/// Rows are excluded, never interpolated, and the survivors keep their
/// original relative order. Consecutive rows for the same date (Yahoo's live
/// bar next to the day's regular bar) collapse to the last one. Fails if the
/// surviving dates go backwards.
pub fn to_price_series(bars: &[RawBar]) -> Result<(PriceSeries, CleanReport), DataError> {
    let complete = bars.iter().filter(|bar| !bar.is_incomplete());

    let mut points: Vec<PricePoint> = Vec::with_capacity(bars.len());
    let mut superseded = 0;
    for bar in complete {
        let point = PricePoint::new(bar.date, bar.adj_close);
        match points.last_mut() {
            Some(last) if last.date == point.date => {
                *last = point;
                superseded += 1;
            }
            _ => points.push(point),
        }
    }

    let report = CleanReport {
        kept: points.len(),
        dropped: bars.len() - points.len() - superseded,
        superseded,
    };

    if report.dropped > 0 {
        warn!(dropped = report.dropped, kept = report.kept, "dropped incomplete rows");
    } else {
        debug!(kept = report.kept, "all rows complete");
    }
    if report.superseded > 0 {
        debug!(superseded = report.superseded, "collapsed same-date rows");
    }

    let series = PriceSeries::new(points)?;
    Ok((series, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(day: u32, adj_close: f64) -> RawBar {
        RawBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: adj_close,
            high: adj_close,
            low: adj_close,
            close: adj_close,
            adj_close,
            volume: Some(1_000),
        }
    }

    #[test]
    fn keeps_complete_rows_in_order() {
        let bars = vec![bar(2, 10.0), bar(3, 11.0), bar(4, 12.0)];
        let (series, report) = to_price_series(&bars).unwrap();
        assert_eq!(report, CleanReport { kept: 3, dropped: 0, superseded: 0 });
        let prices: Vec<f64> = series.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![10.0, 11.0, 12.0]);
    }

    #[test]
    fn drops_rows_with_any_missing_field() {
        let mut gap = bar(3, 11.0);
        gap.open = f64::NAN;
        let mut no_volume = bar(4, 12.0);
        no_volume.volume = None;

        let bars = vec![bar(2, 10.0), gap, no_volume, bar(5, 13.0)];
        let (series, report) = to_price_series(&bars).unwrap();

        assert_eq!(report.dropped, 2);
        let dates: Vec<u32> = series
            .iter()
            .map(|p| chrono::Datelike::day(&p.date))
            .collect();
        assert_eq!(dates, vec![2, 5]);
    }

    #[test]
    fn uses_adjusted_close_not_close() {
        let mut b = bar(2, 10.0);
        b.close = 99.0;
        let (series, _) = to_price_series(&[b]).unwrap();
        assert_eq!(series.last_price(), Some(10.0));
    }

    #[test]
    fn same_date_rows_keep_the_last() {
        let bars = vec![bar(2, 10.0), bar(3, 11.0), bar(3, 11.5), bar(4, 12.0)];
        let (series, report) = to_price_series(&bars).unwrap();
        assert_eq!(report, CleanReport { kept: 3, dropped: 0, superseded: 1 });
        let prices: Vec<f64> = series.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![10.0, 11.5, 12.0]);
    }

    #[test]
    fn incomplete_live_row_does_not_replace_the_close() {
        let mut live = bar(3, 11.5);
        live.adj_close = f64::NAN;
        let bars = vec![bar(2, 10.0), bar(3, 11.0), live];
        let (series, report) = to_price_series(&bars).unwrap();
        assert_eq!(report, CleanReport { kept: 2, dropped: 1, superseded: 0 });
        assert_eq!(series.last_price(), Some(11.0));
    }

    #[test]
    fn unordered_input_is_a_validation_error() {
        let bars = vec![bar(3, 10.0), bar(2, 11.0)];
        let err = to_price_series(&bars).unwrap_err();
        assert!(matches!(err, DataError::ValidationError(_)));
    }

    #[test]
    fn empty_input_gives_empty_series() {
        let (series, report) = to_price_series(&[]).unwrap();
        assert!(series.is_empty());
        assert_eq!(report, CleanReport::default());
    }
}
