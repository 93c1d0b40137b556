//! Resampling: reduce a daily series to one purchase date per period.

use tracing::debug;

use crate::domain::{Interval, PricePoint, PriceSeries};

/// Keep the first trading day of every contribution period.
///
/// Periods are anchored on the series' first observation (see
/// `Interval::period_index`). A period with no trading days contributes
/// nothing; it is skipped, not zero-filled.
pub fn resample_first(series: &PriceSeries, interval: Interval) -> PriceSeries {
    let Some(anchor) = series.first().map(|p| p.date) else {
        return PriceSeries::empty();
    };

    let mut last_period: Option<i64> = None;
    let points: Vec<PricePoint> = series
        .iter()
        .filter(|point| {
            let period = interval.period_index(anchor, point.date);
            let is_new = last_period != Some(period);
            last_period = Some(period);
            is_new
        })
        .copied()
        .collect();

    debug!(
        daily = series.len(),
        purchases = points.len(),
        %interval,
        "resampled series"
    );

    // A subsequence of an ordered series is still ordered.
    PriceSeries::new(points).unwrap_or_default()
}
