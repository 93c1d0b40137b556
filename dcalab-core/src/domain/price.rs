//! Price points and the ordered daily price series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Adjusted close of one symbol on one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("price series dates out of order: {next} follows {previous}")]
    OutOfOrder {
        previous: NaiveDate,
        next: NaiveDate,
    },

    #[error("missing price on {date}")]
    MissingPrice { date: NaiveDate },
}

/// Chronologically ordered prices, at most one per date, no missing values.
///
/// The constructor enforces strictly ascending dates and finite prices, so every
/// consumer (resampling, the fold, reporting) can rely on order without re-checking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        for point in &points {
            if !point.price.is_finite() {
                return Err(SeriesError::MissingPrice { date: point.date });
            }
        }
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::OutOfOrder {
                    previous: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        Ok(Self { points })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Most recent known price, used to value the final holding.
    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
