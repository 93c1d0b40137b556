//! The accumulation fold: resampled purchase dates → contribution events.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{ContributionEvent, PricePoint, PriceSeries};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("cannot buy at non-positive or non-finite price {price} on {date}")]
    DegeneratePrice { date: NaiveDate, price: f64 },
}

/// Running state of the holding between purchases.
#[derive(Debug, Clone, Copy, Default)]
struct Holding {
    purchases: u32,
    shares: f64,
}

impl Holding {
    fn buy(&mut self, point: &PricePoint, amount: f64) -> Result<ContributionEvent, SimulationError> {
        if !(point.price.is_finite() && point.price > 0.0) {
            return Err(SimulationError::DegeneratePrice {
                date: point.date,
                price: point.price,
            });
        }

        let shares_bought = amount / point.price;
        self.purchases += 1;
        self.shares += shares_bought;

        Ok(ContributionEvent {
            date: point.date,
            price: point.price,
            shares_bought,
            cumulative_shares: self.shares,
            // Derived from the count so it equals amount × n exactly.
            cumulative_invested: amount * f64::from(self.purchases),
            portfolio_value: self.shares * point.price,
        })
    }
}

/// Buy `amount` worth of shares at every purchase date, in order.
///
/// Produces one event per purchase date. Stops at the first degenerate price.
pub fn simulate(
    purchases: &PriceSeries,
    amount: f64,
) -> Result<Vec<ContributionEvent>, SimulationError> {
    purchases
        .iter()
        .scan(Holding::default(), |holding, point| Some(holding.buy(point, amount)))
        .collect()
}
