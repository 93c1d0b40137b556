//! ContributionEvent: one simulated periodic purchase.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// State of the holding right after one purchase.
///
/// `portfolio_value` is `cumulative_shares × price` at this event's own date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionEvent {
    pub date: NaiveDate,
    pub price: f64,
    pub shares_bought: f64,
    pub cumulative_shares: f64,
    pub cumulative_invested: f64,
    pub portfolio_value: f64,
}
