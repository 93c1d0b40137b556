//! Domain types for DCA Lab

pub mod event;
pub mod interval;
pub mod price;

pub use event::ContributionEvent;
pub use interval::{Interval, IntervalParseError};
pub use price::{PricePoint, PriceSeries};
