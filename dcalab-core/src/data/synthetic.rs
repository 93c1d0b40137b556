//! Synthetic data provider for offline runs and demos.
//!
//! Produces a simple random walk from a starting price of 100.0 on weekdays.
//! The walk is seeded from the symbol name, so a symbol always gets the same
//! series for the same range.

use super::provider::{DataError, DataSource, FetchResult, PriceHistoryProvider, RawBar};
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

/// Deterministic random-walk provider.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    start_price: f64,
    daily_range: f64,
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self {
            start_price: 100.0,
            daily_range: 0.03,
        }
    }
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate bars for `[start, end)`, skipping weekends.
    pub fn generate(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<RawBar> {
        // Deterministic seed from symbol name
        let seed_bytes = blake3::hash(symbol.as_bytes());
        let seed: [u8; 32] = *seed_bytes.as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut bars = Vec::new();
        let mut price = self.start_price;

        for current in start.iter_days().take_while(|d| *d < end) {
            let weekday = current.weekday();
            if weekday == chrono::Weekday::Sat || weekday == chrono::Weekday::Sun {
                continue;
            }

            let daily_return: f64 = rng.gen_range(-self.daily_range..self.daily_range);
            let open = price;
            let close = price * (1.0 + daily_return);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500_000..5_000_000u64);

            bars.push(RawBar {
                date: current,
                open,
                high,
                low,
                close,
                adj_close: close,
                volume: Some(volume),
            });

            price = close;
        }

        bars
    }
}

impl PriceHistoryProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        warn!(symbol, "generating synthetic prices; results are not market data");
        let bars = self.generate(symbol, start, end);
        if bars.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
                start,
                end,
            });
        }
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::Synthetic,
        })
    }
}
