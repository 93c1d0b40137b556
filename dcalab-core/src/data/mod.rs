//! Market data retrieval: providers and row cleaning.

pub mod clean;
pub mod csv_import;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use clean::{to_price_series, CleanReport};
pub use csv_import::CsvProvider;
pub use provider::{DataError, DataSource, FetchResult, PriceHistoryProvider, RawBar};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
