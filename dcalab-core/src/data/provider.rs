//! Price-history provider trait and structured error types.
//!
//! The PriceHistoryProvider trait abstracts over data sources (Yahoo Finance,
//! CSV import, synthetic) so the pipeline can be run against fixtures in tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::price::SeriesError;

/// Raw daily bar from a data provider, before cleaning.
///
/// Missing numeric fields are NaN (prices) or `None` (volume); the cleaning
/// step drops any row that has one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: Option<u64>,
}

impl RawBar {
    /// Returns true if any field is missing.
    pub fn is_incomplete(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.adj_close.is_nan()
            || self.volume.is_none()
    }
}

/// Structured error types for data operations.
///
/// Every variant is fatal for a run: nothing here is retried.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no price data for {symbol} between {start} and {end}")]
    NoData {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("HTTP {status} fetching {symbol}")]
    Http { status: u16, symbol: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("validation error: {0}")]
    ValidationError(#[from] SeriesError),

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub bars: Vec<RawBar>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    CsvImport,
    Synthetic,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataSource::YahooFinance => "yahoo",
            DataSource::CsvImport => "csv",
            DataSource::Synthetic => "synthetic",
        };
        f.write_str(name)
    }
}

/// Trait for price-history providers.
///
/// `fetch` returns daily bars for trading days in `[start, end)` in
/// chronological order, or fails. Providers do not clean rows; that is the
/// retrieval stage's job.
pub trait PriceHistoryProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for a symbol over a date range (end exclusive).
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError>;
}
