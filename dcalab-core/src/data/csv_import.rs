//! CSV import provider.
//!
//! Reads a Yahoo-style daily export (`Date,Open,High,Low,Close,Adj Close,Volume`).
//! Cells that don't parse (empty, `null`) are treated as missing, so the usual
//! cleaning step decides what survives.

use super::provider::{DataError, DataSource, FetchResult, PriceHistoryProvider, RawBar};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Open", default, deserialize_with = "csv::invalid_option")]
    open: Option<f64>,
    #[serde(rename = "High", default, deserialize_with = "csv::invalid_option")]
    high: Option<f64>,
    #[serde(rename = "Low", default, deserialize_with = "csv::invalid_option")]
    low: Option<f64>,
    #[serde(rename = "Close", default, deserialize_with = "csv::invalid_option")]
    close: Option<f64>,
    #[serde(rename = "Adj Close", default, deserialize_with = "csv::invalid_option")]
    adj_close: Option<f64>,
    #[serde(rename = "Volume", default, deserialize_with = "csv::invalid_option")]
    volume: Option<f64>,
}

impl From<CsvRow> for RawBar {
    fn from(row: CsvRow) -> Self {
        RawBar {
            date: row.date,
            open: row.open.unwrap_or(f64::NAN),
            high: row.high.unwrap_or(f64::NAN),
            low: row.low.unwrap_or(f64::NAN),
            close: row.close.unwrap_or(f64::NAN),
            adj_close: row.adj_close.unwrap_or(f64::NAN),
            // Exports sometimes write volume as "1234.0".
            volume: row.volume.filter(|v| *v >= 0.0).map(|v| v as u64),
        }
    }
}

/// Provider backed by a single CSV file holding one symbol's history.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    path: PathBuf,
}

impl CsvProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_bars(&self) -> Result<Vec<RawBar>, DataError> {
        let csv_err = |e: csv::Error| DataError::Csv {
            path: self.path.clone(),
            message: e.to_string(),
        };

        let file = std::fs::File::open(&self.path).map_err(|source| DataError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);

        reader
            .deserialize::<CsvRow>()
            .map(|row| row.map(RawBar::from).map_err(csv_err))
            .collect()
    }
}

impl PriceHistoryProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let bars: Vec<RawBar> = self
            .read_bars()?
            .into_iter()
            .filter(|bar| bar.date >= start && bar.date < end)
            .collect();

        if bars.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
                start,
                end,
            });
        }

        info!(symbol, bars = bars.len(), path = %self.path.display(), "loaded daily history from CSV");
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::CsvImport,
        })
    }
}
