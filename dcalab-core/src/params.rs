//! Simulation parameters: defaults, config-file overrides, and field parsing.
//!
//! Parameters are resolved by layering, lowest precedence first:
//! built-in defaults → TOML config file → command-line flags → prompts.
//! Each layer is a `ParamOverrides` with every field optional; only the final
//! `SimulationParameters` is complete.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::Interval;

pub const DEFAULT_TICKER: &str = "TSLA";
pub const DEFAULT_AMOUNT: f64 = 300.0;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors from parameter collection (the InvalidInput family).
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("invalid {field} '{value}': {reason}")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },
}

/// Complete, immutable inputs of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interval: Interval,
    pub amount: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            ticker: DEFAULT_TICKER.to_string(),
            start_date: NaiveDate::from_ymd_opt(2017, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap_or_default(),
            interval: Interval::default(),
            amount: DEFAULT_AMOUNT,
        }
    }
}

impl SimulationParameters {
    /// Apply a layer of overrides on top of these parameters.
    pub fn apply(mut self, overrides: &ParamOverrides) -> Self {
        if let Some(ticker) = &overrides.ticker {
            self.ticker = normalize_ticker(ticker);
        }
        if let Some(start) = overrides.start_date {
            self.start_date = start;
        }
        if let Some(end) = overrides.end_date {
            self.end_date = end;
        }
        if let Some(interval) = overrides.interval {
            self.interval = interval;
        }
        if let Some(amount) = overrides.amount {
            self.amount = amount;
        }
        self
    }
}

/// One layer of optional parameter values (a config file or a set of flags).
///
/// As a TOML document every key is optional:
///
/// ```toml
/// ticker = "AAPL"
/// start_date = "2018-01-01"
/// end_date = "2024-01-01"
/// interval = 3        # or "3m", "2w", "10d"
/// amount = 250.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamOverrides {
    pub ticker: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub interval: Option<Interval>,
    pub amount: Option<f64>,
}

impl ParamOverrides {
    /// Parse overrides from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load overrides from a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ParamError> {
        let content = std::fs::read_to_string(path).map_err(|source| ParamError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides = Self::from_toml(&content).map_err(|e| ParamError::ConfigParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        overrides.validate()?;
        Ok(overrides)
    }

    /// Field checks TOML types alone don't cover: `nan` and `inf` are valid
    /// TOML floats but not amounts.
    pub fn validate(&self) -> Result<(), ParamError> {
        match self.amount {
            Some(amount) if !amount.is_finite() => Err(ParamError::InvalidInput {
                field: "amount",
                value: amount.to_string(),
                reason: "amount must be a finite number".into(),
            }),
            _ => Ok(()),
        }
    }

    /// Combine two layers; values in `higher` win.
    pub fn merge(self, higher: ParamOverrides) -> Self {
        Self {
            ticker: higher.ticker.or(self.ticker),
            start_date: higher.start_date.or(self.start_date),
            end_date: higher.end_date.or(self.end_date),
            interval: higher.interval.or(self.interval),
            amount: higher.amount.or(self.amount),
        }
    }
}

/// Tickers are matched case-insensitively by providers; keep them upper-case.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Parse an ISO `YYYY-MM-DD` date for the named field.
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ParamError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| ParamError::InvalidInput {
        field,
        value: raw.trim().to_string(),
        reason: e.to_string(),
    })
}

/// Parse a contribution amount. Only numeric form is checked, not range.
pub fn parse_amount(raw: &str) -> Result<f64, ParamError> {
    let invalid = |reason: String| ParamError::InvalidInput {
        field: "amount",
        value: raw.trim().to_string(),
        reason,
    };
    let amount: f64 = raw.trim().parse().map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;
    if !amount.is_finite() {
        return Err(invalid("amount must be a finite number".into()));
    }
    Ok(amount)
}

/// Parse a contribution interval (`3`, `3m`, `2w`, `10d`).
pub fn parse_interval(raw: &str) -> Result<Interval, ParamError> {
    raw.parse().map_err(|e: crate::domain::IntervalParseError| ParamError::InvalidInput {
        field: "interval",
        value: raw.trim().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn defaults_match_documented_values() {
        let params = SimulationParameters::default();
        assert_eq!(params.ticker, "TSLA");
        assert_eq!(params.start_date, d(2017, 1, 1));
        assert_eq!(params.end_date, d(2024, 9, 1));
        assert_eq!(params.interval, Interval::Months(3));
        assert_eq!(params.amount, 300.0);
    }

    #[test]
    fn overrides_replace_only_present_fields() {
        let overrides = ParamOverrides {
            ticker: Some(" aapl ".into()),
            amount: Some(50.0),
            ..Default::default()
        };
        let params = SimulationParameters::default().apply(&overrides);
        assert_eq!(params.ticker, "AAPL");
        assert_eq!(params.amount, 50.0);
        assert_eq!(params.start_date, d(2017, 1, 1));
        assert_eq!(params.interval, Interval::Months(3));
    }

    #[test]
    fn merge_prefers_higher_layer() {
        let file = ParamOverrides {
            ticker: Some("MSFT".into()),
            amount: Some(100.0),
            ..Default::default()
        };
        let flags = ParamOverrides {
            amount: Some(200.0),
            ..Default::default()
        };
        let merged = file.merge(flags);
        assert_eq!(merged.ticker.as_deref(), Some("MSFT"));
        assert_eq!(merged.amount, Some(200.0));
    }

    #[test]
    fn config_toml_parses_all_fields() {
        let overrides = ParamOverrides::from_toml(
            r#"
ticker = "spy"
start_date = "2018-01-01"
end_date = "2024-01-01"
interval = "2w"
amount = 250
"#,
        )
        .unwrap();
        assert_eq!(overrides.ticker.as_deref(), Some("spy"));
        assert_eq!(overrides.start_date, Some(d(2018, 1, 1)));
        assert_eq!(overrides.end_date, Some(d(2024, 1, 1)));
        assert_eq!(overrides.interval, Some(Interval::Weeks(2)));
        assert_eq!(overrides.amount, Some(250.0));
    }

    #[test]
    fn config_toml_rejects_unknown_keys() {
        assert!(ParamOverrides::from_toml("tickr = \"SPY\"").is_err());
    }

    #[test]
    fn config_toml_rejects_malformed_date() {
        assert!(ParamOverrides::from_toml("start_date = \"01/02/2018\"").is_err());
    }

    #[test]
    fn config_file_errors_carry_path() {
        let err = ParamOverrides::from_file(Path::new("/no/such/dcalab.toml")).unwrap_err();
        assert!(matches!(err, ParamError::ConfigRead { .. }));
        assert!(err.to_string().contains("/no/such/dcalab.toml"));
    }

    #[test]
    fn config_file_loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dcalab.toml");
        std::fs::write(&path, "ticker = \"NVDA\"\ninterval = 1\n").unwrap();
        let overrides = ParamOverrides::from_file(&path).unwrap();
        assert_eq!(overrides.ticker.as_deref(), Some("NVDA"));
        assert_eq!(overrides.interval, Some(Interval::Months(1)));

        std::fs::write(&path, "amount = \"lots\"\n").unwrap();
        let err = ParamOverrides::from_file(&path).unwrap_err();
        assert!(matches!(err, ParamError::ConfigParse { .. }));
    }

    #[test]
    fn config_file_rejects_non_finite_amount() {
        let dir = tempfile::tempdir().unwrap();
        for raw in ["nan", "inf", "-inf"] {
            let path = dir.path().join(format!("{raw}.toml"));
            std::fs::write(&path, format!("amount = {raw}\n")).unwrap();
            let err = ParamOverrides::from_file(&path).unwrap_err();
            assert!(
                matches!(err, ParamError::InvalidInput { field: "amount", .. }),
                "{raw}: {err}"
            );
        }
    }

    #[test]
    fn validate_accepts_missing_and_finite_amounts() {
        assert!(ParamOverrides::default().validate().is_ok());
        let overrides = ParamOverrides {
            amount: Some(0.0),
            ..Default::default()
        };
        assert!(overrides.validate().is_ok());
    }

    #[test]
    fn parse_date_names_field_on_error() {
        assert_eq!(parse_date("start date", "2020-02-29").unwrap(), d(2020, 2, 29));
        let err = parse_date("start date", "2020-13-01").unwrap_err();
        assert!(err.to_string().starts_with("invalid start date '2020-13-01'"));
    }

    #[test]
    fn parse_amount_accepts_integers_and_decimals() {
        assert_eq!(parse_amount("300").unwrap(), 300.0);
        assert_eq!(parse_amount(" 12.5 ").unwrap(), 12.5);
        assert!(parse_amount("three hundred").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn parse_amount_does_not_range_check() {
        assert_eq!(parse_amount("0").unwrap(), 0.0);
    }

    #[test]
    fn parse_interval_reports_field() {
        assert_eq!(parse_interval("6").unwrap(), Interval::Months(6));
        let err = parse_interval("monthly").unwrap_err();
        assert!(matches!(err, ParamError::InvalidInput { field: "interval", .. }));
    }
}
