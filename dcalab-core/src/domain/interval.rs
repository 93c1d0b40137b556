//! Contribution interval: how often a purchase is made.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Period length between contributions.
///
/// Periods are calendar-aligned and anchored on the first observation of a
/// series: `Months(3)` starting in January groups Jan–Mar, Apr–Jun, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntervalRepr", into = "String")]
pub enum Interval {
    Days(u32),
    Weeks(u32),
    Months(u32),
}

impl Default for Interval {
    fn default() -> Self {
        Interval::Months(3)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalParseError {
    #[error("interval must be a positive number of months, e.g. 3, \"3m\", \"2w\" or \"10d\" (got '{0}')")]
    Malformed(String),

    #[error("interval length must be at least 1")]
    Zero,
}

impl Interval {
    /// Number of units in one period.
    pub fn count(&self) -> u32 {
        match *self {
            Interval::Days(n) | Interval::Weeks(n) | Interval::Months(n) => n,
        }
    }

    /// Index of the period containing `date`, counting from the period that
    /// contains `anchor`.
    pub fn period_index(&self, anchor: NaiveDate, date: NaiveDate) -> i64 {
        let n = i64::from(self.count().max(1));
        match *self {
            Interval::Days(_) => (date - anchor).num_days().div_euclid(n),
            Interval::Weeks(_) => {
                let weeks = (week_start(date) - week_start(anchor)).num_days() / 7;
                weeks.div_euclid(n)
            }
            Interval::Months(_) => (month_ordinal(date) - month_ordinal(anchor)).div_euclid(n),
        }
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn month_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Interval::Months(n) => write!(f, "{n}"),
            Interval::Weeks(n) => write!(f, "{n}w"),
            Interval::Days(n) => write!(f, "{n}d"),
        }
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        let malformed = || IntervalParseError::Malformed(s.trim().to_string());

        // "3ME" is the month-end alias used by dataframe libraries.
        let (digits, ctor): (&str, fn(u32) -> Interval) =
            if let Some(d) = text.strip_suffix("me").or_else(|| text.strip_suffix('m')) {
                (d, Interval::Months)
            } else if let Some(d) = text.strip_suffix('w') {
                (d, Interval::Weeks)
            } else if let Some(d) = text.strip_suffix('d') {
                (d, Interval::Days)
            } else {
                (text.as_str(), Interval::Months)
            };

        let n: u32 = digits.trim().parse().map_err(|_| malformed())?;
        if n == 0 {
            return Err(IntervalParseError::Zero);
        }
        Ok(ctor(n))
    }
}

/// Accepted TOML forms: a bare integer (months) or a string with an optional unit.
#[derive(Deserialize)]
#[serde(untagged)]
enum IntervalRepr {
    Months(u32),
    Text(String),
}

impl TryFrom<IntervalRepr> for Interval {
    type Error = IntervalParseError;

    fn try_from(repr: IntervalRepr) -> Result<Self, Self::Error> {
        match repr {
            IntervalRepr::Months(0) => Err(IntervalParseError::Zero),
            IntervalRepr::Months(n) => Ok(Interval::Months(n)),
            IntervalRepr::Text(s) => s.parse(),
        }
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.to_string()
    }
}
