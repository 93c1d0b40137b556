//! DCA Lab Core — price data, resampling, dollar-cost-averaging simulation, reporting.
//!
//! The crate is organised as the stages of a single run:
//! - Parameters (defaults, config file overrides, interval parsing)
//! - Data providers (Yahoo Finance, CSV import, synthetic) and row cleaning
//! - Resampling to one purchase date per contribution period
//! - The accumulation fold producing contribution events
//! - Reporting (final value, profit) and chart data for renderers
//! - The pipeline tying the stages together

pub mod chart;
pub mod data;
pub mod domain;
pub mod params;
pub mod pipeline;
pub mod report;
pub mod resample;
pub mod simulate;

pub use chart::{ChartData, ChartRenderer, NullRenderer, RenderError};
pub use data::{DataError, PriceHistoryProvider};
pub use domain::{ContributionEvent, Interval, PricePoint, PriceSeries};
pub use params::{ParamError, ParamOverrides, SimulationParameters};
pub use pipeline::{run_pipeline, run_simulation, PipelineError, SimulationOutcome};
pub use report::Summary;
pub use resample::resample_first;
pub use simulate::{simulate, SimulationError};
