//! The run pipeline: fetch → clean → resample → simulate → report → chart.

use std::io::Write;
use thiserror::Error;
use tracing::{debug, info};

use crate::chart::{ChartData, ChartRenderer, RenderError};
use crate::data::{to_price_series, CleanReport, DataError, DataSource, PriceHistoryProvider};
use crate::domain::{ContributionEvent, PriceSeries};
use crate::params::SimulationParameters;
use crate::report::{summarize, write_report, Summary};
use crate::resample::resample_first;
use crate::simulate::{simulate, SimulationError};

/// Errors from a pipeline run. Every variant ends the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data unavailable: {0}")]
    Data(#[from] DataError),

    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Everything a run produced, in stage order.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub params: SimulationParameters,
    pub source: DataSource,
    pub clean: CleanReport,
    pub daily: PriceSeries,
    pub purchases: PriceSeries,
    pub events: Vec<ContributionEvent>,
    pub summary: Summary,
}

impl SimulationOutcome {
    pub fn chart(&self) -> ChartData {
        ChartData::from_events(&self.params.ticker, &self.events)
    }
}

/// Fetch prices and run the simulation, without printing or drawing.
pub fn run_simulation(
    params: &SimulationParameters,
    provider: &dyn PriceHistoryProvider,
) -> Result<SimulationOutcome, PipelineError> {
    info!(
        ticker = %params.ticker,
        start = %params.start_date,
        end = %params.end_date,
        interval = %params.interval,
        amount = params.amount,
        provider = provider.name(),
        "starting DCA simulation"
    );

    let fetched = provider.fetch(&params.ticker, params.start_date, params.end_date)?;
    let (daily, clean) = to_price_series(&fetched.bars)?;
    let purchases = resample_first(&daily, params.interval);
    let events = simulate(&purchases, params.amount)?;
    debug!(events = events.len(), "accumulation complete");
    let summary = summarize(&events, &daily);

    Ok(SimulationOutcome {
        params: params.clone(),
        source: fetched.source,
        clean,
        daily,
        purchases,
        events,
        summary,
    })
}

/// Full run: simulate, print the two report lines to `out`, then render the chart.
pub fn run_pipeline<W: Write>(
    params: &SimulationParameters,
    provider: &dyn PriceHistoryProvider,
    renderer: &mut dyn ChartRenderer,
    out: &mut W,
) -> Result<SimulationOutcome, PipelineError> {
    let outcome = run_simulation(params, provider)?;
    write_report(&outcome.summary, out)?;
    out.flush()?;
    renderer.render(&outcome.chart())?;
    Ok(outcome)
}
