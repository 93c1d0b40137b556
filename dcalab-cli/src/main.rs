//! DCA Lab CLI — simulate dollar-cost averaging into one security.
//!
//! Collects parameters (defaults → `--config` file → flags → `--interactive`
//! prompts), fetches daily prices, prints the final value and profit, and
//! opens a terminal chart of portfolio value against money invested.

mod prompt;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dcalab_core::chart::{ChartRenderer, NullRenderer};
use dcalab_core::data::{CsvProvider, PriceHistoryProvider, SyntheticProvider, YahooProvider};
use dcalab_core::params::parse_amount;
use dcalab_core::{run_pipeline, Interval, ParamOverrides, SimulationParameters};
use dcalab_tui::TerminalChartRenderer;

#[derive(Parser, Debug)]
#[command(
    name = "dcalab",
    version,
    about = "DCA Lab — dollar-cost-averaging simulator for a single security"
)]
struct Cli {
    /// Ticker symbol (e.g., TSLA, SPY). Defaults to TSLA.
    #[arg(long)]
    ticker: Option<String>,

    /// First day of the simulation (YYYY-MM-DD). Defaults to 2017-01-01.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Day the simulation stops, exclusive (YYYY-MM-DD). Defaults to 2024-09-01.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Contribution interval: months (3), or with a unit (3m, 2w, 10d). Defaults to 3.
    #[arg(long)]
    interval: Option<Interval>,

    /// Amount invested at each contribution. Defaults to 300.
    #[arg(long, value_parser = parse_amount)]
    amount: Option<f64>,

    /// TOML file with any of: ticker, start_date, end_date, interval, amount.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prompt for each parameter, showing the current value as default.
    #[arg(short, long, default_value_t = false)]
    interactive: bool,

    /// Price source. Defaults to yahoo, or csv when --csv is given.
    #[arg(long, value_enum)]
    source: Option<Source>,

    /// Yahoo-style CSV export to read prices from.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the report only; don't open the chart.
    #[arg(long, default_value_t = false)]
    no_chart: bool,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    Yahoo,
    Synthetic,
    Csv,
}

impl Cli {
    fn overrides(&self) -> ParamOverrides {
        ParamOverrides {
            ticker: self.ticker.clone(),
            start_date: self.start,
            end_date: self.end,
            interval: self.interval,
            amount: self.amount,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let params = collect_params(&cli)?;
    let provider = build_provider(cli.source, cli.csv.as_ref())?;
    let mut renderer = build_renderer(cli.no_chart);

    let stdout = io::stdout();
    let outcome = run_pipeline(&params, provider.as_ref(), renderer.as_mut(), &mut stdout.lock())?;

    info!(
        source = %outcome.source,
        purchases = outcome.events.len(),
        dropped_rows = outcome.clean.dropped,
        "run complete"
    );
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn collect_params(cli: &Cli) -> Result<SimulationParameters> {
    let file = match &cli.config {
        Some(path) => ParamOverrides::from_file(path)?,
        None => ParamOverrides::default(),
    };
    let params = SimulationParameters::default().apply(&file.merge(cli.overrides()));

    if !cli.interactive {
        return Ok(params);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    prompt::prompt_params(params, &mut stdin.lock(), &mut stdout.lock())
}

fn resolve_source(source: Option<Source>, csv: Option<&PathBuf>) -> Result<Source> {
    match (source, csv) {
        (None, Some(_)) | (Some(Source::Csv), Some(_)) => Ok(Source::Csv),
        (Some(Source::Csv), None) => bail!("--source csv requires --csv <PATH>"),
        (Some(other), Some(_)) => bail!("--csv cannot be combined with --source {other:?}"),
        (Some(other), None) => Ok(other),
        (None, None) => Ok(Source::Yahoo),
    }
}

fn build_provider(
    source: Option<Source>,
    csv: Option<&PathBuf>,
) -> Result<Box<dyn PriceHistoryProvider>> {
    let provider: Box<dyn PriceHistoryProvider> = match resolve_source(source, csv)? {
        Source::Yahoo => Box::new(YahooProvider::new().context("failed to set up Yahoo Finance")?),
        Source::Synthetic => Box::new(SyntheticProvider::new()),
        Source::Csv => {
            let path = csv.context("--source csv requires --csv <PATH>")?;
            Box::new(CsvProvider::new(path))
        }
    };
    Ok(provider)
}

fn build_renderer(no_chart: bool) -> Box<dyn ChartRenderer> {
    if no_chart {
        return Box::new(NullRenderer);
    }
    if !io::stdout().is_terminal() {
        warn!("stdout is not a terminal; skipping chart");
        return Box::new(NullRenderer);
    }
    Box::new(TerminalChartRenderer::default())
}
