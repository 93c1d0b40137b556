//! Interactive parameter prompts.
//!
//! Each prompt shows the value already resolved from defaults, the config file
//! and flags; an empty answer keeps it.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use dcalab_core::params::{normalize_ticker, parse_amount, parse_date, parse_interval};
use dcalab_core::{Interval, SimulationParameters};

/// Ask for every parameter in turn, starting from `current`.
pub fn prompt_params<R: BufRead, W: Write>(
    current: SimulationParameters,
    input: &mut R,
    output: &mut W,
) -> Result<SimulationParameters> {
    let mut params = current;

    if let Some(answer) = ask(input, output, &format!("Which share shall we test [{}]: ", params.ticker))? {
        params.ticker = normalize_ticker(&answer);
    }
    if let Some(answer) = ask(input, output, &format!("Start investment month [{}]: ", params.start_date))? {
        params.start_date = parse_date("start date", &answer)?;
    }
    if let Some(answer) = ask(input, output, &format!("End investment month [{}]: ", params.end_date))? {
        params.end_date = parse_date("end date", &answer)?;
    }
    if let Some(answer) = ask(input, output, &interval_prompt(params.interval))? {
        params.interval = parse_interval(&answer)?;
    }
    if let Some(answer) = ask(input, output, &format!("Your amount to invest [{}]: ", params.amount))? {
        params.amount = parse_amount(&answer)?;
    }

    Ok(params)
}

/// Month intervals print bare (`[3] months`); others carry their unit (`[2w]`).
fn interval_prompt(interval: Interval) -> String {
    match interval {
        Interval::Months(_) => format!("Invest every [{interval}] months: "),
        Interval::Weeks(_) | Interval::Days(_) => format!("Invest every [{interval}]: "),
    }
}

/// Print a prompt and read one line. `None` for an empty answer or end of input.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<Option<String>> {
    write!(output, "{prompt}").context("failed to write prompt")?;
    output.flush().context("failed to flush prompt")?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed to read answer")?;
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}
