use clap::{Args, Subcommand};
use tally_core::{parse_datetime, Config, CoreError, DateSelector, OutputFormat, Period, Record};

use super::{print_json, InputArgs, RangeArgs};

/// Which day or month to select. Defaults to now.
#[derive(Args)]
pub struct SelectorArgs {
    /// A timestamp inside the wanted period
    #[arg(long, conflicts_with = "label")]
    pub at: Option<String>,
    /// Period label: YYYYMMDD for days, YYYYMM for months
    #[arg(long)]
    pub label: Option<String>,
}

impl SelectorArgs {
    fn resolve(&self, config: &Config) -> Result<DateSelector, CoreError> {
        if let Some(at) = &self.at {
            return Ok(DateSelector::At(parse_datetime(at, &config.datetime_formats)?));
        }
        Ok(match &self.label {
            Some(label) => DateSelector::Label(label.clone()),
            None => DateSelector::Now,
        })
    }
}

#[derive(Subcommand)]
pub enum FilterAction {
    /// Records with timestamps between --start and --end (inclusive)
    Range {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Records on one calendar day
    Day {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        selector: SelectorArgs,
    },
    /// Records in one calendar month
    Month {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        selector: SelectorArgs,
    },
}

fn by_period(
    period: Period,
    input: &InputArgs,
    selector: &SelectorArgs,
    config: &Config,
) -> Result<Vec<Record>, CoreError> {
    let timeline = input.load(config)?;
    let selector = selector.resolve(config)?;
    let hits = timeline
        .filter_by_period(period, selector)?
        .cloned()
        .collect();
    Ok(hits)
}

pub fn run(action: FilterAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let (input, hits): (_, Vec<Record>) = match action {
        FilterAction::Range { input, range } => {
            let timeline = input.load(&config)?;
            let (start, end) = range.resolve(&config)?;
            let hits: Vec<Record> = timeline.filter_by_date(start, end).cloned().collect();
            (input, hits)
        }
        FilterAction::Day { input, selector } => {
            let hits = by_period(Period::Day, &input, &selector, &config)?;
            (input, hits)
        }
        FilterAction::Month { input, selector } => {
            let hits = by_period(Period::Month, &input, &selector, &config)?;
            (input, hits)
        }
    };

    tracing::debug!(matched = hits.len(), "filter complete");
    match input.format(&config) {
        OutputFormat::Json => print_json(&hits, config.output.pretty)?,
        OutputFormat::Text => {
            for record in &hits {
                println!("{}", serde_json::to_string(record)?);
            }
        }
    }
    Ok(())
}
