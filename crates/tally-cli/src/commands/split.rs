use clap::Subcommand;
use tally_core::{render_text, to_sorted, Config, OutputFormat, Period};

use super::{print_json, InputArgs, RangeArgs};

#[derive(Subcommand)]
pub enum SplitAction {
    /// Field frequencies per day (YYYYMMDD)
    Daily {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Field frequencies per month (YYYYMM)
    Monthly {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        range: RangeArgs,
    },
}

pub fn run(action: SplitAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (period, input, range) = match action {
        SplitAction::Daily { input, range } => (Period::Day, input, range),
        SplitAction::Monthly { input, range } => (Period::Month, input, range),
    };

    let timeline = input.load(&config)?;
    let (start, end) = range.resolve(&config)?;
    let buckets = timeline.split_by(period, start, end);

    match input.format(&config) {
        OutputFormat::Json => print_json(&to_sorted(&buckets), config.output.pretty)?,
        OutputFormat::Text => print!("{}", render_text(&buckets)),
    }
    Ok(())
}
