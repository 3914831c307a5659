pub mod config;
pub mod filter;
pub mod split;

use chrono::NaiveDateTime;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tally_core::{
    load_records, parse_datetime, parse_datetime_end, Config, CoreError, LoadOptions, OutputFormat, Timeline,
    ValidationError,
};

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Json,
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

/// Where records come from and how to print results.
#[derive(Args)]
pub struct InputArgs {
    /// Record file: a JSON array, or JSON lines with a .jsonl/.ndjson extension
    #[arg(short, long)]
    pub input: PathBuf,
    /// Field holding each record's timestamp (default from config)
    #[arg(long)]
    pub date_key: Option<String>,
    /// Output format (default from config)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

impl InputArgs {
    pub fn load(&self, config: &Config) -> Result<Timeline, CoreError> {
        let date_key = self
            .date_key
            .clone()
            .unwrap_or_else(|| config.date_key.clone());
        let options = LoadOptions::from(config).with_date_key(date_key.clone());
        let records = load_records(&self.input, &options)?;
        Ok(Timeline::with_date_key(records, date_key))
    }

    pub fn format(&self, config: &Config) -> OutputFormat {
        self.format.map(Into::into).unwrap_or(config.output.format)
    }
}

/// Inclusive timestamp bounds; either side may be omitted.
#[derive(Args)]
pub struct RangeArgs {
    /// Earliest timestamp to include
    #[arg(long)]
    pub start: Option<String>,
    /// Latest timestamp to include; a bare date covers that whole day
    #[arg(long)]
    pub end: Option<String>,
}

impl RangeArgs {
    pub fn resolve(
        &self,
        config: &Config,
    ) -> Result<(Option<NaiveDateTime>, Option<NaiveDateTime>), CoreError> {
        let formats = &config.datetime_formats;
        let start = self
            .start
            .as_deref()
            .map(|s| parse_datetime(s, formats))
            .transpose()?;
        let end = self
            .end
            .as_deref()
            .map(|s| parse_datetime_end(s, formats))
            .transpose()?;
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(ValidationError::InvalidRange { start, end }.into());
            }
        }
        Ok((start, end))
    }
}

pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CoreError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}
