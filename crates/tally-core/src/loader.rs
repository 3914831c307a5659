//! Record files.
//!
//! Reads a JSON array of objects, or JSON lines (`.jsonl` / `.ndjson`), into
//! [`Record`]s. Only the date-key field is interpreted: string values there
//! are parsed with the configured formats and become [`Value::DateTime`].
//! Strings that match no format are kept as text, so the record is later
//! skipped by date queries instead of failing the load.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{LoadError, Result, ValidationError};
use crate::record::{Record, Value};
use crate::storage::Config;

/// How to interpret a record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub date_key: String,
    pub datetime_formats: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for LoadOptions {
    fn from(config: &Config) -> Self {
        Self {
            date_key: config.date_key.clone(),
            datetime_formats: config.datetime_formats.clone(),
        }
    }
}

impl LoadOptions {
    pub fn with_date_key(mut self, date_key: impl Into<String>) -> Self {
        self.date_key = date_key.into();
        self
    }
}

/// Parse a timestamp with the first matching format.
///
/// Formats without a time component are tried as dates and resolve to
/// midnight.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDateTime`] when no format matches.
pub fn parse_datetime(input: &str, formats: &[String]) -> Result<NaiveDateTime, ValidationError> {
    parse_with(input, formats, |d| Some(d.and_time(NaiveTime::MIN)))
}

/// Like [`parse_datetime`], but a date-only match resolves to the last
/// nanosecond of that day. Use it for inclusive upper bounds, so `2021-01-31`
/// keeps records from later on the 31st.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDateTime`] when no format matches.
pub fn parse_datetime_end(
    input: &str,
    formats: &[String],
) -> Result<NaiveDateTime, ValidationError> {
    parse_with(input, formats, |d| d.and_hms_nano_opt(23, 59, 59, 999_999_999))
}

fn parse_with(
    input: &str,
    formats: &[String],
    on_date: impl Fn(NaiveDate) -> Option<NaiveDateTime>,
) -> Result<NaiveDateTime, ValidationError> {
    let input = input.trim();
    formats
        .iter()
        .find_map(|fmt| {
            NaiveDateTime::parse_from_str(input, fmt).ok().or_else(|| {
                NaiveDate::parse_from_str(input, fmt)
                    .ok()
                    .and_then(&on_date)
            })
        })
        .ok_or_else(|| ValidationError::InvalidDateTime {
            input: input.to_string(),
        })
}

/// Load every record from `path`.
///
/// # Errors
///
/// Fails on unreadable files, malformed JSON, or top-level elements that are
/// not objects.
pub fn load_records(path: &Path, options: &LoadOptions) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let lines = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("jsonl") | Some("ndjson")
    );
    let records = if lines {
        parse_json_lines(path, &content, options)?
    } else {
        parse_json_array(path, &content, options)?
    };

    debug!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

fn parse_json_array(path: &Path, content: &str, options: &LoadOptions) -> Result<Vec<Record>> {
    let parsed: serde_json::Value =
        serde_json::from_str(content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let serde_json::Value::Array(items) = parsed else {
        return Err(LoadError::NotAnArray {
            path: path.to_path_buf(),
        }
        .into());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| to_record(path, idx, item, options))
        .collect()
}

fn parse_json_lines(path: &Path, content: &str, options: &LoadOptions) -> Result<Vec<Record>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let item = serde_json::from_str(line).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })?;
            to_record(path, idx + 1, item, options)
        })
        .collect()
}

fn to_record(
    path: &Path,
    position: usize,
    item: serde_json::Value,
    options: &LoadOptions,
) -> Result<Record> {
    let serde_json::Value::Object(fields) = item else {
        return Err(LoadError::NotAnObject {
            path: path.to_path_buf(),
            position,
        }
        .into());
    };

    Ok(fields
        .into_iter()
        .map(|(field, raw)| {
            let value = if field == options.date_key {
                date_value(position, raw, &options.datetime_formats)
            } else {
                Value::from_json(raw)
            };
            (field, value)
        })
        .collect())
}

fn date_value(position: usize, raw: serde_json::Value, formats: &[String]) -> Value {
    match raw {
        serde_json::Value::String(s) => match parse_datetime(&s, formats) {
            Ok(at) => Value::DateTime(at),
            Err(_) => {
                warn!(position, value = %s, "unparseable timestamp, record will be undated");
                Value::Text(s)
            }
        },
        other => Value::from_json(other),
    }
}
