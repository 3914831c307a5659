//! # Tally Core Library
//!
//! In-memory statistics over timestamped records. A [`Timeline`] holds an
//! ordered list of [`Record`]s and answers date-range filters and
//! day/month frequency tallies; the CLI is a thin layer over the same API.
//!
//! ## Key Components
//!
//! - [`Timeline`]: range/day/month filters and `split_daily`/`split_monthly`
//! - [`Record`] / [`Value`]: the flat field-to-value data model
//! - [`loader`]: JSON and JSON-lines record files
//! - [`report`]: deterministic rendering of split results
//! - [`Config`]: TOML configuration (date key, timestamp formats, output)

pub mod error;
pub mod loader;
pub mod record;
pub mod report;
pub mod storage;
pub mod timeline;

pub use error::{ConfigError, CoreError, LoadError, ValidationError};
pub use loader::{load_records, parse_datetime, parse_datetime_end, LoadOptions};
pub use record::{Record, Value};
pub use report::{render_text, to_sorted, SortedBuckets};
pub use storage::{Config, OutputConfig, OutputFormat};
pub use timeline::{
    Buckets, DateSelector, FrequencyTable, Period, Timeline, ValueCounts, DEFAULT_DATE_KEY,
};
