//! Period granularity and day/month selectors.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Bucket granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// `YYYYMMDD`
    Day,
    /// `YYYYMM`
    Month,
}

impl Period {
    /// chrono format string producing this period's label.
    pub const fn format(self) -> &'static str {
        match self {
            Period::Day => "%Y%m%d",
            Period::Month => "%Y%m",
        }
    }

    /// Exact length of a label at this granularity.
    pub const fn label_len(self) -> usize {
        match self {
            Period::Day => 8,
            Period::Month => 6,
        }
    }

    /// Period label for a timestamp, e.g. `20210101` or `202101`.
    pub fn label(self, at: NaiveDateTime) -> String {
        at.format(self.format()).to_string()
    }
}

/// Which day or month a day/month filter selects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DateSelector {
    /// The current local time, read when the filter runs.
    #[default]
    Now,
    /// The period containing this timestamp.
    At(NaiveDateTime),
    /// A label already in `YYYYMMDD` / `YYYYMM` form.
    Label(String),
}

impl DateSelector {
    /// Resolve to a period label.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPeriodLabel`] when a `Label` does not
    /// have exactly `period.label_len()` characters.
    pub fn resolve(&self, period: Period) -> Result<String, ValidationError> {
        match self {
            DateSelector::Now => Ok(period.label(Local::now().naive_local())),
            DateSelector::At(at) => Ok(period.label(*at)),
            DateSelector::Label(label) => {
                if label.chars().count() == period.label_len() {
                    Ok(label.clone())
                } else {
                    Err(ValidationError::InvalidPeriodLabel {
                        label: label.clone(),
                        expected_len: period.label_len(),
                    })
                }
            }
        }
    }
}

impl From<NaiveDateTime> for DateSelector {
    fn from(at: NaiveDateTime) -> Self {
        DateSelector::At(at)
    }
}

impl From<NaiveDate> for DateSelector {
    fn from(date: NaiveDate) -> Self {
        DateSelector::At(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<&str> for DateSelector {
    fn from(label: &str) -> Self {
        DateSelector::Label(label.to_string())
    }
}

impl From<String> for DateSelector {
    fn from(label: String) -> Self {
        DateSelector::Label(label)
    }
}
