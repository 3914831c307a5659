//! Timeline: in-memory filtering and period statistics over dated records.
//!
//! This module provides:
//! - Inclusive date-range filtering that keeps the stored record order
//! - Exact day/month filters by timestamp or period label
//! - Daily/monthly frequency tallies of every non-date field
//!
//! Records with a missing or non-timestamp date key are skipped by every
//! date-based query. Nothing is cached; each call re-reads the stored records.

mod period;
mod split;

pub use period::{DateSelector, Period};
pub use split::{Buckets, FrequencyTable, ValueCounts};

use chrono::NaiveDateTime;
use tracing::trace;

use crate::error::Result;
use crate::record::Record;

/// Field name holding each record's timestamp unless configured otherwise.
pub const DEFAULT_DATE_KEY: &str = "datetime";

/// Statistics accumulator over an ordered sequence of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    records: Vec<Record>,
    date_key: String,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Timeline {
    /// Create a timeline keyed on [`DEFAULT_DATE_KEY`].
    pub fn new(records: Vec<Record>) -> Self {
        Self::with_date_key(records, DEFAULT_DATE_KEY)
    }

    /// Create a timeline reading timestamps from `date_key`.
    pub fn with_date_key(records: Vec<Record>, date_key: impl Into<String>) -> Self {
        Self {
            records,
            date_key: date_key.into(),
        }
    }

    /// Stored records, in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Field read as each record's timestamp.
    pub fn date_key(&self) -> &str {
        &self.date_key
    }

    /// Number of stored records, dated or not.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record; later queries see it.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Give back the stored records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Records with a usable timestamp, paired with it, in stored order.
    fn dated(&self) -> impl Iterator<Item = (NaiveDateTime, &Record)> + '_ {
        let key = self.date_key.as_str();
        self.records
            .iter()
            .enumerate()
            .filter_map(move |(idx, record)| match record.datetime(key) {
                Some(at) => Some((at, record)),
                None => {
                    trace!(index = idx, date_key = key, "record has no timestamp, skipped");
                    None
                }
            })
    }

    fn dated_between(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> impl Iterator<Item = (NaiveDateTime, &Record)> + '_ {
        let start = start.unwrap_or(NaiveDateTime::MIN);
        let end = end.unwrap_or(NaiveDateTime::MAX);
        self.dated().filter(move |(at, _)| start <= *at && *at <= end)
    }

    /// Records whose timestamp lies in `[start, end]`, both ends inclusive.
    ///
    /// `None` leaves that side unbounded, so `filter_by_date(None, None)`
    /// yields every dated record. An inverted range yields nothing.
    pub fn filter_by_date(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> impl Iterator<Item = &Record> + '_ {
        self.dated_between(start, end).map(|(_, record)| record)
    }

    /// Records falling on the selected calendar day.
    ///
    /// # Errors
    ///
    /// Fails when given a label that is not exactly 8 characters (`YYYYMMDD`).
    pub fn filter_by_day(
        &self,
        date: impl Into<DateSelector>,
    ) -> Result<impl Iterator<Item = &Record> + '_> {
        self.filter_by_period(Period::Day, date.into())
    }

    /// Records falling in the selected calendar month.
    ///
    /// # Errors
    ///
    /// Fails when given a label that is not exactly 6 characters (`YYYYMM`).
    pub fn filter_by_month(
        &self,
        date: impl Into<DateSelector>,
    ) -> Result<impl Iterator<Item = &Record> + '_> {
        self.filter_by_period(Period::Month, date.into())
    }

    /// Records whose period label equals the one `selector` resolves to.
    pub fn filter_by_period(
        &self,
        period: Period,
        selector: DateSelector,
    ) -> Result<impl Iterator<Item = &Record> + '_> {
        let label = selector.resolve(period)?;
        Ok(self
            .dated()
            .filter(move |(at, _)| period.label(*at) == label)
            .map(|(_, record)| record))
    }
}

impl Extend<Record> for Timeline {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl FromIterator<Record> for Timeline {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
