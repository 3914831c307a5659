//! Period-bucketed frequency tallies.

use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::debug;

use super::{Period, Timeline};
use crate::record::Value;

/// Occurrence count per observed value.
pub type ValueCounts = HashMap<Value, u64>;

/// Field name -> value counts within one period.
pub type FrequencyTable = HashMap<String, ValueCounts>;

/// Period label -> frequency table.
pub type Buckets = HashMap<String, FrequencyTable>;

impl Timeline {
    /// Tally non-date fields per calendar day (`YYYYMMDD`) over `[start, end]`.
    pub fn split_daily(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Buckets {
        self.split_by(Period::Day, start, end)
    }

    /// Tally non-date fields per calendar month (`YYYYMM`) over `[start, end]`.
    pub fn split_monthly(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Buckets {
        self.split_by(Period::Month, start, end)
    }

    /// Tally every field other than the date key, bucketed by `period`.
    ///
    /// Range bounds behave as in [`Timeline::filter_by_date`]. A dated record
    /// always creates its bucket, even when it has no other fields.
    pub fn split_by(
        &self,
        period: Period,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Buckets {
        let mut buckets = Buckets::new();
        let mut scanned = 0usize;

        for (at, record) in self.dated_between(start, end) {
            scanned += 1;
            let table = buckets.entry(period.label(at)).or_default();
            for (field, value) in record.fields() {
                if field == self.date_key {
                    continue;
                }
                *table
                    .entry(field.to_string())
                    .or_default()
                    .entry(value.clone())
                    .or_default() += 1;
            }
        }

        debug!(
            ?period,
            records = self.records.len(),
            scanned,
            buckets = buckets.len(),
            "split timeline"
        );
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    fn counts(pairs: &[(&str, u64)]) -> ValueCounts {
        pairs.iter().map(|(v, n)| (Value::from(*v), *n)).collect()
    }

    fn three_records() -> Timeline {
        Timeline::new(vec![
            Record::new().with("datetime", at(2021, 1, 1)).with("month", "01"),
            Record::new().with("datetime", at(2021, 1, 2)).with("month", "01"),
            Record::new().with("datetime", at(2021, 2, 1)).with("month", "02"),
        ])
    }

    #[test]
    fn test_split_monthly_scenario() {
        let buckets = three_records().split_monthly(None, None);

        let mut expected = Buckets::new();
        expected.insert(
            "202101".to_string(),
            FrequencyTable::from([("month".to_string(), counts(&[("01", 2)]))]),
        );
        expected.insert(
            "202102".to_string(),
            FrequencyTable::from([("month".to_string(), counts(&[("02", 1)]))]),
        );
        assert_eq!(buckets, expected);
    }

    #[test]
    fn test_split_daily_one_bucket_per_day() {
        let buckets = three_records().split_daily(None, None);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets["20210102"]["month"], counts(&[("01", 1)]));
    }

    #[test]
    fn test_split_empty_timeline() {
        assert!(Timeline::default().split_daily(None, None).is_empty());
        assert!(Timeline::default().split_monthly(None, None).is_empty());
    }

    #[test]
    fn test_split_respects_range() {
        let buckets = three_records().split_monthly(Some(at(2021, 1, 2)), None);
        assert_eq!(buckets["202101"]["month"], counts(&[("01", 1)]));
        assert_eq!(buckets["202102"]["month"], counts(&[("02", 1)]));
    }

    #[test]
    fn test_split_excludes_date_key_and_undated_records() {
        let timeline = Timeline::new(vec![
            Record::new().with("datetime", at(2021, 1, 1)).with("kind", "a"),
            Record::new().with("kind", "a"),
            Record::new().with("datetime", 20210101).with("kind", "a"),
            Record::new().with("datetime", at(2021, 1, 1)),
        ]);
        let buckets = timeline.split_daily(None, None);
        assert_eq!(buckets.len(), 1);
        let table = &buckets["20210101"];
        assert!(!table.contains_key("datetime"));
        assert_eq!(table["kind"], counts(&[("a", 1)]));
    }

    #[test]
    fn test_split_counts_duplicates_and_mixed_values() {
        let record = Record::new()
            .with("datetime", at(2021, 5, 5))
            .with("status", "ok")
            .with("code", 200);
        let timeline = Timeline::new(vec![
            record.clone(),
            record,
            Record::new()
                .with("datetime", at(2021, 5, 6))
                .with("status", "err")
                .with("code", 500),
        ]);
        let buckets = timeline.split_monthly(None, None);
        let table = &buckets["202105"];
        assert_eq!(table["status"], counts(&[("ok", 2), ("err", 1)]));
        assert_eq!(table["code"][&Value::Int(200)], 2);
        assert_eq!(table["code"][&Value::Int(500)], 1);
    }

    #[test]
    fn test_bucket_created_for_record_without_other_fields() {
        let timeline = Timeline::new(vec![Record::new().with("datetime", at(2021, 7, 4))]);
        let buckets = timeline.split_daily(None, None);
        assert!(buckets["20210704"].is_empty());
    }
}
