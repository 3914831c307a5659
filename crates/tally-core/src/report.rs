//! Presentation of split results.
//!
//! [`Buckets`] are hash maps with no stable order. These helpers sort every
//! level so that output is deterministic.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::timeline::Buckets;

/// Buckets with every level ordered and values keyed by their display text.
pub type SortedBuckets = BTreeMap<String, BTreeMap<String, BTreeMap<String, u64>>>;

/// Sort buckets for output.
///
/// Distinct values that display identically (`1` and `"1"`) share a key and
/// their counts are summed.
pub fn to_sorted(buckets: &Buckets) -> SortedBuckets {
    let mut sorted = SortedBuckets::new();
    for (label, table) in buckets {
        let fields = sorted.entry(label.clone()).or_default();
        for (field, counts) in table {
            let values = fields.entry(field.clone()).or_default();
            for (value, count) in counts {
                *values.entry(value.to_string()).or_default() += count;
            }
        }
    }
    sorted
}

/// Render buckets as an indented plain-text listing, one block per period.
pub fn render_text(buckets: &Buckets) -> String {
    if buckets.is_empty() {
        return "No records in range.\n".to_string();
    }

    let mut output = String::new();
    for (label, fields) in to_sorted(buckets) {
        let _ = writeln!(output, "{label}:");
        for (field, values) in fields {
            let counts: Vec<String> = values
                .iter()
                .map(|(value, count)| format!("{value}={count}"))
                .collect();
            let _ = writeln!(output, "  {field}: {}", counts.join(", "));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::timeline::Timeline;
    use chrono::NaiveDate;

    fn timeline() -> Timeline {
        let at = |m, d| {
            NaiveDate::from_ymd_opt(2021, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        Timeline::new(vec![
            Record::new().with("datetime", at(2, 1)).with("month", "02").with("id", 3),
            Record::new().with("datetime", at(1, 2)).with("month", "01").with("id", 2),
            Record::new().with("datetime", at(1, 1)).with("month", "01").with("id", 1),
        ])
    }

    #[test]
    fn test_render_text_sorted() {
        let text = render_text(&timeline().split_monthly(None, None));
        assert_eq!(
            text,
            "202101:\n  id: 1=1, 2=1\n  month: 01=2\n202102:\n  id: 3=1\n  month: 02=1\n"
        );
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text(&Buckets::new()), "No records in range.\n");
    }

    #[test]
    fn test_sorted_json_shape() {
        let sorted = to_sorted(&timeline().split_monthly(None, None));
        let json = serde_json::to_value(&sorted).unwrap();
        assert_eq!(json["202101"]["month"]["01"], 2);
        assert_eq!(json["202102"]["id"]["3"], 1);
    }

    #[test]
    fn test_colliding_display_values_are_summed() {
        let at = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let timeline = Timeline::new(vec![
            Record::new().with("datetime", at).with("n", 1),
            Record::new().with("datetime", at).with("n", "1"),
        ]);
        let sorted = to_sorted(&timeline.split_daily(None, None));
        assert_eq!(sorted["20210101"]["n"]["1"], 2);
    }
}
