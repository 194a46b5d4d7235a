use std::collections::BTreeMap;

use crate::models::{FlatLog, TrendPoint};

/// Date-ordered series of summed submissions across all owners.
///
/// Entries without a date key are dropped. One point per distinct date;
/// lexicographic order on the keys, which is chronological for the ISO
/// dates the reporting source emits.
pub fn submissions_trend(logs: &[FlatLog]) -> Vec<TrendPoint> {
    let mut by_date: BTreeMap<&str, u64> = BTreeMap::new();
    for log in logs {
        if log.entry.date.is_empty() {
            continue;
        }
        *by_date.entry(log.entry.date.as_str()).or_insert(0) +=
            u64::from(log.entry.submissions_done);
    }

    by_date
        .into_iter()
        .map(|(date, submissions)| TrendPoint {
            date: date.to_string(),
            submissions,
        })
        .collect()
}
