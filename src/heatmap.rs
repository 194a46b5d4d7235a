use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{FlatLog, Heatmap, HeatmapCell};

pub const HEATMAP_DAYS: i64 = 42;
pub const DAYS_PER_WEEK: usize = 7;

/// Fixed 42-day engagement grid ending at `today` inclusive, oldest first,
/// partitioned into 6 weeks of 7 days.
///
/// Callers supply `today`; the grid never reads a clock. Entries without
/// a date key never match any cell.
pub fn engagement_heatmap(logs: &[FlatLog], today: NaiveDate) -> Heatmap {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for log in logs {
        if log.entry.date.is_empty() {
            continue;
        }
        *counts.entry(log.entry.date.as_str()).or_insert(0) += 1;
    }

    let mut days = Vec::with_capacity(HEATMAP_DAYS as usize);
    for offset in (0..HEATMAP_DAYS).rev() {
        let date = today - Duration::days(offset);
        let key = date.format("%Y-%m-%d").to_string();
        days.push(HeatmapCell {
            count: counts.get(key.as_str()).copied().unwrap_or(0),
            weekday: date.weekday().num_days_from_sunday() as u8,
            date: key,
        });
    }

    let max_count = days.iter().map(|cell| cell.count).max().unwrap_or(0);
    let weeks = days.chunks(DAYS_PER_WEEK).map(|week| week.to_vec()).collect();

    Heatmap { weeks, max_count }
}

impl Heatmap {
    /// Visual weight for a cell count. Zero (or an all-empty grid) maps to
    /// a baseline of 0.0; positive counts scale monotonically within
    /// (0.25, 0.85], so no populated day ever renders at the baseline.
    pub fn intensity(&self, count: usize) -> f64 {
        if count == 0 || self.max_count == 0 {
            return 0.0;
        }
        0.25 + (count as f64 / self.max_count as f64) * 0.6
    }
}
