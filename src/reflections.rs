use std::collections::{HashMap, HashSet};

use crate::models::{GroupedReflection, LogEntry, OwnerSummary, ProgressPoint};

/// Bucket key used for entries that carry no date.
pub const UNKNOWN_DATE: &str = "Unknown";

/// Most recruiter names the suggestion list will hold.
pub const MAX_RECRUITER_SUGGESTIONS: usize = 6;

/// One owner's entries bucketed by date for the reflections view.
///
/// Buckets are collected in first-seen order, then re-ordered newest date
/// first. Within a bucket, entries sort descending by their day label as
/// plain strings, so "Day-2" comes before "Day-10". That ordering is what
/// the dashboard has always shown; keep it.
pub fn group_reflections(logs: &[LogEntry]) -> Vec<GroupedReflection> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<LogEntry>> = HashMap::new();

    for entry in logs {
        let key = if entry.date.is_empty() {
            UNKNOWN_DATE.to_string()
        } else {
            entry.date.clone()
        };
        if !buckets.contains_key(&key) {
            order.push(key.clone());
        }
        buckets.entry(key).or_default().push(entry.clone());
    }

    let mut groups: Vec<GroupedReflection> = order
        .into_iter()
        .map(|date| {
            let mut entries = buckets.remove(&date).unwrap_or_default();
            entries.sort_by(|a, b| b.day.cmp(&a.day));
            GroupedReflection { date, entries }
        })
        .collect();
    groups.sort_by(|a, b| b.date.cmp(&a.date));
    groups
}

/// Up to six distinct recruiter names in first-seen order, empties dropped.
pub fn recruiter_suggestions(logs: &[LogEntry]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut names = Vec::new();

    for entry in logs {
        if entry.recruiter_name.is_empty() || !seen.insert(entry.recruiter_name.as_str()) {
            continue;
        }
        names.push(entry.recruiter_name.clone());
        if names.len() == MAX_RECRUITER_SUGGESTIONS {
            break;
        }
    }

    names
}

/// Totals for one owner's own dashboard, recomputed from their entries.
/// The recruiter count mirrors the suggestion list, so it tops out at
/// [`MAX_RECRUITER_SUGGESTIONS`].
pub fn owner_summary(logs: &[LogEntry]) -> OwnerSummary {
    OwnerSummary {
        total_jobs: logs.iter().map(|entry| u64::from(entry.jobs_applied)).sum(),
        total_submissions: logs
            .iter()
            .map(|entry| u64::from(entry.submissions_done))
            .sum(),
        recruiter_count: recruiter_suggestions(logs).len(),
    }
}

/// One owner's charting series. The reporting source stores logs newest
/// first; the chart wants them oldest first.
pub fn progress_series(logs: &[LogEntry]) -> Vec<ProgressPoint> {
    logs.iter()
        .rev()
        .map(|entry| ProgressPoint {
            date: entry.date.clone(),
            jobs: entry.jobs_applied,
            submissions: entry.submissions_done,
        })
        .collect()
}
