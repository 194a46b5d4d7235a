use std::collections::HashSet;

use crate::models::{FlatLog, ShareRecord, TotalsSummary, UserAnalytics};

/// Flatten per-user record sets into one owner-tagged sequence.
///
/// Outer order follows the owner order of the snapshot, inner order each
/// owner's stored log order. Nothing is dropped or reordered here.
pub fn flatten_logs(analytics: &[UserAnalytics]) -> Vec<FlatLog> {
    analytics
        .iter()
        .flat_map(|user| {
            user.daily_logs.iter().map(|entry| FlatLog {
                email: user.email.clone(),
                entry: entry.clone(),
            })
        })
        .collect()
}

/// Summary counts for the dashboard header tiles.
///
/// Job and submission totals come from the reporting source's per-user
/// counters, not from re-summing the entries.
pub fn summarize_totals(analytics: &[UserAnalytics], logs: &[FlatLog]) -> TotalsSummary {
    let unique_recruiters = logs
        .iter()
        .filter(|log| !log.entry.recruiter_name.is_empty())
        .map(|log| log.entry.recruiter_name.as_str())
        .collect::<HashSet<_>>()
        .len();

    TotalsSummary {
        total_jobs: analytics.iter().map(|user| user.total_jobs).sum(),
        total_submissions: analytics.iter().map(|user| user.total_submissions).sum(),
        total_logs: logs.len(),
        unique_recruiters,
    }
}

/// Per-owner contribution shares for the jobs pie. An empty result signals
/// "no data" to the caller when no owner has any jobs on record.
pub fn job_shares(analytics: &[UserAnalytics]) -> Vec<ShareRecord> {
    let total: u64 = analytics.iter().map(|user| user.total_jobs).sum();
    if total == 0 {
        return Vec::new();
    }

    analytics
        .iter()
        .map(|user| ShareRecord {
            email: user.email.clone(),
            value: user.total_jobs,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogEntry;

    fn entry(date: &str, recruiter: &str, jobs: u32, submissions: u32) -> LogEntry {
        LogEntry {
            date: date.to_string(),
            day: String::new(),
            topic_learned: String::new(),
            what_you_learned: String::new(),
            jobs_applied: jobs,
            submissions_done: submissions,
            recruiter_name: recruiter.to_string(),
            attachment_url: None,
            attachment_filename: None,
        }
    }

    fn user(email: &str, total_jobs: u64, total_submissions: u64, logs: Vec<LogEntry>) -> UserAnalytics {
        UserAnalytics {
            email: email.to_string(),
            total_jobs,
            total_submissions,
            daily_logs: logs,
        }
    }

    #[test]
    fn flatten_preserves_owner_and_log_order() {
        let analytics = vec![
            user(
                "avery@example.com",
                0,
                0,
                vec![entry("2024-01-02", "", 1, 1), entry("2024-01-01", "", 2, 2)],
            ),
            user("jules@example.com", 0, 0, vec![entry("2024-01-03", "", 3, 3)]),
        ];

        let flat = flatten_logs(&analytics);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0].email, "avery@example.com");
        assert_eq!(flat[0].entry.date, "2024-01-02");
        assert_eq!(flat[1].entry.date, "2024-01-01");
        assert_eq!(flat[2].email, "jules@example.com");
    }

    #[test]
    fn totals_trust_upstream_counters_over_entry_sums() {
        // Counters deliberately disagree with the entries; the summary must
        // follow the counters.
        let analytics = vec![user(
            "avery@example.com",
            100,
            50,
            vec![entry("2024-01-01", "Alice", 1, 1)],
        )];
        let flat = flatten_logs(&analytics);

        let totals = summarize_totals(&analytics, &flat);
        assert_eq!(totals.total_jobs, 100);
        assert_eq!(totals.total_submissions, 50);
        assert_eq!(totals.total_logs, 1);
    }

    #[test]
    fn recruiter_count_is_distinct_nonempty_and_case_sensitive() {
        let analytics = vec![
            user(
                "avery@example.com",
                1,
                1,
                vec![
                    entry("2024-01-01", "Alice", 0, 0),
                    entry("2024-01-02", "alice", 0, 0),
                    entry("2024-01-03", "", 0, 0),
                ],
            ),
            user("jules@example.com", 1, 1, vec![entry("2024-01-04", "Alice", 0, 0)]),
        ];
        let flat = flatten_logs(&analytics);

        let totals = summarize_totals(&analytics, &flat);
        // "Alice" and "alice" are distinct; the empty name is skipped.
        assert_eq!(totals.unique_recruiters, 2);
        assert_eq!(totals.total_logs, 4);
    }

    #[test]
    fn shares_are_empty_when_no_jobs_recorded() {
        let analytics = vec![
            user("avery@example.com", 0, 5, vec![entry("2024-01-01", "", 3, 1)]),
            user("jules@example.com", 0, 2, Vec::new()),
        ];
        assert!(job_shares(&analytics).is_empty());
    }

    #[test]
    fn shares_follow_owner_input_order() {
        let analytics = vec![
            user("avery@example.com", 2, 0, Vec::new()),
            user("jules@example.com", 0, 0, Vec::new()),
            user("kiara@example.com", 7, 0, Vec::new()),
        ];

        let shares = job_shares(&analytics);
        assert_eq!(
            shares,
            vec![
                ShareRecord { email: "avery@example.com".to_string(), value: 2 },
                ShareRecord { email: "jules@example.com".to_string(), value: 0 },
                ShareRecord { email: "kiara@example.com".to_string(), value: 7 },
            ]
        );
    }
}
