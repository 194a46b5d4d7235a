use std::collections::BTreeSet;

use crate::models::FlatLog;

/// Sentinel filter value meaning "every date".
pub const ALL_DATES: &str = "ALL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFilter {
    All,
    Date(String),
}

impl LogFilter {
    pub fn parse(value: &str) -> LogFilter {
        if value == ALL_DATES {
            LogFilter::All
        } else {
            LogFilter::Date(value.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LogFilter::All => "all dates",
            LogFilter::Date(date) => date,
        }
    }
}

/// The listing view for a selected date, or for every date.
///
/// Unfiltered rows sort descending by date key; undated entries carry the
/// empty string as their key and land after every real date. A specific
/// date returns only exact matches, descending by submissions with the
/// original relative order kept on ties.
pub fn filter_logs(logs: &[FlatLog], filter: &LogFilter) -> Vec<FlatLog> {
    match filter {
        LogFilter::All => {
            let mut rows = logs.to_vec();
            rows.sort_by(|a, b| b.entry.date.cmp(&a.entry.date));
            rows
        }
        LogFilter::Date(date) => {
            let mut rows: Vec<FlatLog> = logs
                .iter()
                .filter(|log| log.entry.date == *date)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.entry.submissions_done.cmp(&a.entry.submissions_done));
            rows
        }
    }
}

/// Distinct date keys present in the listing, newest first, with the
/// [`ALL_DATES`] sentinel prepended. Feeds the date-filter picker.
pub fn unique_dates(logs: &[FlatLog]) -> Vec<String> {
    let dates: BTreeSet<&str> = logs
        .iter()
        .map(|log| log.entry.date.as_str())
        .filter(|date| !date.is_empty())
        .collect();

    std::iter::once(ALL_DATES.to_string())
        .chain(dates.into_iter().rev().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogEntry;

    fn log(email: &str, date: &str, submissions: u32) -> FlatLog {
        FlatLog {
            email: email.to_string(),
            entry: LogEntry {
                date: date.to_string(),
                day: String::new(),
                topic_learned: String::new(),
                what_you_learned: String::new(),
                jobs_applied: 0,
                submissions_done: submissions,
                recruiter_name: String::new(),
                attachment_url: None,
                attachment_filename: None,
            },
        }
    }

    #[test]
    fn sentinel_parses_to_all() {
        assert_eq!(LogFilter::parse("ALL"), LogFilter::All);
        assert_eq!(
            LogFilter::parse("2024-01-01"),
            LogFilter::Date("2024-01-01".to_string())
        );
    }

    #[test]
    fn all_keeps_every_row_newest_first() {
        let logs = vec![
            log("a@example.com", "2024-01-01", 1),
            log("b@example.com", "2024-01-03", 2),
            log("c@example.com", "2024-01-02", 3),
        ];

        let rows = filter_logs(&logs, &LogFilter::All);
        assert_eq!(rows.len(), logs.len());
        let dates: Vec<&str> = rows.iter().map(|row| row.entry.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-03", "2024-01-02", "2024-01-01"]);
    }

    #[test]
    fn undated_rows_sort_after_real_dates() {
        let logs = vec![
            log("a@example.com", "", 9),
            log("b@example.com", "2024-01-01", 1),
        ];

        let rows = filter_logs(&logs, &LogFilter::All);
        assert_eq!(rows[0].entry.date, "2024-01-01");
        assert_eq!(rows[1].entry.date, "");
    }

    #[test]
    fn date_filter_returns_matching_subset_by_submissions() {
        let logs = vec![
            log("a@example.com", "2024-01-01", 1),
            log("b@example.com", "2024-01-02", 5),
            log("c@example.com", "2024-01-01", 4),
        ];

        let rows = filter_logs(&logs, &LogFilter::parse("2024-01-01"));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.entry.date == "2024-01-01"));
        assert_eq!(rows[0].entry.submissions_done, 4);
        assert_eq!(rows[1].entry.submissions_done, 1);

        let all = filter_logs(&logs, &LogFilter::All);
        assert!(rows.iter().all(|row| all.contains(row)));
    }

    #[test]
    fn ties_keep_original_relative_order() {
        let logs = vec![
            log("first@example.com", "2024-01-01", 2),
            log("second@example.com", "2024-01-01", 2),
            log("third@example.com", "2024-01-01", 3),
        ];

        let rows = filter_logs(&logs, &LogFilter::parse("2024-01-01"));
        assert_eq!(rows[0].email, "third@example.com");
        assert_eq!(rows[1].email, "first@example.com");
        assert_eq!(rows[2].email, "second@example.com");
    }

    #[test]
    fn unique_dates_are_deduplicated_newest_first() {
        let logs = vec![
            log("a@example.com", "2024-01-01", 0),
            log("b@example.com", "2024-01-03", 0),
            log("c@example.com", "2024-01-01", 0),
            log("d@example.com", "", 0),
        ];

        assert_eq!(unique_dates(&logs), vec!["ALL", "2024-01-03", "2024-01-01"]);
    }
}
