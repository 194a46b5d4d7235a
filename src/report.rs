use std::fmt::Write;

use chrono::NaiveDate;

use crate::aggregate;
use crate::heatmap;
use crate::listing::{self, LogFilter};
use crate::models::Snapshot;
use crate::trend;

/// Substitute a placeholder for display strings the source left empty.
pub fn text_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Render the whole dashboard as a markdown report.
pub fn build_report(snapshot: &Snapshot, today: NaiveDate, filter: &LogFilter) -> String {
    let flat = aggregate::flatten_logs(&snapshot.analytics);
    let totals = aggregate::summarize_totals(&snapshot.analytics, &flat);
    let shares = aggregate::job_shares(&snapshot.analytics);
    let trend_points = trend::submissions_trend(&flat);
    let grid = heatmap::engagement_heatmap(&flat, today);
    let rows = listing::filter_logs(&flat, filter);
    let dates = listing::unique_dates(&flat);

    let mut output = String::new();

    let _ = writeln!(output, "# Progress Tracker Dashboard");
    let _ = writeln!(
        output,
        "Generated {} across {} tracked users",
        today,
        snapshot.analytics.len()
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");
    let _ = writeln!(output, "- Total logs: {}", totals.total_logs);
    let _ = writeln!(output, "- Total jobs applied: {}", totals.total_jobs);
    let _ = writeln!(output, "- Total submissions: {}", totals.total_submissions);
    let _ = writeln!(output, "- Recruiters contacted: {}", totals.unique_recruiters);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Submissions Trend");
    if trend_points.is_empty() {
        let _ = writeln!(output, "No submissions recorded yet.");
    } else {
        for point in &trend_points {
            let _ = writeln!(output, "- {}: {} submissions", point.date, point.submissions);
        }
    }

    if let Some(top) = &snapshot.top_performer {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Today's Highest Submissions");
        let _ = writeln!(
            output,
            "- {} on {} ({}): {} submissions, {} jobs applied",
            top.email,
            top.entry.date,
            text_or(&top.entry.day, "Day"),
            top.entry.submissions_done,
            top.entry.jobs_applied
        );
        let _ = writeln!(output, "- Topic: {}", text_or(&top.entry.topic_learned, "-"));
        let _ = writeln!(
            output,
            "- Recruiter: {}",
            text_or(&top.entry.recruiter_name, "N/A")
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Engagement Heatmap");
    let _ = writeln!(
        output,
        "Logs submitted per day over the six weeks ending {}.",
        today
    );
    for week in &grid.weeks {
        if let Some(first) = week.first() {
            let mut line = format!("- week of {}:", first.date);
            for cell in week {
                if cell.count == 0 {
                    line.push_str("  .");
                } else {
                    let _ = write!(line, " {:2}", cell.count);
                }
            }
            let _ = writeln!(output, "{line}");
        }
    }
    let _ = writeln!(output, "Peak: {} logs in a single day.", grid.max_count);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Jobs Contribution");
    if shares.is_empty() {
        let _ = writeln!(output, "No job application data available.");
    } else {
        let total: u64 = shares.iter().map(|share| share.value).sum();
        for share in &shares {
            let _ = writeln!(
                output,
                "- {}: {} jobs ({:.1}%)",
                share.email,
                share.value,
                share.value as f64 * 100.0 / total as f64
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Daily Logs ({})", filter.label());
    if dates.len() > 1 {
        let _ = writeln!(output, "Dates on record: {}", dates[1..].join(", "));
    }
    if rows.is_empty() {
        let _ = writeln!(output, "No daily logs available.");
    } else {
        for row in &rows {
            let _ = writeln!(
                output,
                "- {} | {} | {} | {} | {} jobs, {} submissions | recruiter {}",
                text_or(&row.entry.date, "-"),
                row.email,
                text_or(&row.entry.day, "-"),
                text_or(&row.entry.topic_learned, "-"),
                row.entry.jobs_applied,
                row.entry.submissions_done,
                text_or(&row.entry.recruiter_name, "N/A")
            );
        }
    }

    output
}
