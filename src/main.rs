use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{ArgGroup, Parser, Subcommand};

mod aggregate;
mod heatmap;
mod listing;
mod models;
mod reflections;
mod report;
mod source;
mod trend;

use models::{LogEntry, Snapshot};
use report::text_or;

#[derive(Parser)]
#[command(name = "progress-tracker")]
#[command(about = "Log analytics for the employee progress tracker dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print dashboard totals across all tracked users
    Summary {
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Per-user shares of all jobs applied
    Shares {
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Daily submission trend across all users
    Trend {
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Six-week engagement grid of logs per day
    Heatmap {
        #[arg(long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        today: Option<String>,
    },
    /// List daily logs for one date, or for all dates
    Logs {
        #[arg(long)]
        snapshot: Option<PathBuf>,
        #[arg(long, default_value = listing::ALL_DATES)]
        date: String,
    },
    /// Date-grouped reflections for one user
    #[command(group(
        ArgGroup::new("scope")
            .args(["email", "logs"])
            .required(true)
            .multiple(false)
    ))]
    Reflections {
        #[arg(long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        logs: Option<PathBuf>,
    },
    /// Recently used recruiter names for one user
    #[command(group(
        ArgGroup::new("scope")
            .args(["email", "logs"])
            .required(true)
            .multiple(false)
    ))]
    Recruiters {
        #[arg(long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        logs: Option<PathBuf>,
    },
    /// Jobs and submissions series for one user, oldest first
    #[command(group(
        ArgGroup::new("scope")
            .args(["email", "logs"])
            .required(true)
            .multiple(false)
    ))]
    Progress {
        #[arg(long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        logs: Option<PathBuf>,
    },
    /// Render the full dashboard as a markdown report
    Report {
        #[arg(long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        today: Option<String>,
        #[arg(long, default_value = listing::ALL_DATES)]
        date: String,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Build a snapshot from a raw log export (JSON or CSV)
    Import {
        #[arg(long)]
        entries: PathBuf,
        #[arg(long)]
        today: Option<String>,
        #[arg(long, default_value = "snapshot.json")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { snapshot } => {
            let snapshot = load_snapshot_arg(snapshot)?;
            let flat = aggregate::flatten_logs(&snapshot.analytics);
            let totals = aggregate::summarize_totals(&snapshot.analytics, &flat);
            println!("Tracked users: {}", snapshot.analytics.len());
            println!("Total logs: {}", totals.total_logs);
            println!("Total jobs applied: {}", totals.total_jobs);
            println!("Total submissions: {}", totals.total_submissions);
            println!("Recruiters contacted: {}", totals.unique_recruiters);
        }
        Commands::Shares { snapshot } => {
            let snapshot = load_snapshot_arg(snapshot)?;
            let shares = aggregate::job_shares(&snapshot.analytics);
            if shares.is_empty() {
                println!("No job applications recorded yet.");
                return Ok(());
            }
            let total: u64 = shares.iter().map(|share| share.value).sum();
            for share in &shares {
                println!(
                    "- {}: {} jobs ({:.1}%)",
                    share.email,
                    share.value,
                    share.value as f64 * 100.0 / total as f64
                );
            }
        }
        Commands::Trend { snapshot } => {
            let snapshot = load_snapshot_arg(snapshot)?;
            let flat = aggregate::flatten_logs(&snapshot.analytics);
            let trend = trend::submissions_trend(&flat);
            if trend.is_empty() {
                println!("No dated submissions recorded yet.");
                return Ok(());
            }
            for point in &trend {
                println!("- {}: {} submissions", point.date, point.submissions);
            }
        }
        Commands::Heatmap { snapshot, today } => {
            let snapshot = load_snapshot_arg(snapshot)?;
            let today = resolve_today(today)?;
            let flat = aggregate::flatten_logs(&snapshot.analytics);
            let grid = heatmap::engagement_heatmap(&flat, today);
            println!("Logs per day over the six weeks ending {today}:");
            for week in &grid.weeks {
                if let Some(first) = week.first() {
                    let cells: String = week
                        .iter()
                        .map(|cell| shade(grid.intensity(cell.count)))
                        .collect();
                    println!("{}  {}", first.date, cells);
                }
            }
            println!("Peak: {} logs in a single day.", grid.max_count);
        }
        Commands::Logs { snapshot, date } => {
            let snapshot = load_snapshot_arg(snapshot)?;
            let flat = aggregate::flatten_logs(&snapshot.analytics);
            let filter = listing::LogFilter::parse(&date);
            let rows = listing::filter_logs(&flat, &filter);
            if rows.is_empty() {
                println!("No daily logs for {}.", filter.label());
                return Ok(());
            }
            for row in &rows {
                println!(
                    "- {} | {} | {} | {} jobs, {} submissions | recruiter {}",
                    text_or(&row.entry.date, "-"),
                    row.email,
                    text_or(&row.entry.day, "-"),
                    row.entry.jobs_applied,
                    row.entry.submissions_done,
                    text_or(&row.entry.recruiter_name, "N/A")
                );
            }
        }
        Commands::Reflections { snapshot, email, logs } => {
            let entries = owner_logs(snapshot, email, logs)?;
            let summary = reflections::owner_summary(&entries);
            println!(
                "{} jobs applied, {} submissions, {} recruiters contacted",
                summary.total_jobs, summary.total_submissions, summary.recruiter_count
            );
            let groups = reflections::group_reflections(&entries);
            if groups.is_empty() {
                println!("No logs submitted yet.");
                return Ok(());
            }
            for group in &groups {
                println!("{}:", group.date);
                for entry in &group.entries {
                    println!(
                        "  - {} | {} | recruiter {}",
                        text_or(&entry.day, "-"),
                        text_or(&entry.topic_learned, "-"),
                        text_or(&entry.recruiter_name, "N/A")
                    );
                    if !entry.what_you_learned.is_empty() {
                        println!("    {}", entry.what_you_learned);
                    }
                }
            }
        }
        Commands::Recruiters { snapshot, email, logs } => {
            let entries = owner_logs(snapshot, email, logs)?;
            let names = reflections::recruiter_suggestions(&entries);
            if names.is_empty() {
                println!("No recruiters recorded yet.");
                return Ok(());
            }
            for name in &names {
                println!("- {name}");
            }
        }
        Commands::Progress { snapshot, email, logs } => {
            let entries = owner_logs(snapshot, email, logs)?;
            let series = reflections::progress_series(&entries);
            if series.is_empty() {
                println!("No logs submitted yet.");
                return Ok(());
            }
            for point in &series {
                println!(
                    "- {}: {} jobs, {} submissions",
                    text_or(&point.date, "-"),
                    point.jobs,
                    point.submissions
                );
            }
        }
        Commands::Report { snapshot, today, date, out } => {
            let snapshot = load_snapshot_arg(snapshot)?;
            let today = resolve_today(today)?;
            let filter = listing::LogFilter::parse(&date);
            let report = report::build_report(&snapshot, today, &filter);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Import { entries, today, out } => {
            let rows = source::load_entries(&entries)?;
            let today = resolve_today(today)?;
            let snapshot = source::build_snapshot(rows, today);
            let json = serde_json::to_string_pretty(&snapshot)?;
            std::fs::write(&out, json)?;
            println!(
                "Snapshot for {} users written to {}.",
                snapshot.analytics.len(),
                out.display()
            );
        }
    }

    Ok(())
}

fn load_snapshot_arg(arg: Option<PathBuf>) -> anyhow::Result<Snapshot> {
    let path = match arg {
        Some(path) => path,
        None => std::env::var("SNAPSHOT_PATH")
            .map(PathBuf::from)
            .context("pass --snapshot or set SNAPSHOT_PATH to the reporting export")?,
    };
    source::load_snapshot(&path)
}

/// The clock is read here and nowhere else; every view takes the date as a
/// parameter.
fn resolve_today(arg: Option<String>) -> anyhow::Result<NaiveDate> {
    match arg {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("invalid --today value {raw}, expected YYYY-MM-DD")),
        None => Ok(Utc::now().date_naive()),
    }
}

fn owner_logs(
    snapshot: Option<PathBuf>,
    email: Option<String>,
    logs: Option<PathBuf>,
) -> anyhow::Result<Vec<LogEntry>> {
    if let Some(path) = logs {
        let rows = source::load_entries(&path)?;
        return Ok(rows.into_iter().map(source::RawEntry::into_log).collect());
    }

    let email = email.context("pass --email together with --snapshot")?;
    let snapshot = load_snapshot_arg(snapshot)?;
    let user = snapshot
        .analytics
        .into_iter()
        .find(|user| user.email == email)
        .with_context(|| format!("no tracked user with email {email}"))?;
    Ok(user.daily_logs)
}

fn shade(weight: f64) -> char {
    if weight == 0.0 {
        '.'
    } else if weight <= 0.45 {
        '░'
    } else if weight <= 0.65 {
        '▒'
    } else {
        '█'
    }
}
