use serde::Serialize;

/// One daily progress record submitted by a tracked user.
///
/// Optional counters are already coerced to numbers at the data-source
/// boundary; an empty `date` means the record carried no calendar key and
/// is excluded from date-keyed views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub date: String,
    pub day: String,
    pub topic_learned: String,
    pub what_you_learned: String,
    pub jobs_applied: u32,
    pub submissions_done: u32,
    pub recruiter_name: String,
    pub attachment_url: Option<String>,
    pub attachment_filename: Option<String>,
}

/// One user's pre-aggregated counters plus their log entries, as delivered
/// by the reporting source. The counters are trusted as-is for summary and
/// share views; they are not recomputed from `daily_logs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAnalytics {
    pub email: String,
    pub total_jobs: u64,
    pub total_submissions: u64,
    pub daily_logs: Vec<LogEntry>,
}

/// Standout entry of the current period, supplied by the reporting source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPerformer {
    pub email: String,
    #[serde(flatten)]
    pub entry: LogEntry,
}

/// The full data set one aggregation pass runs over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub analytics: Vec<UserAnalytics>,
    pub top_performer: Option<TopPerformer>,
}

/// A log entry tagged with its owner, produced by flattening a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatLog {
    pub email: String,
    pub entry: LogEntry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalsSummary {
    pub total_jobs: u64,
    pub total_submissions: u64,
    pub total_logs: usize,
    pub unique_recruiters: usize,
}

/// One owner's slice of the jobs-contribution pie.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareRecord {
    pub email: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: String,
    pub submissions: u64,
}

/// One day of the engagement grid. `weekday` is 0-6 with 0 = Sunday.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    pub date: String,
    pub count: usize,
    pub weekday: u8,
}

pub type HeatmapWeek = Vec<HeatmapCell>;

/// Fixed 6x7 grid of per-day log counts, oldest week first.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub weeks: Vec<HeatmapWeek>,
    pub max_count: usize,
}

/// One date bucket of a single owner's reflections view.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedReflection {
    pub date: String,
    pub entries: Vec<LogEntry>,
}

/// Totals computed from one owner's raw entries. Unlike [`TotalsSummary`],
/// these are recomputed from the entries themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerSummary {
    pub total_jobs: u64,
    pub total_submissions: u64,
    pub recruiter_count: usize,
}

/// One point of a single owner's charting series, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressPoint {
    pub date: String,
    pub jobs: u32,
    pub submissions: u32,
}
