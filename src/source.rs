use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::models::{LogEntry, Snapshot, TopPerformer, UserAnalytics};

/// One row of the reporting source's export, before validation. Counters
/// may arrive as numbers, numeric strings, or null; everything else about
/// the row is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub topic_learned: Option<String>,
    #[serde(default)]
    pub what_you_learned: Option<String>,
    #[serde(default, deserialize_with = "coerce_count32")]
    pub jobs_applied: u32,
    #[serde(default, deserialize_with = "coerce_count32")]
    pub submissions_done: u32,
    #[serde(default)]
    pub recruiter_name: Option<String>,
    #[serde(default)]
    pub attachment_url: Option<String>,
    #[serde(default)]
    pub attachment_filename: Option<String>,
}

impl RawEntry {
    pub fn into_log(self) -> LogEntry {
        LogEntry {
            date: self.date.unwrap_or_default(),
            day: self.day.unwrap_or_default(),
            topic_learned: self.topic_learned.unwrap_or_default(),
            what_you_learned: self.what_you_learned.unwrap_or_default(),
            jobs_applied: self.jobs_applied,
            submissions_done: self.submissions_done,
            recruiter_name: self.recruiter_name.unwrap_or_default(),
            attachment_url: self.attachment_url.filter(|url| !url.is_empty()),
            attachment_filename: self.attachment_filename.filter(|name| !name.is_empty()),
        }
    }

    fn into_top_performer(self) -> Option<TopPerformer> {
        let email = self.email.clone().filter(|email| !email.is_empty())?;
        Some(TopPerformer {
            email,
            entry: self.into_log(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotDoc {
    #[serde(default)]
    analytics: Vec<UserRecord>,
    #[serde(default)]
    top_performer: Option<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(default)]
    email: Option<String>,
    #[serde(default, deserialize_with = "coerce_count")]
    total_jobs: u64,
    #[serde(default, deserialize_with = "coerce_count")]
    total_submissions: u64,
    #[serde(default)]
    daily_logs: Vec<RawEntry>,
}

/// Parse and validate a reporting-source snapshot export.
///
/// A record without an owner email is malformed and rejected here, before
/// anything reaches the aggregation views. Malformed optional fields are
/// coerced instead.
pub fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let file = File::open(path)
        .with_context(|| format!("failed to open snapshot {}", path.display()))?;
    let doc: SnapshotDoc = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("malformed snapshot {}", path.display()))?;

    let mut analytics = Vec::with_capacity(doc.analytics.len());
    for (index, record) in doc.analytics.into_iter().enumerate() {
        let email = record
            .email
            .filter(|email| !email.is_empty())
            .with_context(|| format!("analytics record {index} is missing an email"))?;
        analytics.push(UserAnalytics {
            email,
            total_jobs: record.total_jobs,
            total_submissions: record.total_submissions,
            daily_logs: record.daily_logs.into_iter().map(RawEntry::into_log).collect(),
        });
    }

    Ok(Snapshot {
        analytics,
        top_performer: doc.top_performer.and_then(RawEntry::into_top_performer),
    })
}

/// Load raw log rows from a JSON array or a CSV file, by extension.
pub fn load_entries(path: &Path) -> anyhow::Result<Vec<RawEntry>> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to open log export {}", path.display()))?;
        let mut entries = Vec::new();
        for row in reader.deserialize::<RawEntry>() {
            entries.push(row.with_context(|| format!("malformed log export {}", path.display()))?);
        }
        return Ok(entries);
    }

    let file = File::open(path)
        .with_context(|| format!("failed to open log export {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("malformed log export {}", path.display()))
}

/// Aggregate raw log rows into the per-user snapshot the dashboard views
/// consume.
///
/// Rows without an owner email are skipped; a missing date key adopts the
/// injected `today`. Each owner's logs come out newest first and owners
/// are ordered by their most recent activity. The top performer is the
/// entry dated `today` with the strictly highest submission count, first
/// seen winning ties.
pub fn build_snapshot(entries: Vec<RawEntry>, today: NaiveDate) -> Snapshot {
    let today_key = today.format("%Y-%m-%d").to_string();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut records: Vec<(UserAnalytics, String)> = Vec::new();
    let mut top_performer: Option<TopPerformer> = None;

    for raw in entries {
        let Some(email) = raw.email.clone().filter(|email| !email.is_empty()) else {
            continue;
        };
        let mut entry = raw.into_log();
        if entry.date.is_empty() {
            entry.date = today_key.clone();
        }

        let slot = *index.entry(email.clone()).or_insert_with(|| {
            records.push((
                UserAnalytics {
                    email: email.clone(),
                    total_jobs: 0,
                    total_submissions: 0,
                    daily_logs: Vec::new(),
                },
                String::new(),
            ));
            records.len() - 1
        });
        let (record, last_update) = &mut records[slot];
        record.total_jobs += u64::from(entry.jobs_applied);
        record.total_submissions += u64::from(entry.submissions_done);
        if entry.date.as_str() >= last_update.as_str() {
            *last_update = entry.date.clone();
        }

        if entry.date == today_key {
            let leads = top_performer
                .as_ref()
                .is_none_or(|top| entry.submissions_done > top.entry.submissions_done);
            if leads {
                top_performer = Some(TopPerformer {
                    email: email.clone(),
                    entry: entry.clone(),
                });
            }
        }

        record.daily_logs.push(entry);
    }

    for (record, _) in &mut records {
        record.daily_logs.sort_by(|a, b| b.date.cmp(&a.date));
    }
    records.sort_by(|a, b| b.1.cmp(&a.1));

    Snapshot {
        analytics: records.into_iter().map(|(record, _)| record).collect(),
        top_performer,
    }
}

fn coerce_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(CountVisitor)
}

fn coerce_count32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    coerce_count(deserializer).map(|value| value.min(u64::from(u32::MAX)) as u32)
}

struct CountVisitor;

impl<'de> Visitor<'de> for CountVisitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a count as a number or numeric string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
        Ok(value.max(0) as u64)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<u64, E> {
        Ok(if value.is_finite() && value > 0.0 {
            value as u64
        } else {
            0
        })
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<u64, E> {
        Ok(u64::from(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
        let trimmed = value.trim();
        if let Ok(whole) = trimmed.parse::<u64>() {
            return Ok(whole);
        }
        Ok(trimmed
            .parse::<f64>()
            .map_or(0, |v| if v.is_finite() && v > 0.0 { v as u64 } else { 0 }))
    }

    fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<u64, E> {
        match std::str::from_utf8(value) {
            Ok(text) => self.visit_str(text),
            Err(_) => Ok(0),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<u64, E> {
        Ok(0)
    }

    fn visit_none<E: de::Error>(self) -> Result<u64, E> {
        Ok(0)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CountVisitor)
    }
}
