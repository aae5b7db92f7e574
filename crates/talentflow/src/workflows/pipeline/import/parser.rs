use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::normalizer::{normalize_name, slug};

#[derive(Debug)]
pub(crate) struct TrackerRecord {
    pub(crate) candidate_key: String,
    pub(crate) normalized_stage: Option<String>,
    pub(crate) applied_on: Option<NaiveDate>,
    pub(crate) disqualified: bool,
    pub(crate) reason: Option<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<TrackerRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<TrackerRow>() {
        let row = record?;
        records.push(row.into_record());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct TrackerRow {
    #[serde(rename = "Candidate")]
    candidate: String,
    #[serde(
        rename = "Candidate ID",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    candidate_id: Option<String>,
    #[serde(rename = "Stage", default, deserialize_with = "empty_string_as_none")]
    stage: Option<String>,
    #[serde(
        rename = "Applied At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    applied_at: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(rename = "Reason", default, deserialize_with = "empty_string_as_none")]
    reason: Option<String>,
}

impl TrackerRow {
    fn into_record(self) -> TrackerRecord {
        let candidate_key = self
            .candidate_id
            .clone()
            .unwrap_or_else(|| slug(&self.candidate));
        let normalized_stage = self.stage.as_deref().map(normalize_name);
        let applied_on = self
            .applied_at
            .as_deref()
            .and_then(parse_datetime)
            .map(|dt| dt.date());
        let disqualified = self
            .status
            .as_deref()
            .map(|status| normalize_name(status) == "disqualified")
            .unwrap_or(false)
            || self.reason.is_some();

        TrackerRecord {
            candidate_key,
            normalized_stage,
            applied_on,
            disqualified,
            reason: self.reason,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}
