//! Timestamp normalization for raw spreadsheet rows.
//!
//! Parses timestamps with a day-first convention, drops rows that
//! cannot be parsed, and merges duplicate timestamps by averaging
//! their values.

use crate::core::{NormalizedSeries, RawSample};
use crate::error::{PipelineError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

/// Formats tried in order. Day-first variants come before ISO so that
/// an ambiguous `03/04/2024` reads as 3 April.
const DATETIME_FORMATS: [&str; 7] = [
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only formats; these parse to midnight.
const DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// Counters accumulated while normalizing one batch of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Raw rows received.
    pub rows_seen: usize,
    /// Rows dropped for a null/unparsable timestamp or null value.
    pub rows_dropped: usize,
    /// Extra rows folded into an earlier row with the same timestamp.
    pub duplicates_merged: usize,
}

/// Parse a raw timestamp string, day-first.
///
/// Returns `None` when no known format matches.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

/// Normalize raw rows into a strictly increasing series.
///
/// Rows with an unparsable timestamp or a missing/non-finite value
/// are dropped and counted, never fatal. Duplicate timestamps are
/// merged by arithmetic mean. Fails with
/// [`PipelineError::EmptyInput`] only when zero rows survive.
pub fn normalize(rows: &[RawSample]) -> Result<(NormalizedSeries, IngestReport)> {
    let mut report = IngestReport {
        rows_seen: rows.len(),
        ..Default::default()
    };

    // BTreeMap keeps the groups sorted by timestamp.
    let mut groups: BTreeMap<DateTime<Utc>, (f64, usize)> = BTreeMap::new();

    for (index, row) in rows.iter().enumerate() {
        let timestamp = row.timestamp.as_deref().and_then(parse_timestamp);
        let value = row.value.filter(|v| v.is_finite());
        match (timestamp, value) {
            (Some(ts), Some(v)) => {
                let entry = groups.entry(ts).or_insert((0.0, 0));
                if entry.1 > 0 {
                    report.duplicates_merged += 1;
                }
                entry.0 += v;
                entry.1 += 1;
            }
            _ => {
                report.rows_dropped += 1;
                debug!(index, timestamp = ?row.timestamp, "dropping unparsable row");
            }
        }
    }

    if groups.is_empty() {
        return Err(PipelineError::EmptyInput {
            rows_seen: rows.len(),
        });
    }

    let (timestamps, values) = groups
        .into_iter()
        .map(|(ts, (sum, count))| (ts, sum / count as f64))
        .unzip();

    Ok((NormalizedSeries::new(timestamps, values)?, report))
}
