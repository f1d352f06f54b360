//! Series data structures for the regularization pipeline.

use crate::error::{PipelineError, Result};
use chrono::{DateTime, Duration, Utc};

/// A raw reading as delivered by the spreadsheet collaborator.
///
/// Column selection happens upstream; the core only sees an
/// already-chosen timestamp column and value column, either of which
/// may be null in any given row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSample {
    /// Timestamp cell, unparsed.
    pub timestamp: Option<String>,
    /// Value cell.
    pub value: Option<f64>,
}

impl RawSample {
    /// Create a sample with both cells present.
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            value: Some(value),
        }
    }
}

/// An irregular series with strictly increasing, duplicate-free
/// timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl NormalizedSeries {
    /// Create a normalized series, validating that timestamps are
    /// strictly increasing and aligned with the values.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(PipelineError::LengthMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(PipelineError::UnorderedTimestamps { index: i });
            }
        }
        Ok(Self { timestamps, values })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First timestamp, if any.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.timestamps.first().copied()
    }

    /// Last timestamp, if any.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.timestamps.last().copied()
    }
}

/// A fixed-cadence series; `None` marks a missing grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<Option<f64>>,
    step: Duration,
}

impl RegularSeries {
    /// Create a regular series, validating constant spacing.
    pub fn new(
        timestamps: Vec<DateTime<Utc>>,
        values: Vec<Option<f64>>,
        step: Duration,
    ) -> Result<Self> {
        if step <= Duration::zero() {
            return Err(PipelineError::InvalidParameter(
                "step must be positive".to_string(),
            ));
        }
        if timestamps.len() != values.len() {
            return Err(PipelineError::LengthMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        for i in 1..timestamps.len() {
            if timestamps[i] - timestamps[i - 1] != step {
                return Err(PipelineError::IrregularSpacing { index: i });
            }
        }
        Ok(Self {
            timestamps,
            values,
            step,
        })
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get the grid timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get the values; `None` entries are missing points.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Grid spacing.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Count of missing points.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Iterate over (timestamp, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, Option<f64>)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Find all maximal runs of missing points.
    pub fn gap_runs(&self) -> Vec<GapRun> {
        let mut runs = Vec::new();
        let mut current: Option<usize> = None;
        for (i, value) in self.values.iter().enumerate() {
            match (value, current) {
                (None, None) => current = Some(i),
                (Some(_), Some(start)) => {
                    runs.push(GapRun {
                        start,
                        len: i - start,
                    });
                    current = None;
                }
                _ => {}
            }
        }
        if let Some(start) = current {
            runs.push(GapRun {
                start,
                len: self.values.len() - start,
            });
        }
        runs
    }
}

/// A maximal contiguous run of missing grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapRun {
    /// Index of the first missing point.
    pub start: usize,
    /// Number of missing points in the run.
    pub len: usize,
}

impl GapRun {
    /// Index one past the last missing point.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minute as i64)
    }

    #[test]
    fn normalized_series_rejects_unordered_timestamps() {
        let result = NormalizedSeries::new(vec![ts(15), ts(0)], vec![1.0, 2.0]);
        assert_eq!(
            result.unwrap_err(),
            PipelineError::UnorderedTimestamps { index: 1 }
        );
    }

    #[test]
    fn normalized_series_rejects_duplicate_timestamps() {
        let result = NormalizedSeries::new(vec![ts(0), ts(0)], vec![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(PipelineError::UnorderedTimestamps { index: 1 })
        ));
    }

    #[test]
    fn normalized_series_rejects_length_mismatch() {
        let result = NormalizedSeries::new(vec![ts(0)], vec![1.0, 2.0]);
        assert_eq!(
            result.unwrap_err(),
            PipelineError::LengthMismatch {
                expected: 1,
                got: 2
            }
        );
    }

    #[test]
    fn regular_series_rejects_irregular_spacing() {
        let timestamps = vec![ts(0), ts(15), ts(45)];
        let result = RegularSeries::new(
            timestamps,
            vec![Some(1.0), Some(2.0), Some(3.0)],
            Duration::minutes(15),
        );
        assert_eq!(
            result.unwrap_err(),
            PipelineError::IrregularSpacing { index: 2 }
        );
    }

    #[test]
    fn regular_series_rejects_non_positive_step() {
        let result = RegularSeries::new(vec![], vec![], Duration::zero());
        assert!(matches!(result, Err(PipelineError::InvalidParameter(_))));
    }

    #[test]
    fn gap_runs_finds_maximal_runs() {
        let timestamps: Vec<_> = (0..6).map(|i| ts(i * 15)).collect();
        let values = vec![Some(1.0), None, None, Some(2.0), None, None];
        let series = RegularSeries::new(timestamps, values, Duration::minutes(15)).unwrap();

        let runs = series.gap_runs();
        assert_eq!(runs, vec![GapRun { start: 1, len: 2 }, GapRun { start: 4, len: 2 }]);
        assert_eq!(runs[0].end(), 3);
    }

    #[test]
    fn gap_runs_empty_when_fully_observed() {
        let timestamps: Vec<_> = (0..3).map(|i| ts(i * 15)).collect();
        let values = vec![Some(1.0), Some(2.0), Some(3.0)];
        let series = RegularSeries::new(timestamps, values, Duration::minutes(15)).unwrap();
        assert!(series.gap_runs().is_empty());
        assert_eq!(series.missing_count(), 0);
    }
}
