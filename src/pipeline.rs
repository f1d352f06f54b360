//! End-to-end pipeline composition.
//!
//! Runs the stages in order: normalize raw rows, reindex onto the
//! fixed grid, fill short gaps, then derive outlier sets and load
//! profiles from the immutable filled series.

use crate::core::{RawSample, RegularSeries};
use crate::detection::{
    detect_daily_outliers, detect_local_outliers, DailyIqrConfig, DailyIqrResult,
    DiffZscoreConfig, DiffZscoreResult,
};
use crate::error::Result;
use crate::ingest::normalize;
use crate::profile::{
    daily_means, hourly_means, monthly_means, time_of_day_profile, weekday_profile,
};
use crate::regularize::{fill_gaps, to_grid};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

/// Tunable knobs for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Grid cadence.
    pub step: Duration,
    /// Longest gap, in grid steps, that interpolation may bridge.
    pub max_gap: usize,
    /// Magnitude threshold for the local difference detector.
    pub zscore_threshold: f64,
    /// Fence multiplier for the daily IQR detector.
    pub iqr_multiplier: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            step: Duration::minutes(15),
            max_gap: 3,
            zscore_threshold: 3.0,
            iqr_multiplier: 1.5,
        }
    }
}

/// Counters summarizing one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Grid points in the regularized series.
    pub total_points: usize,
    /// Raw rows dropped during normalization.
    pub rows_dropped: usize,
    /// Duplicate rows folded during normalization.
    pub duplicates_merged: usize,
    /// Missing grid points before gap filling.
    pub missing_before: usize,
    /// Missing grid points after gap filling.
    pub missing_after: usize,
    /// Points flagged by the local detector.
    pub outliers_local: usize,
    /// Days flagged by the block detector.
    pub outliers_block: usize,
}

/// Everything a run produces for downstream consumers.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The gap-filled regular series.
    pub filled: RegularSeries,
    /// Local (first-difference z-score) outliers.
    pub local_outliers: DiffZscoreResult,
    /// Block (daily IQR) outliers.
    pub block_outliers: DailyIqrResult,
    /// Mean per calendar hour.
    pub hourly_means: Vec<(NaiveDateTime, f64)>,
    /// Mean per calendar day.
    pub daily_means: Vec<(NaiveDate, f64)>,
    /// Mean per (year, month).
    pub monthly_means: Vec<((i32, u32), f64)>,
    /// Mean per weekday, 0 = Monday.
    pub weekday_profile: Vec<(u32, f64)>,
    /// Mean per clock time across all days.
    pub time_of_day_profile: Vec<(NaiveTime, f64)>,
    /// Run counters.
    pub summary: PipelineSummary,
}

/// Run the full pipeline over a batch of raw rows.
///
/// Fails only when no parseable rows remain; all other per-row and
/// per-gap problems are recovered locally and show up in the summary
/// counters.
pub fn run(rows: &[RawSample], config: &PipelineConfig) -> Result<PipelineOutput> {
    let (normalized, ingest_report) = normalize(rows)?;
    debug!(
        points = normalized.len(),
        dropped = ingest_report.rows_dropped,
        merged = ingest_report.duplicates_merged,
        "normalized raw rows"
    );

    let regular = to_grid(&normalized, config.step)?;
    let (filled, gap_report) = fill_gaps(&regular, config.max_gap)?;
    debug!(
        total = filled.len(),
        missing_before = gap_report.missing_before,
        missing_after = gap_report.missing_after,
        "regularized and gap-filled"
    );

    let local_outliers = detect_local_outliers(
        &filled,
        &DiffZscoreConfig {
            threshold: config.zscore_threshold,
        },
    );
    let block_outliers = detect_daily_outliers(
        &filled,
        &DailyIqrConfig {
            multiplier: config.iqr_multiplier,
        },
    );

    let summary = PipelineSummary {
        total_points: filled.len(),
        rows_dropped: ingest_report.rows_dropped,
        duplicates_merged: ingest_report.duplicates_merged,
        missing_before: gap_report.missing_before,
        missing_after: gap_report.missing_after,
        outliers_local: local_outliers.outlier_count(),
        outliers_block: block_outliers.outlier_count(),
    };

    Ok(PipelineOutput {
        hourly_means: hourly_means(&filled),
        daily_means: daily_means(&filled),
        monthly_means: monthly_means(&filled),
        weekday_profile: weekday_profile(&filled),
        time_of_day_profile: time_of_day_profile(&filled),
        local_outliers,
        block_outliers,
        filled,
        summary,
    })
}
