//! Block outlier detection on daily aggregates.
//!
//! Aggregates the series to one mean per calendar day and flags days
//! whose mean falls outside the Tukey fences
//! `[Q1 - k*IQR, Q3 + k*IQR]`.

use crate::core::RegularSeries;
use crate::profile::daily_means;
use crate::utils::stats::quantile;
use chrono::NaiveDate;

/// Configuration for the daily IQR detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyIqrConfig {
    /// Fence multiplier applied to the interquartile range.
    pub multiplier: f64,
}

impl Default for DailyIqrConfig {
    fn default() -> Self {
        Self { multiplier: 1.5 }
    }
}

/// A day flagged by the block detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyOutlier {
    pub date: NaiveDate,
    /// Mean consumption over the day's present points.
    pub mean: f64,
}

/// Result of a block detection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyIqrResult {
    /// Flagged days, in date order.
    pub outliers: Vec<DailyOutlier>,
    /// Lower fence.
    pub lower_bound: f64,
    /// Upper fence.
    pub upper_bound: f64,
    /// Days with at least one present point.
    pub days_used: usize,
}

impl DailyIqrResult {
    /// Number of flagged days.
    pub fn outlier_count(&self) -> usize {
        self.outliers.len()
    }
}

/// Detect anomalous days by the IQR rule over daily means.
///
/// Days without a single present point have no aggregate and are
/// excluded from the quartile computation, never treated as zero.
pub fn detect_daily_outliers(series: &RegularSeries, config: &DailyIqrConfig) -> DailyIqrResult {
    let means = daily_means(series);
    if means.is_empty() {
        return DailyIqrResult {
            outliers: Vec::new(),
            lower_bound: f64::NAN,
            upper_bound: f64::NAN,
            days_used: 0,
        };
    }

    let aggregates: Vec<f64> = means.iter().map(|&(_, m)| m).collect();
    let q1 = quantile(&aggregates, 0.25);
    let q3 = quantile(&aggregates, 0.75);
    let iqr = q3 - q1;
    let lower_bound = q1 - config.multiplier * iqr;
    let upper_bound = q3 + config.multiplier * iqr;

    let outliers = means
        .into_iter()
        .filter(|&(_, m)| m < lower_bound || m > upper_bound)
        .map(|(date, mean)| DailyOutlier { date, mean })
        .collect();

    DailyIqrResult {
        outliers,
        lower_bound,
        upper_bound,
        days_used: aggregates.len(),
    }
}
