//! Local outlier detection on first differences.
//!
//! A point is anomalous when the step from its predecessor deviates
//! from the typical step by more than `threshold` standard
//! deviations. Differencing makes the detector sensitive to sudden
//! jumps while staying blind to slow trends.

use crate::core::RegularSeries;
use crate::utils::stats::{mean, population_std_dev};
use chrono::{DateTime, Utc};

/// Guard against flagging everything on a near-constant series.
const MIN_STD_DEV: f64 = 1e-10;

/// Configuration for the first-difference z-score detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffZscoreConfig {
    /// Flag points whose difference z-score exceeds this magnitude.
    pub threshold: f64,
}

impl Default for DiffZscoreConfig {
    fn default() -> Self {
        Self { threshold: 3.0 }
    }
}

/// A point flagged by the local detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalOutlier {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    /// Z-score of the first difference at this point.
    pub score: f64,
}

/// Result of a local detection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffZscoreResult {
    /// Flagged points, in time order.
    pub outliers: Vec<LocalOutlier>,
    /// Mean of the defined first differences.
    pub diff_mean: f64,
    /// Population standard deviation of the defined differences.
    pub diff_std_dev: f64,
    /// Number of defined differences.
    pub diffs_used: usize,
}

impl DiffZscoreResult {
    /// Number of flagged points.
    pub fn outlier_count(&self) -> usize {
        self.outliers.len()
    }
}

/// Detect local outliers on the first differences of a series.
///
/// Differences are defined only where both the point and its
/// predecessor are present; missing neighbours are skipped. A
/// zero-variance difference series flags nothing.
pub fn detect_local_outliers(
    series: &RegularSeries,
    config: &DiffZscoreConfig,
) -> DiffZscoreResult {
    let values = series.values();

    // (index, difference) pairs where both sides are present.
    let diffs: Vec<(usize, f64)> = (1..values.len())
        .filter_map(|i| match (values[i - 1], values[i]) {
            (Some(prev), Some(curr)) => Some((i, curr - prev)),
            _ => None,
        })
        .collect();

    let magnitudes: Vec<f64> = diffs.iter().map(|&(_, d)| d).collect();
    let diff_mean = if magnitudes.is_empty() { 0.0 } else { mean(&magnitudes) };
    let diff_std_dev = if magnitudes.is_empty() {
        0.0
    } else {
        population_std_dev(&magnitudes)
    };

    let mut outliers = Vec::new();
    if diff_std_dev > MIN_STD_DEV {
        for &(i, d) in &diffs {
            let score = (d - diff_mean).abs() / diff_std_dev;
            if score > config.threshold {
                if let Some(value) = values[i] {
                    outliers.push(LocalOutlier {
                        timestamp: series.timestamps()[i],
                        value,
                        score,
                    });
                }
            }
        }
    }

    DiffZscoreResult {
        outliers,
        diff_mean,
        diff_std_dev,
        diffs_used: diffs.len(),
    }
}
