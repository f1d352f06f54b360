//! Outlier detection over the gap-filled series.
//!
//! Two independent passes:
//! - a local detector on first differences (sudden jumps),
//! - a block detector on daily means (anomalous days).

mod daily_iqr;
mod diff_zscore;

pub use daily_iqr::{detect_daily_outliers, DailyIqrConfig, DailyIqrResult, DailyOutlier};
pub use diff_zscore::{detect_local_outliers, DiffZscoreConfig, DiffZscoreResult, LocalOutlier};
