//! Fixed-cadence grid construction and reindexing.

use crate::core::{NormalizedSeries, RegularSeries};
use crate::error::{PipelineError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Reindex a normalized series onto a fixed-cadence grid.
///
/// The grid runs from the first timestamp in steps of `step`,
/// flooring to the last grid point that is `<= ` the final timestamp.
/// A grid point takes a value only when a sample exists at exactly
/// that timestamp; there is no snapping, so off-grid samples widen
/// the span but do not contribute a value.
pub fn to_grid(series: &NormalizedSeries, step: Duration) -> Result<RegularSeries> {
    if step <= Duration::zero() {
        return Err(PipelineError::InvalidParameter(
            "step must be positive".to_string(),
        ));
    }
    let (start, end) = match (series.start(), series.end()) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(PipelineError::EmptyInput { rows_seen: 0 }),
    };

    let lookup: HashMap<DateTime<Utc>, f64> = series
        .timestamps()
        .iter()
        .copied()
        .zip(series.values().iter().copied())
        .collect();

    let mut timestamps = Vec::new();
    let mut values = Vec::new();
    let mut t = start;
    while t <= end {
        timestamps.push(t);
        values.push(lookup.get(&t).copied());
        t += step;
    }

    RegularSeries::new(timestamps, values, step)
}
