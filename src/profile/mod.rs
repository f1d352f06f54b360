//! Aggregates and periodic load profiles over a regular series.
//!
//! All aggregations ignore missing points; a bucket whose points are
//! all missing is omitted from the output. Outputs are sorted by
//! bucket key.

use crate::core::RegularSeries;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use std::collections::BTreeMap;

/// Mean of present values grouped by an arbitrary bucket key.
fn grouped_mean<K, F>(series: &RegularSeries, key: F) -> Vec<(K, f64)>
where
    K: Ord,
    F: Fn(DateTime<Utc>) -> K,
{
    let mut buckets: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for (ts, value) in series.iter() {
        if let Some(v) = value {
            let entry = buckets.entry(key(ts)).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }
    buckets
        .into_iter()
        .map(|(k, (sum, count))| (k, sum / count as f64))
        .collect()
}

/// Mean per calendar hour.
pub fn hourly_means(series: &RegularSeries) -> Vec<(NaiveDateTime, f64)> {
    grouped_mean(series, |ts| {
        ts.date_naive()
            .and_hms_opt(ts.hour(), 0, 0)
            .expect("hour taken from a valid timestamp")
    })
}

/// Mean per calendar day.
pub fn daily_means(series: &RegularSeries) -> Vec<(NaiveDate, f64)> {
    grouped_mean(series, |ts| ts.date_naive())
}

/// Mean per (year, month).
pub fn monthly_means(series: &RegularSeries) -> Vec<((i32, u32), f64)> {
    grouped_mean(series, |ts| (ts.year(), ts.month()))
}

/// Mean per weekday index, 0 = Monday.
pub fn weekday_profile(series: &RegularSeries) -> Vec<(u32, f64)> {
    grouped_mean(series, |ts| ts.weekday().num_days_from_monday())
}

/// Mean per clock time across all days, independent of calendar date.
pub fn time_of_day_profile(series: &RegularSeries) -> Vec<(NaiveTime, f64)> {
    grouped_mean(series, |ts| ts.time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    /// Two full days at an hourly step, values 0..47.
    fn two_days() -> RegularSeries {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<_> = (0..48).map(|i| base + Duration::hours(i)).collect();
        let values: Vec<_> = (0..48).map(|i| Some(i as f64)).collect();
        RegularSeries::new(timestamps, values, Duration::hours(1)).unwrap()
    }

    #[test]
    fn daily_means_are_grouped_averages() {
        let means = daily_means(&two_days());

        assert_eq!(means.len(), 2);
        assert_eq!(means[0].0, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        // Mean of 0..=23 is 11.5; of 24..=47 is 35.5.
        assert_relative_eq!(means[0].1, 11.5, epsilon = 1e-10);
        assert_relative_eq!(means[1].1, 35.5, epsilon = 1e-10);
    }

    #[test]
    fn daily_means_ignore_missing_points() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<_> = (0..4).map(|i| base + Duration::hours(i)).collect();
        let values = vec![Some(2.0), None, Some(4.0), None];
        let series = RegularSeries::new(timestamps, values, Duration::hours(1)).unwrap();

        let means = daily_means(&series);
        assert_eq!(means.len(), 1);
        assert_relative_eq!(means[0].1, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn fully_missing_bucket_is_omitted() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap();
        // One point on Jan 1, two missing points on Jan 2.
        let timestamps: Vec<_> = (0..3).map(|i| base + Duration::hours(i)).collect();
        let values = vec![Some(1.0), None, None];
        let series = RegularSeries::new(timestamps, values, Duration::hours(1)).unwrap();

        let means = daily_means(&series);
        assert_eq!(means.len(), 1);
        assert_eq!(means[0].0, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn hourly_means_bucket_by_clock_hour() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<_> = (0..4).map(|i| base + Duration::minutes(15 * i)).collect();
        let values = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let series = RegularSeries::new(timestamps, values, Duration::minutes(15)).unwrap();

        let means = hourly_means(&series);
        assert_eq!(means.len(), 1);
        assert_relative_eq!(means[0].1, 2.5, epsilon = 1e-10);
    }

    #[test]
    fn monthly_means_key_by_year_and_month() {
        let timestamps = vec![
            Utc.with_ymd_and_hms(2024, 1, 31, 23, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        ];
        let values = vec![Some(10.0), Some(20.0)];
        let series = RegularSeries::new(timestamps, values, Duration::hours(1)).unwrap();

        let means = monthly_means(&series);
        assert_eq!(means, vec![((2024, 1), 10.0), ((2024, 2), 20.0)]);
    }

    #[test]
    fn weekday_profile_starts_monday() {
        // 2024-01-01 is a Monday.
        let profile = weekday_profile(&two_days());

        assert_eq!(profile.len(), 2);
        assert_eq!(profile[0].0, 0);
        assert_relative_eq!(profile[0].1, 11.5, epsilon = 1e-10);
        assert_eq!(profile[1].0, 1);
        assert_relative_eq!(profile[1].1, 35.5, epsilon = 1e-10);
    }

    #[test]
    fn time_of_day_profile_averages_across_days() {
        let profile = time_of_day_profile(&two_days());

        assert_eq!(profile.len(), 24);
        // Midnight slot averages values 0 and 24.
        assert_eq!(profile[0].0, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_relative_eq!(profile[0].1, 12.0, epsilon = 1e-10);
        // 23:00 slot averages 23 and 47.
        assert_relative_eq!(profile[23].1, 35.0, epsilon = 1e-10);
    }
}
