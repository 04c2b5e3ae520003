//! Time-bucket aggregation
//!
//! Month series always have 12 buckets and quarter series 4, zero-filled,
//! for the target year. Year series have one bucket per distinct year in the
//! input. Buckets are emitted in calendar order whatever the input order,
//! each with a per-status split and the running cumulative count.
//!
//! Issues with an invalid `created_at` are left out of every bucket but are
//! still counted in `total` (and reported in `unbucketable`), so the bucket
//! sum can be lower than the list length.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use ticketboard_domain::constants::{MONTH_LABELS, QUARTER_LABELS};
use ticketboard_domain::{
    Granularity, Issue, StatusBreakdown, TimeBucket, TimeBucketStats,
};

/// Buckets issues by their creation date in a fixed timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBucketAggregator {
    tz: Tz,
}

impl Default for TimeBucketAggregator {
    fn default() -> Self {
        Self { tz: Tz::UTC }
    }
}

impl TimeBucketAggregator {
    /// Aggregator bucketing in UTC
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator bucketing in `tz` (e.g. `Asia/Taipei`)
    pub fn with_timezone(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Local calendar date of an issue, `None` when its date is invalid.
    pub fn local_date(&self, issue: &Issue) -> Option<NaiveDate> {
        issue.created_at.as_datetime().map(|dt| dt.with_timezone(&self.tz).date_naive())
    }

    /// Bucket `issues` at `granularity`.
    ///
    /// `target_year` selects the year for month and quarter series and is
    /// ignored for year series.
    pub fn aggregate(
        &self,
        issues: &[Issue],
        granularity: Granularity,
        target_year: i32,
    ) -> TimeBucketStats {
        let unbucketable = issues.iter().filter(|i| !i.created_at.is_valid()).count();
        let dated = issues.iter().filter_map(|issue| self.local_date(issue).map(|d| (d, issue)));

        let mut buckets = match granularity {
            Granularity::Month => {
                let mut buckets = fixed_buckets(&MONTH_LABELS, target_year);
                for (date, issue) in dated.filter(|(d, _)| d.year() == target_year) {
                    tally(&mut buckets[date.month0() as usize], issue);
                }
                buckets
            }
            Granularity::Quarter => {
                let mut buckets = fixed_buckets(&QUARTER_LABELS, target_year);
                for (date, issue) in dated.filter(|(d, _)| d.year() == target_year) {
                    tally(&mut buckets[(date.month0() / 3) as usize], issue);
                }
                buckets
            }
            Granularity::Year => {
                let mut years: BTreeMap<i32, TimeBucket> = BTreeMap::new();
                for (date, issue) in dated {
                    let bucket = years
                        .entry(date.year())
                        .or_insert_with(|| empty_bucket(date.year().to_string(), date.year(), 0));
                    tally(bucket, issue);
                }
                years.into_values().collect()
            }
        };

        let mut running = 0;
        for bucket in &mut buckets {
            running += bucket.count;
            bucket.cumulative = running;
        }

        TimeBucketStats {
            granularity,
            year: (granularity != Granularity::Year).then_some(target_year),
            buckets,
            total: issues.len() as u64,
            unbucketable: unbucketable as u64,
        }
    }

    /// Distinct years present in the data, newest first.
    pub fn years(&self, issues: &[Issue]) -> Vec<i32> {
        let mut years: Vec<i32> = issues.iter().filter_map(|i| self.local_date(i)).map(|d| d.year()).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }
}

/// Bucket `issues` in UTC. See [`TimeBucketAggregator::aggregate`].
pub fn aggregate_by_time(
    issues: &[Issue],
    granularity: Granularity,
    target_year: i32,
) -> TimeBucketStats {
    TimeBucketAggregator::default().aggregate(issues, granularity, target_year)
}

fn fixed_buckets(labels: &[&str], year: i32) -> Vec<TimeBucket> {
    (1..)
        .zip(labels)
        .map(|(period, label)| empty_bucket((*label).to_string(), year, period))
        .collect()
}

fn empty_bucket(label: String, year: i32, period: u32) -> TimeBucket {
    TimeBucket {
        label,
        year,
        period,
        count: 0,
        cumulative: 0,
        by_status: StatusBreakdown::default(),
    }
}

fn tally(bucket: &mut TimeBucket, issue: &Issue) {
    bucket.count += 1;
    bucket.by_status.record(issue.status);
}
