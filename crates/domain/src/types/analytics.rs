//! Derived view models for the reporting pages
//!
//! Produced by `ticketboard-core::analytics`, never persisted.

use serde::{Deserialize, Serialize};

use super::issue::IssueStatus;
use super::summary::{LabeledCount, LabeledCounts};
use crate::impl_domain_status_conversions;

/* -------------------------------------------------------------------------- */
/* Time buckets */
/* -------------------------------------------------------------------------- */

/// Calendar granularity of a time-bucket series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Month,
    Quarter,
    Year,
}

impl_domain_status_conversions!(Granularity {
    Month => "month" | "monthly",
    Quarter => "quarter" | "quarterly",
    Year => "year" | "yearly" | "annual",
});

/// Per-status split of a bucket. `missing` counts issues without a status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub pending: u64,
    pub in_progress: u64,
    pub closed: u64,
    pub missing: u64,
}

impl StatusBreakdown {
    pub fn record(&mut self, status: Option<IssueStatus>) {
        match status {
            Some(IssueStatus::Pending) => self.pending += 1,
            Some(IssueStatus::InProgress) => self.in_progress += 1,
            Some(IssueStatus::Closed) => self.closed += 1,
            None => self.missing += 1,
        }
    }

    pub fn get(&self, status: IssueStatus) -> u64 {
        match status {
            IssueStatus::Pending => self.pending,
            IssueStatus::InProgress => self.in_progress,
            IssueStatus::Closed => self.closed,
        }
    }

    /// Pending + In Progress
    pub fn open(&self) -> u64 {
        self.pending + self.in_progress
    }

    pub fn total(&self) -> u64 {
        self.pending + self.in_progress + self.closed + self.missing
    }
}

/// One calendar bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// Chart label: `Jan`..`Dec`, `Q1`..`Q4`, or the year
    pub label: String,
    pub year: i32,
    /// Month (1-12) or quarter (1-4); 0 for yearly buckets
    pub period: u32,
    pub count: u64,
    /// Running sum of `count` up to and including this bucket
    pub cumulative: u64,
    pub by_status: StatusBreakdown,
}

/// Time-bucketed counts, always in calendar order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucketStats {
    pub granularity: Granularity,
    /// Target year for month and quarter series; `None` for yearly series
    pub year: Option<i32>,
    pub buckets: Vec<TimeBucket>,
    /// Every input issue, bucketable or not
    pub total: u64,
    /// Issues whose `created_at` could not be parsed
    pub unbucketable: u64,
}

impl TimeBucketStats {
    pub fn labels(&self) -> Vec<String> {
        self.buckets.iter().map(|b| b.label.clone()).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.buckets.iter().map(|b| b.count).collect()
    }

    pub fn cumulative(&self) -> Vec<u64> {
        self.buckets.iter().map(|b| b.cumulative).collect()
    }

    /// Sum of all bucket counts
    pub fn bucketed(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn bucket(&self, label: &str) -> Option<&TimeBucket> {
        self.buckets.iter().find(|b| b.label == label)
    }
}

/* -------------------------------------------------------------------------- */
/* Categories */
/* -------------------------------------------------------------------------- */

/// Categorical field an issue list can be grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryField {
    Source,
    IssueType,
    Status,
}

impl_domain_status_conversions!(CategoryField {
    Source => "source",
    IssueType => "issue_type" | "type" | "issue-type",
    Status => "status",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub label: String,
    pub count: u64,
    /// Percentage of the total, one decimal
    pub share: f64,
}

/// Label → count distribution in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total: u64,
    pub entries: Vec<CategoryEntry>,
}

impl CategoryStats {
    pub fn get(&self, label: &str) -> Option<&CategoryEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn count(&self, label: &str) -> u64 {
        self.get(label).map_or(0, |e| e.count)
    }

    pub fn share(&self, label: &str) -> f64 {
        self.get(label).map_or(0.0, |e| e.share)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn to_counts(&self) -> LabeledCounts {
        self.entries.iter().map(|e| (e.label.clone(), e.count)).collect()
    }
}

/* -------------------------------------------------------------------------- */
/* Growth */
/* -------------------------------------------------------------------------- */

/// Display hint only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthDirection {
    Up,
    Down,
    Flat,
}

impl_domain_status_conversions!(GrowthDirection {
    Up => "up",
    Down => "down",
    Flat => "flat",
});

impl GrowthDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Flat => "→",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthResult {
    /// Percentage change, one decimal; 0 when the previous value is 0
    pub rate_percent: f64,
    pub direction: GrowthDirection,
}

/// Growth of one category between two periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGrowth {
    pub label: String,
    pub current: u64,
    pub previous: u64,
    pub growth: GrowthResult,
}

impl CategoryGrowth {
    pub fn delta(&self) -> i64 {
        i64::try_from(self.current).unwrap_or(i64::MAX)
            - i64::try_from(self.previous).unwrap_or(i64::MAX)
    }
}

/// Per-category growth with the top mover flagged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryComparison {
    pub entries: Vec<CategoryGrowth>,
    /// Label of the category with the largest absolute growth rate
    pub top_mover: Option<String>,
}

impl CategoryComparison {
    pub fn top_mover(&self) -> Option<&CategoryGrowth> {
        let label = self.top_mover.as_deref()?;
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn get(&self, label: &str) -> Option<&CategoryGrowth> {
        self.entries.iter().find(|e| e.label == label)
    }
}

/// Bucket-by-bucket comparison of two equally shaped series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesComparison {
    pub labels: Vec<String>,
    pub current: Vec<u64>,
    pub previous: Vec<u64>,
    pub growth: Vec<GrowthResult>,
    /// Growth of the series totals
    pub total: GrowthResult,
}

/* -------------------------------------------------------------------------- */
/* Page-level summaries */
/* -------------------------------------------------------------------------- */

/// Stat cards of the analytics page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    pub year: i32,
    pub year_total: u64,
    /// Latest month of `year` with any issue
    pub latest_month: Option<u32>,
    pub latest_month_total: u64,
    pub closed: u64,
    /// Pending + In Progress
    pub open: u64,
    /// Years present in the data, newest first
    pub years: Vec<i32>,
}

/// Headline figures of the monthly dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyInsights {
    /// `completed / (completed + uncompleted)` as a whole percentage
    pub completion_rate: u32,
    pub top_source: Option<LabeledCount>,
    pub top_issue_type: Option<LabeledCount>,
}
