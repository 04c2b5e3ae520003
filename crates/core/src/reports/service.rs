//! Report service - monthly, annual, trend and analytics pages
//!
//! Monthly, annual and trend pages read backend summaries. The analytics
//! page recomputes everything from the raw issue list.

use std::sync::Arc;

use chrono::Datelike;
use chrono_tz::Tz;
use serde::Serialize;
use ticketboard_domain::{
    AnalyticsOverview, AnnualSummary, AnnualTrend, CategoryComparison, CategoryField,
    CategoryGrowth, CategoryStats, Granularity, GrowthResult, Issue, MonthlyInsights,
    MonthlySummary, Result, SeriesComparison, TicketboardError, TimeBucketStats, TrendKind,
};
use tracing::{debug, info, warn};

use super::ports::SummaryApi;
use crate::analytics::categories::aggregate_by_field;
use crate::analytics::insights::{analytics_overview, default_year, monthly_insights};
use crate::analytics::normalizer::normalize_all;
use crate::analytics::time_buckets::TimeBucketAggregator;
use crate::analytics::trends::{compare_categories, compare_counts, compare_monthly, year_over_year};
use crate::issues::ports::IssueApi;

/// Monthly dashboard: backend summary plus derived headline figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyDashboard {
    pub year: i32,
    pub month: u32,
    pub summary: MonthlySummary,
    pub insights: MonthlyInsights,
}

/// Comparison year of the annual report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualComparison {
    pub year: i32,
    pub summary: AnnualSummary,
    /// Month by month, report year against comparison year
    pub monthly: SeriesComparison,
    pub total: GrowthResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualReport {
    pub year: i32,
    pub summary: AnnualSummary,
    pub comparison: Option<AnnualComparison>,
    /// Why the comparison year could not be loaded; the report year is kept
    pub comparison_error: Option<TicketboardError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub year: i32,
    pub kind: TrendKind,
    pub trend: AnnualTrend,
    pub total: u64,
    pub resolution_rate: f64,
}

/// Everything the analytics page charts for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub overview: AnalyticsOverview,
    pub monthly: TimeBucketStats,
    pub quarterly: TimeBucketStats,
    pub yearly: TimeBucketStats,
    pub year_over_year: Vec<CategoryGrowth>,
    pub by_type: CategoryStats,
    pub by_source: CategoryStats,
    pub by_status: CategoryStats,
    /// Issue types of the report year against the year before
    pub type_growth: CategoryComparison,
    pub source_growth: CategoryComparison,
}

/// Report service
pub struct ReportService {
    summaries: Arc<dyn SummaryApi>,
    issues: Arc<dyn IssueApi>,
    aggregator: TimeBucketAggregator,
}

impl ReportService {
    /// Create a new report service bucketing in UTC
    pub fn new(summaries: Arc<dyn SummaryApi>, issues: Arc<dyn IssueApi>) -> Self {
        Self { summaries, issues, aggregator: TimeBucketAggregator::default() }
    }

    /// Bucket analytics in `tz`
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.aggregator = TimeBucketAggregator::with_timezone(tz);
        self
    }

    pub async fn monthly_dashboard(&self, year: i32, month: u32) -> Result<MonthlyDashboard> {
        validate_month(month)?;
        let summary = self.summaries.monthly(year, month).await?;
        let insights = monthly_insights(&summary);
        info!(year, month, issues = summary.issue_count, "Monthly summary loaded");
        Ok(MonthlyDashboard { year, month, summary, insights })
    }

    /// Stored monthly summary, `None` when the month was never summarised
    pub async fn stored_monthly(&self, year: i32, month: u32) -> Result<Option<MonthlySummary>> {
        validate_month(month)?;
        let summary = self.summaries.stored_monthly(year, month).await?;
        if summary.is_none() {
            debug!(year, month, "No stored summary for month");
        }
        Ok(summary)
    }

    /// Annual report, optionally against a comparison year fetched concurrently
    ///
    /// # Errors
    /// Only a failure of the report year itself. A failed comparison year
    /// leaves `comparison` empty and is reported in `comparison_error`.
    pub async fn annual_report(&self, year: i32, compare_year: Option<i32>) -> Result<AnnualReport> {
        let (summary, previous) = match compare_year {
            Some(other) => {
                let (summary, previous) =
                    futures::join!(self.summaries.annual(year), self.summaries.annual(other));
                (summary?, Some((other, previous)))
            }
            None => (self.summaries.annual(year).await?, None),
        };

        let (comparison, comparison_error) = match previous {
            Some((other, Ok(previous))) => (
                Some(AnnualComparison {
                    year: other,
                    monthly: compare_monthly(&summary.monthly_stats, &previous.monthly_stats),
                    total: compare_counts(summary.total_issues, previous.total_issues),
                    summary: previous,
                }),
                None,
            ),
            Some((other, Err(err))) => {
                warn!(year, compare_year = other, error = %err, "Comparison year unavailable");
                (None, Some(err))
            }
            None => (None, None),
        };

        info!(year, compare_year, total = summary.total_issues, "Annual report loaded");
        Ok(AnnualReport { year, summary, comparison, comparison_error })
    }

    pub async fn annual_trend(&self, year: i32, kind: TrendKind) -> Result<TrendReport> {
        let trend = self.summaries.annual_trend(year, kind).await?;
        Ok(TrendReport {
            year,
            kind,
            total: trend.effective_total(),
            resolution_rate: trend.effective_resolution_rate(),
            trend,
        })
    }

    /// Analytics page for `year`, defaulting to the newest year in the data
    pub async fn analytics(&self, year: Option<i32>) -> Result<AnalyticsReport> {
        let issues = normalize_all(self.issues.list_issues().await?);
        let year = year.unwrap_or_else(|| default_year(&self.aggregator, &issues));
        Ok(self.analytics_from(&issues, year))
    }

    /// Analytics page computed from an already loaded issue list
    pub fn analytics_from(&self, issues: &[Issue], year: i32) -> AnalyticsReport {
        let yearly = self.aggregator.aggregate(issues, Granularity::Year, year);
        let this_year = self.issues_in_year(issues, year);
        let last_year = self.issues_in_year(issues, year - 1);

        AnalyticsReport {
            overview: analytics_overview(&self.aggregator, issues, year),
            monthly: self.aggregator.aggregate(issues, Granularity::Month, year),
            quarterly: self.aggregator.aggregate(issues, Granularity::Quarter, year),
            year_over_year: year_over_year(&yearly),
            yearly,
            by_type: aggregate_by_field(issues, CategoryField::IssueType),
            by_source: aggregate_by_field(issues, CategoryField::Source),
            by_status: aggregate_by_field(issues, CategoryField::Status),
            type_growth: compare_categories(
                &aggregate_by_field(&this_year, CategoryField::IssueType),
                &aggregate_by_field(&last_year, CategoryField::IssueType),
            ),
            source_growth: compare_categories(
                &aggregate_by_field(&this_year, CategoryField::Source),
                &aggregate_by_field(&last_year, CategoryField::Source),
            ),
        }
    }

    fn issues_in_year(&self, issues: &[Issue], year: i32) -> Vec<Issue> {
        issues
            .iter()
            .filter(|issue| self.aggregator.local_date(issue).is_some_and(|d| d.year() == year))
            .cloned()
            .collect()
    }
}

fn validate_month(month: u32) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(TicketboardError::InvalidInput(format!("Month must be between 1 and 12 (got {month})")))
    }
}
