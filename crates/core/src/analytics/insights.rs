//! Headline figures for the analytics page and the monthly dashboard

use chrono::Datelike;
use ticketboard_domain::{
    AnalyticsOverview, Granularity, Issue, IssueStatus, MonthlyInsights, MonthlySummary,
};

use super::percent;
use super::time_buckets::TimeBucketAggregator;

/// Stat cards of the analytics page for `year`.
///
/// Year and month figures use calendar buckets (invalid dates excluded);
/// closed and open counts cover every issue regardless of date.
pub fn analytics_overview(
    aggregator: &TimeBucketAggregator,
    issues: &[Issue],
    year: i32,
) -> AnalyticsOverview {
    let months = aggregator.aggregate(issues, Granularity::Month, year);
    let latest = months.buckets.iter().rev().find(|bucket| bucket.count > 0);

    let closed = issues.iter().filter(|i| i.status == Some(IssueStatus::Closed)).count();
    let open = issues.iter().filter(|i| i.is_open()).count();

    AnalyticsOverview {
        year,
        year_total: months.bucketed(),
        latest_month: latest.map(|bucket| bucket.period),
        latest_month_total: latest.map_or(0, |bucket| bucket.count),
        closed: closed as u64,
        open: open as u64,
        years: aggregator.years(issues),
    }
}

/// Default report year: the newest year in the data, else the current one.
pub fn default_year(aggregator: &TimeBucketAggregator, issues: &[Issue]) -> i32 {
    aggregator
        .years(issues)
        .first()
        .copied()
        .unwrap_or_else(|| chrono::Utc::now().with_timezone(&aggregator.timezone()).year())
}

/// Completion rate and top categories of a monthly summary.
pub fn monthly_insights(summary: &MonthlySummary) -> MonthlyInsights {
    MonthlyInsights {
        completion_rate: completion_rate(summary.completed, summary.uncompleted),
        top_source: summary.source_stats.top().cloned(),
        top_issue_type: summary.issue_types.top().cloned(),
    }
}

/// `completed / (completed + uncompleted)` as a whole percentage, 0 when empty.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn completion_rate(completed: u64, uncompleted: u64) -> u32 {
    percent(completed, completed + uncompleted).round() as u32
}

#[cfg(test)]
mod tests {
    use ticketboard_domain::{CreatedAt, IssueId, LabeledCounts};

    use super::*;

    fn issue(created_at: &str, status: Option<IssueStatus>) -> Issue {
        Issue {
            id: IssueId::from(created_at),
            title: String::new(),
            description: None,
            source: "Email".into(),
            issue_type: "system".into(),
            status,
            priority: None,
            assigned_to: None,
            created_at: CreatedAt::parse(Some(created_at)),
            warranty_end_date: None,
            estimated_hours: None,
        }
    }

    #[test]
    fn overview_counts() {
        let issues = vec![
            issue("2025-01-15", Some(IssueStatus::Closed)),
            issue("2025-04-02", Some(IssueStatus::Pending)),
            issue("2025-04-20", Some(IssueStatus::InProgress)),
            issue("2024-12-31", Some(IssueStatus::Closed)),
            issue("not a date", None),
        ];
        let overview = analytics_overview(&TimeBucketAggregator::new(), &issues, 2025);
        assert_eq!(overview.year_total, 3);
        assert_eq!(overview.latest_month, Some(4));
        assert_eq!(overview.latest_month_total, 2);
        assert_eq!(overview.closed, 2);
        assert_eq!(overview.open, 2);
        assert_eq!(overview.years, vec![2025, 2024]);
        assert_eq!(default_year(&TimeBucketAggregator::new(), &issues), 2025);
    }

    #[test]
    fn empty_year_has_no_latest_month() {
        let overview = analytics_overview(&TimeBucketAggregator::new(), &[], 2025);
        assert_eq!(overview.latest_month, None);
        assert_eq!(overview.year_total, 0);
    }

    #[test]
    fn completion_rate_rounds_to_integer() {
        assert_eq!(completion_rate(2, 1), 67);
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(5, 0), 100);
    }

    #[test]
    fn insights_pick_first_top_on_tie() {
        let summary = MonthlySummary {
            issue_count: 6,
            completed: 1,
            uncompleted: 3,
            source_stats: [("Email".to_string(), 3), ("電話".to_string(), 3)].into_iter().collect(),
            issue_types: LabeledCounts::new(),
        };
        let insights = monthly_insights(&summary);
        assert_eq!(insights.completion_rate, 25);
        assert_eq!(insights.top_source.map(|t| t.label), Some("Email".to_string()));
        assert!(insights.top_issue_type.is_none());
    }
}
