//! Services driven through in-memory ports

mod support;

use std::sync::Arc;

use support::fixtures::raw;
use support::ports::{MockCommentApi, MockIssueApi, MockSummaryApi};
use ticketboard_core::store::{IssuesAction, IssuesState};
use ticketboard_core::{CommentService, IssueService, ReportService};
use ticketboard_domain::{
    AnnualSummary, AnnualTrend, Comment, CommentId, IssueId, IssueStatus, IssueUpdate,
    LabeledCounts, MonthTrendPoint, MonthlySummary, NewComment, NewIssue, TicketboardError,
    TrendKind,
};

fn issue_api() -> Arc<MockIssueApi> {
    Arc::new(MockIssueApi::new(vec![
        raw(1, "2024-12-30", "Closed"),
        raw(2, "2025-01-04", "Pending"),
        raw(3, "2025-02-11", "In Progress"),
        raw(4, "bad date", "Closed"),
    ]))
}

#[tokio::test]
async fn home_fetches_stats_and_recent_together() {
    let api = issue_api();
    let service = IssueService::new(api.clone()).with_recent_limit(2);
    let home = service.home().await.unwrap();

    assert_eq!(home.stats.total_issues, 4);
    assert_eq!(home.stats.closed_issues, 2);
    assert_eq!(home.recent.len(), 2);
    let calls = api.calls();
    assert!(calls.contains(&"stats".to_string()));
    assert!(calls.contains(&"recent:2".to_string()));
}

#[tokio::test]
async fn create_normalises_the_server_record() {
    let service = IssueService::new(issue_api());
    let created = service.create(NewIssue::new("  Globex ")).await.unwrap();
    assert_eq!(created.id.as_str(), "100");
    assert_eq!(created.status, Some(IssueStatus::Pending));
    assert_eq!(created.source, "Line chat");
    assert!(created.created_at.is_valid());
}

#[tokio::test]
async fn status_change_uses_the_returned_record() {
    let api = issue_api();
    let service = IssueService::new(api.clone());
    let current = service.list().await.unwrap().remove(1);

    let updated = service.update_status(&current, IssueStatus::Closed).await.unwrap();
    assert_eq!(updated.status, Some(IssueStatus::Closed));
    assert!(api.calls().contains(&"status:2:Closed".to_string()));
}

#[tokio::test]
async fn empty_update_is_rejected_before_the_request() {
    let api = issue_api();
    let service = IssueService::new(api.clone());
    let current = service.list().await.unwrap().remove(0);

    let result = service.update(&current, IssueUpdate::default()).await;
    assert!(matches!(result, Err(TicketboardError::InvalidInput(_))));
    assert!(!api.calls().iter().any(|call| call.starts_with("update:")));
}

#[tokio::test]
async fn transport_failure_surfaces_unchanged() {
    let service = IssueService::new(Arc::new(MockIssueApi::failing(TicketboardError::Network(
        "connection refused".into(),
    ))));
    let err = service.list().await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn service_results_flow_into_the_store() {
    let service = IssueService::new(issue_api());
    let mut state = IssuesState::default();

    let token = state.begin_load();
    let issues = service.list().await.unwrap();
    state.dispatch(IssuesAction::Loaded { token, issues });
    assert_eq!(state.board().total_matched, 4);

    let target = state.find(&IssueId::from("3")).cloned().unwrap();
    let closed = service.update_status(&target, IssueStatus::Closed).await.unwrap();
    state.dispatch(IssuesAction::IssueUpdated(closed));
    assert_eq!(state.find(&IssueId::from("3")).and_then(|i| i.status), Some(IssueStatus::Closed));

    service.delete(&IssueId::from("3")).await.unwrap();
    state.dispatch(IssuesAction::IssueRemoved(IssueId::from("3")));
    assert_eq!(state.issues.len(), 3);
}

#[tokio::test]
async fn analytics_defaults_to_newest_year() {
    let service = ReportService::new(Arc::new(MockSummaryApi::default()), issue_api());
    let report = service.analytics(None).await.unwrap();

    assert_eq!(report.overview.year, 2025);
    assert_eq!(report.overview.years, vec![2025, 2024]);
    assert_eq!(report.overview.year_total, 2);
    assert_eq!(report.overview.latest_month, Some(2));
    assert_eq!(report.overview.closed, 2);
    assert_eq!(report.overview.open, 2);
    assert_eq!(report.monthly.unbucketable, 1);
    assert_eq!(report.by_status.total, 4);
}

#[tokio::test]
async fn analytics_respects_timezone() {
    let service = ReportService::new(Arc::new(MockSummaryApi::default()), issue_api())
        .with_timezone(chrono_tz::Asia::Taipei);
    let issues = vec![support::fixtures::issue(1, "2024-12-31T20:00:00Z", "Pending")];
    let report = service.analytics_from(&issues, 2025);
    assert_eq!(report.monthly.counts()[0], 1);
}

#[tokio::test]
async fn annual_report_compares_years() {
    let mut this_year = AnnualSummary { total_issues: 30, ..AnnualSummary::default() };
    this_year.monthly_stats[0] = 15;
    let mut last_year = AnnualSummary { total_issues: 20, ..AnnualSummary::default() };
    last_year.monthly_stats[0] = 10;

    let summaries = Arc::new(MockSummaryApi {
        annual: vec![(2025, this_year), (2024, last_year)],
        ..MockSummaryApi::default()
    });
    let service = ReportService::new(summaries.clone(), issue_api());
    let report = service.annual_report(2025, Some(2024)).await.unwrap();

    let comparison = report.comparison.unwrap();
    assert_eq!(comparison.year, 2024);
    assert!((comparison.total.rate_percent - 50.0).abs() < f64::EPSILON);
    assert!((comparison.monthly.growth[0].rate_percent - 50.0).abs() < f64::EPSILON);
    assert_eq!(summaries.calls().len(), 2);
}

#[tokio::test]
async fn missing_comparison_year_keeps_the_report() {
    let summary = AnnualSummary { total_issues: 12, ..AnnualSummary::default() };
    let summaries = Arc::new(MockSummaryApi {
        annual: vec![(2025, summary.clone())],
        ..MockSummaryApi::default()
    });
    let service = ReportService::new(summaries.clone(), issue_api());

    let report = service.annual_report(2025, Some(2019)).await.unwrap();
    assert_eq!(report.summary, summary);
    assert!(report.comparison.is_none());
    assert!(matches!(report.comparison_error, Some(TicketboardError::NotFound(_))));
    assert_eq!(summaries.calls().len(), 2);
}

#[tokio::test]
async fn missing_report_year_fails_the_report() {
    let summaries = Arc::new(MockSummaryApi {
        annual: vec![(2024, AnnualSummary::default())],
        ..MockSummaryApi::default()
    });
    let service = ReportService::new(summaries, issue_api());
    let result = service.annual_report(2025, Some(2024)).await;
    assert!(matches!(result, Err(TicketboardError::NotFound(_))));
}

#[tokio::test]
async fn monthly_dashboard_derives_insights() {
    let summaries = Arc::new(MockSummaryApi {
        monthly: MonthlySummary {
            issue_count: 4,
            completed: 3,
            uncompleted: 1,
            issue_types: [("network".to_string(), 1), ("system".to_string(), 3)].into_iter().collect(),
            source_stats: LabeledCounts::new(),
        },
        ..MockSummaryApi::default()
    });
    let service = ReportService::new(summaries, issue_api());

    let dashboard = service.monthly_dashboard(2025, 3).await.unwrap();
    assert_eq!(dashboard.insights.completion_rate, 75);
    assert_eq!(dashboard.insights.top_issue_type.map(|t| t.label), Some("system".to_string()));
    assert!(dashboard.insights.top_source.is_none());

    assert!(service.monthly_dashboard(2025, 13).await.is_err());
}

#[tokio::test]
async fn trend_falls_back_to_month_sums() {
    let trend = AnnualTrend {
        months: vec![
            MonthTrendPoint { month: 1, issue_count: 4, resolved: 2, closed_count: 0 },
            MonthTrendPoint { month: 2, issue_count: 6, resolved: 0, closed_count: 6 },
        ],
        total_count: 0,
        resolution_rate: None,
    };
    let summaries = Arc::new(MockSummaryApi { trend, ..MockSummaryApi::default() });
    let service = ReportService::new(summaries.clone(), issue_api());

    let report = service.annual_trend(2025, TrendKind::Stored).await.unwrap();
    assert_eq!(report.total, 10);
    assert!((report.resolution_rate - 80.0).abs() < f64::EPSILON);
    assert_eq!(summaries.calls(), vec!["trend:2025:stored".to_string()]);
}

#[tokio::test]
async fn comment_thread_round_trip() {
    let issue_id = IssueId::from("7");
    let thread = vec![Comment {
        id: CommentId::from("1"),
        issue_id: Some(issue_id.clone()),
        content: "Rebooted the router".into(),
        ..Comment::default()
    }];
    let service = CommentService::new(Arc::new(MockCommentApi { thread }));

    assert_eq!(service.list(&issue_id).await.unwrap().len(), 1);
    let created = service.add(NewComment::new(issue_id.clone(), "Still down")).await.unwrap();
    assert_eq!(created.issue_id, Some(issue_id));
    assert_eq!(created.author(), "User");
}
