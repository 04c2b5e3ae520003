//! Decoding of backend payloads as the REST endpoints actually send them

use ticketboard_domain::{
    AnnualSummary, AnnualTrend, Comment, Config, CreatedAt, IssueId, IssueStats, MonthlySummary,
    RawIssue, TicketboardError,
};

#[test]
fn test_raw_issue_tolerates_loose_types() {
    let raw: RawIssue = serde_json::from_str(
        r#"{
            "id": 42,
            "title": "Globex",
            "status": "處理中",
            "priority": null,
            "created_at": "2025-03-04 09:15:00",
            "estimated_hours": "2.5",
            "unexpected": {"nested": true}
        }"#,
    )
    .unwrap();

    assert_eq!(raw.id, Some(IssueId::from(42)));
    assert_eq!(raw.status.as_deref(), Some("處理中"));
    assert_eq!(raw.priority, None);
    assert_eq!(raw.estimated_hours, Some(2.5));
    assert!(CreatedAt::parse(raw.created_at.as_deref()).is_valid());
}

#[test]
fn test_empty_object_decodes_to_defaults() {
    let raw: RawIssue = serde_json::from_str("{}").unwrap();
    assert_eq!(raw, RawIssue::default());

    let stats: IssueStats = serde_json::from_str("{}").unwrap();
    assert_eq!(stats.total_issues, 0);
}

#[test]
fn test_comment_attachment_shapes() {
    let encoded: Comment = serde_json::from_str(
        r#"{"id": "c1", "content": "see log", "edited": 1,
            "attachments": "[{\"filename\": \"log.txt\", \"path\": \"9f.txt\"}]"}"#,
    )
    .unwrap();
    assert!(encoded.edited);
    assert_eq!(encoded.attachments.len(), 1);
    assert_eq!(encoded.author(), "Anonymous");

    let listed: Comment =
        serde_json::from_str(r#"{"id": 2, "attachments": [{"filename": "a.png", "path": "/a.png"}]}"#)
            .unwrap();
    assert_eq!(listed.attachments[0].download_path(), "/uploads/a.png");

    let broken: Comment = serde_json::from_str(r#"{"id": 3, "attachments": "not json"}"#).unwrap();
    assert!(broken.attachments.is_empty());
}

#[test]
fn test_summary_payloads_keep_backend_order() {
    let monthly: MonthlySummary = serde_json::from_str(
        r#"{"issueCount": "7", "completed": 5, "uncompleted": 2,
            "issueTypes": {"network": 4, "system": 3},
            "sourceStats": {"Line chat": 6, "Email": 1}}"#,
    )
    .unwrap();
    let labels: Vec<&str> = monthly.issue_types.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["network", "system"]);
    assert_eq!(monthly.issue_count, 7);

    let annual: AnnualSummary =
        serde_json::from_str(r#"{"totalIssues": 3, "monthlyStats": {"1": 2, "12": 1}}"#).unwrap();
    assert_eq!(annual.monthly_stats[0], 2);
    assert_eq!(annual.monthly_stats[11], 1);
}

#[test]
fn test_trend_resolution_rate_is_recomputed() {
    let trend: AnnualTrend = serde_json::from_str(
        r#"{"months": [{"month": 1, "issueCount": 3, "closedCount": 3},
                       {"month": 2, "issueCount": 1, "resolved": 0}]}"#,
    )
    .unwrap();
    assert_eq!(trend.effective_total(), 4);
    assert!((trend.effective_resolution_rate() - 75.0).abs() < f64::EPSILON);
}

#[test]
fn test_errors_round_trip_through_json() {
    let err = TicketboardError::Http { status: 502, message: "Bad gateway".into() };
    let json = serde_json::to_string(&err).unwrap();
    assert!(json.contains("\"type\":\"Http\""));
    assert_eq!(serde_json::from_str::<TicketboardError>(&json).unwrap(), err);
}

#[test]
fn test_config_from_toml_like_json_sections() {
    let config: Config = serde_json::from_str(r#"{"api": {"max_attempts": 5}}"#).unwrap();
    assert_eq!(config.api.max_attempts, 5);
    assert_eq!(config.api.timeout_secs, 10);
}
