//! In-memory mocks for the core ports
//!
//! Each mock serves fixed data and records the calls it receives.

use std::sync::Mutex;

use async_trait::async_trait;
use ticketboard_core::{CommentApi, IssueApi, SummaryApi};
use ticketboard_domain::{
    AnnualSummary, AnnualTrend, Comment, CommentId, CommentUpdate, IssueId, IssueStats,
    IssueStatus, IssueUpdate, MonthlySummary, NewComment, NewIssue, RawIssue, Result,
    TicketboardError, TrendKind,
};

/// Issue port serving a fixed list.
#[derive(Default)]
pub struct MockIssueApi {
    issues: Vec<RawIssue>,
    fail_with: Option<TicketboardError>,
    calls: Mutex<Vec<String>>,
}

impl MockIssueApi {
    pub fn new(issues: Vec<RawIssue>) -> Self {
        Self { issues, ..Self::default() }
    }

    /// Every call fails with `error`.
    pub fn failing(error: TicketboardError) -> Self {
        Self { fail_with: Some(error), ..Self::default() }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: impl Into<String>) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.into());
        }
        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IssueApi for MockIssueApi {
    async fn list_issues(&self) -> Result<Vec<RawIssue>> {
        self.record("list")?;
        Ok(self.issues.clone())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<RawIssue>> {
        self.record(format!("recent:{limit}"))?;
        Ok(self.issues.iter().take(limit).cloned().collect())
    }

    async fn stats(&self) -> Result<IssueStats> {
        self.record("stats")?;
        let count = |status: &str| self.issues.iter().filter(|i| i.status.as_deref() == Some(status)).count() as u64;
        Ok(IssueStats {
            total_issues: self.issues.len() as u64,
            pending_issues: count("Pending"),
            in_progress_issues: count("In Progress"),
            closed_issues: count("Closed"),
        })
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<RawIssue> {
        self.record("create")?;
        Ok(RawIssue {
            id: Some(IssueId::from(100)),
            title: Some(issue.title.clone()),
            source: Some(issue.source.clone()),
            issue_type: Some(issue.issue_type.clone()),
            status: Some(issue.status.to_string()),
            created_at: Some("2025-06-01T08:00:00Z".into()),
            ..RawIssue::default()
        })
    }

    async fn update_issue(&self, id: &IssueId, _update: &IssueUpdate) -> Result<Option<RawIssue>> {
        self.record(format!("update:{id}"))?;
        Ok(None)
    }

    async fn update_status(&self, id: &IssueId, status: IssueStatus) -> Result<Option<RawIssue>> {
        self.record(format!("status:{id}:{status}"))?;
        Ok(self
            .issues
            .iter()
            .find(|raw| raw.id.as_ref() == Some(id))
            .cloned()
            .map(|raw| RawIssue { status: Some(status.to_string()), ..raw }))
    }

    async fn delete_issue(&self, id: &IssueId) -> Result<()> {
        self.record(format!("delete:{id}"))
    }
}

/// Summary port returning the same summaries for every period.
#[derive(Default)]
pub struct MockSummaryApi {
    pub monthly: MonthlySummary,
    pub annual: Vec<(i32, AnnualSummary)>,
    pub trend: AnnualTrend,
    pub calls: Mutex<Vec<String>>,
}

impl MockSummaryApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl SummaryApi for MockSummaryApi {
    async fn monthly(&self, year: i32, month: u32) -> Result<MonthlySummary> {
        self.record(format!("monthly:{year}-{month}"));
        Ok(self.monthly.clone())
    }

    async fn stored_monthly(&self, year: i32, month: u32) -> Result<Option<MonthlySummary>> {
        self.record(format!("stored:{year}-{month}"));
        Ok((self.monthly.issue_count > 0).then(|| self.monthly.clone()))
    }

    async fn annual(&self, year: i32) -> Result<AnnualSummary> {
        self.record(format!("annual:{year}"));
        self.annual
            .iter()
            .find(|(y, _)| *y == year)
            .map(|(_, summary)| summary.clone())
            .ok_or_else(|| TicketboardError::NotFound(format!("annual summary {year}")))
    }

    async fn annual_trend(&self, year: i32, kind: TrendKind) -> Result<AnnualTrend> {
        self.record(format!("trend:{year}:{kind}"));
        Ok(self.trend.clone())
    }
}

/// Comment port that acknowledges writes without echoing records.
#[derive(Default)]
pub struct MockCommentApi {
    pub thread: Vec<Comment>,
}

#[async_trait]
impl CommentApi for MockCommentApi {
    async fn list_for_issue(&self, issue_id: &IssueId) -> Result<Vec<Comment>> {
        Ok(self.thread.iter().filter(|c| c.issue_id.as_ref() == Some(issue_id)).cloned().collect())
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        Ok(Comment {
            id: CommentId::from(500),
            content: comment.content.clone(),
            created_by: Some(comment.created_by.clone()),
            ..Comment::default()
        })
    }

    async fn update_comment(&self, _id: &CommentId, _update: &CommentUpdate) -> Result<Comment> {
        Ok(Comment::default())
    }

    async fn delete_comment(&self, _id: &CommentId) -> Result<()> {
        Ok(())
    }
}
