//! Port interfaces for issue records
//!
//! Adapters return wire records; normalisation happens in the service.

use async_trait::async_trait;
use ticketboard_domain::{
    IssueId, IssueStats, IssueStatus, IssueUpdate, NewIssue, RawIssue, Result,
};

/// Trait for the issue endpoints of the REST backend
#[async_trait]
pub trait IssueApi: Send + Sync {
    /// Full issue list (`GET /issues`)
    async fn list_issues(&self) -> Result<Vec<RawIssue>>;

    /// Newest issues first, at most `limit`
    async fn list_recent(&self, limit: usize) -> Result<Vec<RawIssue>>;

    /// Status counters (`GET /issues/stats`)
    async fn stats(&self) -> Result<IssueStats>;

    /// Create an issue and return the stored record
    async fn create_issue(&self, issue: &NewIssue) -> Result<RawIssue>;

    /// Partial update; `None` when the backend acknowledged without a record
    async fn update_issue(&self, id: &IssueId, update: &IssueUpdate) -> Result<Option<RawIssue>>;

    /// Status change; `None` when the backend acknowledged without a record
    async fn update_status(&self, id: &IssueId, status: IssueStatus) -> Result<Option<RawIssue>>;

    async fn delete_issue(&self, id: &IssueId) -> Result<()>;
}
