//! Issue service - normalisation and validation around the issue port

use std::sync::Arc;

use serde::Serialize;
use ticketboard_domain::constants::RECENT_ISSUES_LIMIT;
use ticketboard_domain::{
    Issue, IssueId, IssueStats, IssueStatus, IssueUpdate, NewIssue, RawIssue, Result,
    TicketboardError,
};
use tracing::{info, warn};

use super::ports::IssueApi;
use crate::analytics::normalizer::{normalize, normalize_all};

/// Home page data: status counters plus the newest issues
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeSnapshot {
    pub stats: IssueStats,
    pub recent: Vec<Issue>,
}

/// Issue service
pub struct IssueService {
    api: Arc<dyn IssueApi>,
    recent_limit: usize,
}

impl IssueService {
    /// Create a new issue service
    pub fn new(api: Arc<dyn IssueApi>) -> Self {
        Self { api, recent_limit: RECENT_ISSUES_LIMIT }
    }

    /// Number of issues shown on the home page
    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Every issue, normalised
    pub async fn list(&self) -> Result<Vec<Issue>> {
        let raws = self.api.list_issues().await?;
        let issues = normalize_all(raws);
        info!(count = issues.len(), "Loaded issues");
        Ok(issues)
    }

    /// Stats and recent issues, fetched concurrently
    pub async fn home(&self) -> Result<HomeSnapshot> {
        let (stats, recent) =
            futures::try_join!(self.api.stats(), self.api.list_recent(self.recent_limit))?;
        let mut recent = normalize_all(recent);
        recent.truncate(self.recent_limit);
        Ok(HomeSnapshot { stats, recent })
    }

    /// Validate and create an issue
    ///
    /// # Errors
    /// `InvalidInput` before any request when the form is incomplete.
    pub async fn create(&self, issue: NewIssue) -> Result<Issue> {
        issue.validate()?;
        let created = normalize(self.api.create_issue(&issue).await?);
        info!(issue_id = %created.id, "Issue created");
        Ok(created)
    }

    /// Apply a quick or full edit to `current`
    ///
    /// The returned issue is the server's record when it sent one, otherwise
    /// `current` patched locally with the update.
    pub async fn update(&self, current: &Issue, update: IssueUpdate) -> Result<Issue> {
        update.validate()?;
        ensure_id(&current.id)?;
        let response = self.api.update_issue(&current.id, &update).await?;
        Ok(reconcile(current, &update, response))
    }

    /// Move `current` to `status`
    pub async fn update_status(&self, current: &Issue, status: IssueStatus) -> Result<Issue> {
        ensure_id(&current.id)?;
        let response = self.api.update_status(&current.id, status).await?;
        let update = IssueUpdate { status: Some(status), ..IssueUpdate::default() };
        Ok(reconcile(current, &update, response))
    }

    pub async fn delete(&self, id: &IssueId) -> Result<()> {
        ensure_id(id)?;
        self.api.delete_issue(id).await?;
        info!(issue_id = %id, "Issue deleted");
        Ok(())
    }
}

fn reconcile(current: &Issue, update: &IssueUpdate, response: Option<RawIssue>) -> Issue {
    match response.map(normalize) {
        Some(updated) if updated.id == current.id => updated,
        Some(updated) => {
            warn!(
                expected = %current.id,
                returned = %updated.id,
                "Update response describes another issue; patching locally"
            );
            update.apply_to(current)
        }
        None => update.apply_to(current),
    }
}

fn ensure_id(id: &IssueId) -> Result<()> {
    if id.is_empty() {
        return Err(TicketboardError::InvalidInput("Issue id is required".into()));
    }
    Ok(())
}
