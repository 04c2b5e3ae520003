//! `/issues` adapter

use async_trait::async_trait;
use serde::Deserialize;
use ticketboard_core::IssueApi;
use ticketboard_domain::{
    IssueId, IssueStats, IssueStatus, IssueUpdate, NewIssue, RawIssue, Result, StatusChange,
};
use tracing::instrument;

use super::client::ApiClient;

const NEWEST_FIRST: &str = "created_at:desc";

/// List endpoints answer with either a bare array or `{"issues": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum IssueList {
    Bare(Vec<RawIssue>),
    Enveloped {
        #[serde(default)]
        issues: Vec<RawIssue>,
    },
}

impl IssueList {
    pub(crate) fn into_vec(self) -> Vec<RawIssue> {
        match self {
            Self::Bare(issues) | Self::Enveloped { issues } => issues,
        }
    }
}

/// Mutation responses may be the updated record, an acknowledgement
/// object or an empty body; only a record with an id counts.
fn as_record(response: Option<RawIssue>) -> Option<RawIssue> {
    response.filter(|raw| raw.id.as_ref().is_some_and(|id| !id.is_empty()))
}

/// [`IssueApi`] over HTTP
#[derive(Clone)]
pub struct HttpIssueApi {
    client: ApiClient,
}

impl HttpIssueApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IssueApi for HttpIssueApi {
    #[instrument(skip(self))]
    async fn list_issues(&self) -> Result<Vec<RawIssue>> {
        let list: IssueList = self.client.get("/issues").await?;
        Ok(list.into_vec())
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, limit: usize) -> Result<Vec<RawIssue>> {
        let limit = limit.to_string();
        let list: IssueList = self
            .client
            .get_query("/issues", &[("sort", NEWEST_FIRST), ("limit", limit.as_str())])
            .await?;
        Ok(list.into_vec())
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> Result<IssueStats> {
        Ok(self.client.get("/issues/stats").await?)
    }

    #[instrument(skip(self, issue), fields(title = %issue.title))]
    async fn create_issue(&self, issue: &NewIssue) -> Result<RawIssue> {
        Ok(self.client.post("/issues", issue).await?)
    }

    #[instrument(skip(self, update), fields(issue_id = %id))]
    async fn update_issue(&self, id: &IssueId, update: &IssueUpdate) -> Result<Option<RawIssue>> {
        let response: Option<RawIssue> = self.client.put(&format!("/issues/{id}"), update).await?;
        Ok(as_record(response))
    }

    #[instrument(skip(self), fields(issue_id = %id))]
    async fn update_status(&self, id: &IssueId, status: IssueStatus) -> Result<Option<RawIssue>> {
        let response: Option<RawIssue> =
            self.client.put(&format!("/issues/{id}/status"), &StatusChange { status }).await?;
        Ok(as_record(response))
    }

    #[instrument(skip(self), fields(issue_id = %id))]
    async fn delete_issue(&self, id: &IssueId) -> Result<()> {
        Ok(self.client.delete(&format!("/issues/{id}")).await?)
    }
}
