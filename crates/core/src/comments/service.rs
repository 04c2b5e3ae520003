//! Comment service

use std::sync::Arc;

use ticketboard_domain::{
    Comment, CommentId, CommentUpdate, IssueId, NewComment, Result, TicketboardError,
};
use tracing::info;

use super::ports::CommentApi;

/// Comment service
pub struct CommentService {
    api: Arc<dyn CommentApi>,
}

impl CommentService {
    /// Create a new comment service
    pub fn new(api: Arc<dyn CommentApi>) -> Self {
        Self { api }
    }

    /// Thread of `issue_id`, oldest first; undated comments last
    pub async fn list(&self, issue_id: &IssueId) -> Result<Vec<Comment>> {
        if issue_id.is_empty() {
            return Err(TicketboardError::InvalidInput("Issue id is required".into()));
        }
        let mut comments = self.api.list_for_issue(issue_id).await?;
        comments.sort_by_key(|c| {
            let at = c.created_at.as_datetime();
            (at.is_none(), at)
        });
        info!(issue_id = %issue_id, count = comments.len(), "Loaded comments");
        Ok(comments)
    }

    /// Validate and post a comment
    pub async fn add(&self, comment: NewComment) -> Result<Comment> {
        comment.validate()?;
        let mut created = self.api.create_comment(&comment).await?;
        if created.issue_id.is_none() {
            created.issue_id = Some(comment.issue_id.clone());
        }
        info!(
            issue_id = %comment.issue_id,
            attachments = comment.attachments.len(),
            "Comment added"
        );
        Ok(created)
    }

    /// Edit `existing`; the server response is merged over the local edit.
    pub async fn edit(&self, existing: &Comment, update: CommentUpdate) -> Result<Comment> {
        update.validate()?;
        if existing.id.is_empty() {
            return Err(TicketboardError::InvalidInput("Comment id is required".into()));
        }
        let response = self.api.update_comment(&existing.id, &update).await?;
        let edited = update.apply_to(existing).merge(&response);
        info!(
            comment_id = %existing.id,
            removed = update.remove_attachments.len(),
            added = update.attachments.len(),
            "Comment edited"
        );
        Ok(edited)
    }

    pub async fn delete(&self, id: &CommentId) -> Result<()> {
        if id.is_empty() {
            return Err(TicketboardError::InvalidInput("Comment id is required".into()));
        }
        self.api.delete_comment(id).await?;
        info!(comment_id = %id, "Comment deleted");
        Ok(())
    }
}
