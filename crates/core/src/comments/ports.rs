//! Port interfaces for comment threads

use async_trait::async_trait;
use ticketboard_domain::{Comment, CommentId, CommentUpdate, IssueId, NewComment, Result};

/// Trait for the comment endpoints of the REST backend
#[async_trait]
pub trait CommentApi: Send + Sync {
    /// Thread of one issue, oldest first
    async fn list_for_issue(&self, issue_id: &IssueId) -> Result<Vec<Comment>>;

    /// Create a comment with its attachments
    async fn create_comment(&self, comment: &NewComment) -> Result<Comment>;

    /// Edit a comment. The returned comment has an empty id when the
    /// backend only acknowledged the change.
    async fn update_comment(&self, id: &CommentId, update: &CommentUpdate) -> Result<Comment>;

    async fn delete_comment(&self, id: &CommentId) -> Result<()>;
}
