//! Comment thread slice for the issue currently open

use ticketboard_domain::{Comment, CommentId, IssueId};

use super::request::{RequestToken, RequestTracker};

#[derive(Debug, Clone, PartialEq)]
pub enum CommentsAction {
    Loaded { token: RequestToken, issue_id: IssueId, comments: Vec<Comment> },
    LoadFailed { token: RequestToken, message: String },
    Added(Comment),
    Updated(Comment),
    Removed(CommentId),
    MutationFailed(String),
    /// The open issue was closed or deleted
    Cleared,
}

#[derive(Debug, Clone, Default)]
pub struct CommentsState {
    pub issue_id: Option<IssueId>,
    pub comments: Vec<Comment>,
    pub loading: bool,
    pub error: Option<String>,
    requests: RequestTracker<()>,
}

impl CommentsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading the thread of `issue_id`. Any earlier load in flight is
    /// superseded, including one for a different issue.
    pub fn begin_load(&mut self, issue_id: &IssueId) -> RequestToken {
        if self.issue_id.as_ref() != Some(issue_id) {
            self.comments.clear();
        }
        self.issue_id = Some(issue_id.clone());
        self.loading = true;
        self.requests.begin(())
    }

    pub fn dispatch(&mut self, action: CommentsAction) {
        match action {
            CommentsAction::Loaded { token, issue_id, comments } => {
                if self.requests.finish(&(), token) && self.issue_id.as_ref() == Some(&issue_id) {
                    self.comments = comments;
                    self.loading = false;
                    self.error = None;
                }
            }
            CommentsAction::LoadFailed { token, message } => {
                if self.requests.finish(&(), token) {
                    self.loading = false;
                    self.error = Some(message);
                }
            }
            CommentsAction::Added(comment) => {
                if self.belongs(&comment) {
                    self.comments.push(comment);
                }
                self.error = None;
            }
            CommentsAction::Updated(comment) => {
                if let Some(slot) = self.comments.iter_mut().find(|c| c.id == comment.id) {
                    *slot = comment;
                }
                self.error = None;
            }
            CommentsAction::Removed(id) => {
                self.comments.retain(|c| c.id != id);
                self.error = None;
            }
            CommentsAction::MutationFailed(message) => self.error = Some(message),
            CommentsAction::Cleared => *self = Self::default(),
        }
    }

    fn belongs(&self, comment: &Comment) -> bool {
        match (&comment.issue_id, &self.issue_id) {
            (Some(owner), Some(open)) => owner == open,
            _ => true,
        }
    }
}
