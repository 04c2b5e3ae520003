//! Comment thread commands

use ticketboard_core::store::CommentsAction;
use ticketboard_domain::{
    Comment, CommentId, CommentUpdate, IssueId, NewComment, Result, TicketboardError,
};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Thread of one issue, oldest first
pub async fn list_comments(ctx: &AppContext, issue_id: IssueId) -> std::result::Result<Vec<Comment>, String> {
    execute_command(ctx, "comments::list_comments", || load_thread(ctx, &issue_id)).await
}

pub async fn add_comment(ctx: &AppContext, comment: NewComment) -> std::result::Result<Comment, String> {
    execute_command(ctx, "comments::add_comment", || async {
        let result = ctx.comments.add(comment).await;
        let mut state = ctx.comment_thread.lock().await;
        match result {
            Ok(created) => {
                state.dispatch(CommentsAction::Added(created.clone()));
                Ok(created)
            }
            Err(err) => {
                state.dispatch(CommentsAction::MutationFailed(err.user_message(ctx.locale)));
                Err(err)
            }
        }
    })
    .await
}

/// Edit a comment of `issue_id`; the thread is loaded first when another
/// issue is open.
pub async fn edit_comment(
    ctx: &AppContext,
    issue_id: IssueId,
    comment_id: CommentId,
    update: CommentUpdate,
) -> std::result::Result<Comment, String> {
    execute_command(ctx, "comments::edit_comment", || async {
        let existing = find_comment(ctx, &issue_id, &comment_id).await?;
        let result = ctx.comments.edit(&existing, update).await;
        let mut state = ctx.comment_thread.lock().await;
        match result {
            Ok(edited) => {
                state.dispatch(CommentsAction::Updated(edited.clone()));
                Ok(edited)
            }
            Err(err) => {
                state.dispatch(CommentsAction::MutationFailed(err.user_message(ctx.locale)));
                Err(err)
            }
        }
    })
    .await
}

pub async fn delete_comment(ctx: &AppContext, comment_id: CommentId) -> std::result::Result<(), String> {
    execute_command(ctx, "comments::delete_comment", || async {
        let result = ctx.comments.delete(&comment_id).await;
        let mut state = ctx.comment_thread.lock().await;
        match result {
            Ok(()) => {
                state.dispatch(CommentsAction::Removed(comment_id.clone()));
                Ok(())
            }
            Err(err) => {
                state.dispatch(CommentsAction::MutationFailed(err.user_message(ctx.locale)));
                Err(err)
            }
        }
    })
    .await
}

async fn load_thread(ctx: &AppContext, issue_id: &IssueId) -> Result<Vec<Comment>> {
    let token = ctx.comment_thread.lock().await.begin_load(issue_id);
    let result = ctx.comments.list(issue_id).await;

    let mut state = ctx.comment_thread.lock().await;
    match result {
        Ok(comments) => {
            state.dispatch(CommentsAction::Loaded {
                token,
                issue_id: issue_id.clone(),
                comments: comments.clone(),
            });
            Ok(comments)
        }
        Err(err) => {
            state.dispatch(CommentsAction::LoadFailed { token, message: err.user_message(ctx.locale) });
            Err(err)
        }
    }
}

async fn find_comment(ctx: &AppContext, issue_id: &IssueId, comment_id: &CommentId) -> Result<Comment> {
    let cached = {
        let state = ctx.comment_thread.lock().await;
        if state.issue_id.as_ref() == Some(issue_id) {
            state.comments.iter().find(|c| &c.id == comment_id).cloned()
        } else {
            None
        }
    };
    let comment = match cached {
        Some(comment) => Some(comment),
        None => load_thread(ctx, issue_id).await?.into_iter().find(|c| &c.id == comment_id),
    };
    comment.ok_or_else(|| TicketboardError::NotFound(format!("comment {comment_id} on issue {issue_id}")))
}
