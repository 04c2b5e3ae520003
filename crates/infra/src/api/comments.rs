//! `/comments` adapter

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use ticketboard_core::CommentApi;
use ticketboard_domain::{
    Comment, CommentId, CommentUpdate, IssueId, NewComment, Result, TicketboardError, UploadFile,
};
use tracing::instrument;

use super::client::ApiClient;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CommentList {
    Bare(Vec<Comment>),
    Enveloped {
        #[serde(default)]
        comments: Vec<Comment>,
    },
}

#[derive(Serialize)]
struct ContentOnly<'a> {
    content: &'a str,
}

/// [`CommentApi`] over HTTP
///
/// New comments are always multipart. Edits go out as JSON unless files are
/// added or removed.
#[derive(Clone)]
pub struct HttpCommentApi {
    client: ApiClient,
}

impl HttpCommentApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CommentApi for HttpCommentApi {
    #[instrument(skip(self), fields(issue_id = %issue_id))]
    async fn list_for_issue(&self, issue_id: &IssueId) -> Result<Vec<Comment>> {
        let list: CommentList = self.client.get(&format!("/comments/issue/{issue_id}")).await?;
        Ok(match list {
            CommentList::Bare(comments) | CommentList::Enveloped { comments } => comments,
        })
    }

    #[instrument(skip(self, comment), fields(issue_id = %comment.issue_id, files = comment.attachments.len()))]
    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let form = new_comment_form(comment)?;
        let created: Option<Comment> = self.client.post_multipart("/comments", form).await?;
        Ok(created.unwrap_or_default())
    }

    #[instrument(skip(self, update), fields(comment_id = %id))]
    async fn update_comment(&self, id: &CommentId, update: &CommentUpdate) -> Result<Comment> {
        let path = format!("/comments/{id}");
        let response: Option<Comment> = if update.needs_multipart() {
            self.client.put_multipart(&path, comment_update_form(update)?).await?
        } else {
            self.client.put(&path, &ContentOnly { content: &update.content }).await?
        };
        Ok(response.unwrap_or_default())
    }

    #[instrument(skip(self), fields(comment_id = %id))]
    async fn delete_comment(&self, id: &CommentId) -> Result<()> {
        Ok(self.client.delete(&format!("/comments/{id}")).await?)
    }
}

fn new_comment_form(comment: &NewComment) -> Result<Form> {
    let mut form = Form::new()
        .text("issue_id", comment.issue_id.to_string())
        .text("content", comment.content.clone())
        .text("created_by", comment.created_by.clone());
    for file in &comment.attachments {
        form = form.part("attachments", file_part(file)?);
    }
    Ok(form)
}

fn comment_update_form(update: &CommentUpdate) -> Result<Form> {
    let mut form = Form::new().text("content", update.content.clone());
    for path in &update.remove_attachments {
        form = form.text("removeAttachments", path.clone());
    }
    for file in &update.attachments {
        form = form.part("attachments", file_part(file)?);
    }
    Ok(form)
}

fn file_part(file: &UploadFile) -> Result<Part> {
    let part = Part::bytes(file.bytes.clone()).file_name(file.filename.clone());
    match &file.content_type {
        Some(mime) => part.mime_str(mime).map_err(|e| {
            TicketboardError::InvalidInput(format!("Invalid content type for {}: {e}", file.filename))
        }),
        None => Ok(part),
    }
}
