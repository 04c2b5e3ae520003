//! Comment threads and attachments

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::issue::{CreatedAt, IssueId, RecordId};
use super::lenient;
use crate::constants::UPLOADS_PREFIX;
use crate::errors::{Result, TicketboardError};

/// Identifier of a [`Comment`]
pub type CommentId = RecordId;

/// Author shown when a comment has no `created_by`
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Author sent with new comments
pub const DEFAULT_COMMENT_AUTHOR: &str = "User";

/// A file stored by the backend and linked from a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, deserialize_with = "lenient::text")]
    pub filename: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub path: String,
}

impl Attachment {
    /// Server-relative download path (`/uploads/:path`).
    pub fn download_path(&self) -> String {
        format!("{UPLOADS_PREFIX}{}", self.path.trim_start_matches('/'))
    }
}

/// Note threaded under exactly one issue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub id: CommentId,
    pub issue_id: Option<IssueId>,
    #[serde(deserialize_with = "lenient::text")]
    pub content: String,
    #[serde(deserialize_with = "lenient::string")]
    pub created_by: Option<String>,
    pub created_at: CreatedAt,
    #[serde(deserialize_with = "lenient::flag")]
    pub edited: bool,
    #[serde(deserialize_with = "attachments")]
    pub attachments: Vec<Attachment>,
}

impl Comment {
    pub fn author(&self) -> &str {
        self.created_by.as_deref().filter(|a| !a.trim().is_empty()).unwrap_or(ANONYMOUS_AUTHOR)
    }

    /// Overlay a server response on this comment.
    ///
    /// A response without an id is an acknowledgement rather than a record,
    /// so the local copy is kept as is.
    #[must_use]
    pub fn merge(&self, response: &Self) -> Self {
        if response.id.is_empty() {
            return self.clone();
        }
        Self {
            id: self.id.clone(),
            issue_id: response.issue_id.clone().or_else(|| self.issue_id.clone()),
            content: if response.content.is_empty() {
                self.content.clone()
            } else {
                response.content.clone()
            },
            created_by: response.created_by.clone().or_else(|| self.created_by.clone()),
            created_at: if response.created_at.is_valid() {
                response.created_at.clone()
            } else {
                self.created_at.clone()
            },
            edited: response.edited || self.edited,
            attachments: response.attachments.clone(),
        }
    }
}

/// Attachments arrive as an array, as a JSON-encoded array string, or null.
fn attachments<'de, D>(deserializer: D) -> std::result::Result<Vec<Attachment>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let list = match value {
        Some(Value::String(text)) if !text.trim().is_empty() => {
            serde_json::from_str::<Value>(&text).unwrap_or(Value::Null)
        }
        Some(list @ Value::Array(_)) => list,
        _ => Value::Null,
    };
    Ok(match list {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<Attachment>(item).ok())
            .filter(|a| !a.path.is_empty())
            .collect(),
        _ => Vec::new(),
    })
}

/// In-memory file queued for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { filename: filename.into(), content_type: None, bytes }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Multipart body of `POST /comments`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub issue_id: IssueId,
    pub content: String,
    pub created_by: String,
    pub attachments: Vec<UploadFile>,
}

impl NewComment {
    pub fn new(issue_id: IssueId, content: impl Into<String>) -> Self {
        Self {
            issue_id,
            content: content.into(),
            created_by: DEFAULT_COMMENT_AUTHOR.to_string(),
            attachments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attachment(mut self, file: UploadFile) -> Self {
        self.attachments.push(file);
        self
    }

    /// # Errors
    /// `TicketboardError::InvalidInput` for blank content or a missing issue id.
    pub fn validate(&self) -> Result<()> {
        if self.issue_id.is_empty() {
            return Err(TicketboardError::InvalidInput("Comment must belong to an issue".into()));
        }
        validate_content(&self.content)
    }
}

/// Body of `PUT /comments/:id`
///
/// Sent as JSON when only the content changes, as multipart when files are
/// added or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentUpdate {
    pub content: String,
    /// Paths of existing attachments to delete
    pub remove_attachments: Vec<String>,
    pub attachments: Vec<UploadFile>,
}

impl CommentUpdate {
    pub fn content(content: impl Into<String>) -> Self {
        Self { content: content.into(), remove_attachments: Vec::new(), attachments: Vec::new() }
    }

    #[must_use]
    pub fn remove(mut self, path: impl Into<String>) -> Self {
        self.remove_attachments.push(path.into());
        self
    }

    #[must_use]
    pub fn with_attachment(mut self, file: UploadFile) -> Self {
        self.attachments.push(file);
        self
    }

    pub fn needs_multipart(&self) -> bool {
        !self.remove_attachments.is_empty() || !self.attachments.is_empty()
    }

    /// # Errors
    /// `TicketboardError::InvalidInput` for blank content.
    pub fn validate(&self) -> Result<()> {
        validate_content(&self.content)
    }

    /// Local view of `comment` once this update has been accepted.
    pub fn apply_to(&self, comment: &Comment) -> Comment {
        let mut updated = comment.clone();
        if updated.content != self.content {
            updated.content.clone_from(&self.content);
            updated.edited = true;
        }
        updated.attachments.retain(|a| !self.remove_attachments.contains(&a.path));
        updated
    }
}

fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(TicketboardError::InvalidInput("Comment content must not be empty".into()));
    }
    Ok(())
}
