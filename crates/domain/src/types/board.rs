//! Issue board requests: filter, sort and page

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use super::issue::{Issue, IssueStatus};
use crate::constants::DEFAULT_PAGE_SIZE;
use crate::impl_domain_status_conversions;

/// Status filter of the board; `All` disables it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<IssueStatus>", into = "Option<IssueStatus>")]
pub enum StatusFilter {
    #[default]
    All,
    Only(IssueStatus),
}

impl StatusFilter {
    pub fn matches(self, status: Option<IssueStatus>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == Some(wanted),
        }
    }
}

impl From<Option<IssueStatus>> for StatusFilter {
    fn from(status: Option<IssueStatus>) -> Self {
        status.map_or(Self::All, Self::Only)
    }
}

impl From<StatusFilter> for Option<IssueStatus> {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

/// AND-combined board filters; empty fields are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Case-insensitive substring of title (customer), description or assignee
    pub search: String,
    pub status: StatusFilter,
    /// Inclusive lower bound on the creation date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the creation date
    pub date_to: Option<NaiveDate>,
    pub source: Option<String>,
    pub issue_type: Option<String>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.status == StatusFilter::All
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.source.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.issue_type.as_deref().map_or(true, |t| t.trim().is_empty())
    }

    pub fn has_date_range(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    #[must_use]
    pub fn status(mut self, status: IssueStatus) -> Self {
        self.status = StatusFilter::Only(status);
        self
    }

    #[must_use]
    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = Some(issue_type.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    #[default]
    CreatedAt,
    Title,
    Status,
    Source,
    IssueType,
}

impl_domain_status_conversions!(SortField {
    CreatedAt => "created_at" | "created" | "date",
    Title => "title",
    Status => "status",
    Source => "source",
    IssueType => "issue_type" | "type",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl_domain_status_conversions!(SortDirection {
    Asc => "asc" | "ascending",
    Desc => "desc" | "descending",
});

/// Defaults to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSpec {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self { page: 1, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl PageSpec {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    /// Page number with 0 read as 1
    pub fn effective_page(&self) -> usize {
        self.page.max(1)
    }

    /// Page size with 0 read as 1
    pub fn effective_size(&self) -> usize {
        self.page_size.max(1)
    }

    pub fn offset(&self) -> usize {
        (self.effective_page() - 1).saturating_mul(self.effective_size())
    }
}

/// One page of the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardPage {
    pub issues: Vec<Issue>,
    pub total_matched: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Entry of the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::Ellipsis => f.write_str("..."),
        }
    }
}

impl Serialize for PageLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Page(n) => serializer.serialize_u64(u64::try_from(*n).unwrap_or(u64::MAX)),
            Self::Ellipsis => serializer.serialize_str("..."),
        }
    }
}
