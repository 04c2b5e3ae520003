//! Domain types and models
//!
//! - `issue` / `comment`: records exchanged with the REST backend
//! - `summary`: pre-aggregated payloads from the reporting endpoints
//! - `analytics`: derived view models, recomputed on every fetch
//! - `board`: filter, sort and page requests for the issue board

pub mod analytics;
pub mod board;
pub mod comment;
pub mod issue;
pub mod lenient;
pub mod summary;

pub use analytics::{
    AnalyticsOverview, CategoryComparison, CategoryEntry, CategoryField, CategoryGrowth,
    CategoryStats, Granularity, GrowthDirection, GrowthResult, MonthlyInsights, SeriesComparison,
    StatusBreakdown, TimeBucket, TimeBucketStats,
};
pub use board::{
    BoardPage, FilterSpec, PageLink, PageSpec, SortDirection, SortField, SortSpec, StatusFilter,
};
pub use comment::{Attachment, Comment, CommentId, CommentUpdate, NewComment, UploadFile};
pub use issue::{
    CreatedAt, Issue, IssueId, IssueStatus, IssueUpdate, NewIssue, Priority, RawIssue, RecordId,
    StatusChange,
};
pub use summary::{
    AnnualSummary, AnnualTrend, ExportFormat, IssueStats, LabeledCount, LabeledCounts,
    MonthTrendPoint, MonthlySummary, StoredMonthlySummary, TrendKind,
};
