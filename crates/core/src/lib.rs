//! # Ticketboard Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The analytics engine (normaliser, time buckets, categories, growth)
//! - The board engine (filter, sort, paginate, page window)
//! - Port interfaces (traits) for the REST backend
//! - Services orchestrating ports and analytics
//! - The feature-sliced application state store
//!
//! ## Architecture Principles
//! - Only depends on `ticketboard-domain`
//! - No HTTP or filesystem code
//! - All external dependencies via traits
//! - Aggregation is synchronous and side-effect free

pub mod analytics;
pub mod board;
pub mod comments;
pub mod issues;
pub mod reports;
pub mod store;

// Re-export specific items to avoid ambiguity
pub use analytics::categories::{aggregate_by, aggregate_by_field};
pub use analytics::normalizer::{normalize, normalize_all};
pub use analytics::time_buckets::{aggregate_by_time, TimeBucketAggregator};
pub use analytics::trends::{compare_categories, compare_growth, compare_series, year_over_year};
pub use board::{apply, page_window, BoardEngine};
pub use comments::ports::CommentApi;
pub use comments::CommentService;
pub use issues::ports::IssueApi;
pub use issues::IssueService;
pub use reports::ports::SummaryApi;
pub use reports::ReportService;
