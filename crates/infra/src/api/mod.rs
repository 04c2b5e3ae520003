//! REST adapters for the ticketboard backend
//!
//! Every adapter shares one [`ApiClient`] and implements a port from
//! `ticketboard-core`. All requests go through the configured base URL.

pub mod client;
pub mod comments;
pub mod errors;
pub mod export;
pub mod issues;
pub mod summaries;

pub use client::{ApiClient, ApiClientConfig};
pub use comments::HttpCommentApi;
pub use errors::{ApiError, ApiErrorCategory};
pub use export::ReportExporter;
pub use issues::HttpIssueApi;
pub use summaries::HttpSummaryApi;
