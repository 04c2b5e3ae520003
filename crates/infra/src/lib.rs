//! # Ticketboard Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The HTTP client and its retry policy
//! - REST adapters for issues, comments and summaries
//! - Monthly report export download
//! - Configuration loading (environment and JSON/TOML files)
//!
//! ## Architecture
//! - Implements traits defined in `ticketboard-core`
//! - Contains all "impure" code (network and filesystem I/O)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{
    ApiClient, ApiClientConfig, ApiError, HttpCommentApi, HttpIssueApi, HttpSummaryApi,
    ReportExporter,
};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
