//! # Ticketboard Domain
//!
//! Business domain types and models for Ticketboard.
//!
//! This crate contains:
//! - Issue, comment and attachment records (wire and normalised shapes)
//! - Summary payloads returned by the reporting endpoints
//! - Derived view models produced by the analytics engine
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Ticketboard crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
