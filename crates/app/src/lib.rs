//! # Ticketboard App
//!
//! Application layer - dashboard commands and the `ticketboard` binary.
//!
//! This crate contains:
//! - Dashboard commands (one per page interaction)
//! - Application context (dependency injection)
//! - Logging initialisation and the terminal renderer
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the REST adapters into the core services
//! - Every command returns `Result<T, String>` with a localized message

pub mod commands;
pub mod context;
pub mod render;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
