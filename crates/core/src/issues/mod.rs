//! Issue records: REST port and service

pub mod ports;
pub mod service;

pub use service::{HomeSnapshot, IssueService};
