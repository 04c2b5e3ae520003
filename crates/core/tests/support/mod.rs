//! Shared test helpers for `ticketboard-core` integration tests.
//!
//! Fixtures build raw and normalised issues in a few lines; the mock ports
//! record calls and serve canned responses so service tests can focus on
//! behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod ports;
