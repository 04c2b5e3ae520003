//! HTTP transport with the retry policy shared by every REST adapter

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
