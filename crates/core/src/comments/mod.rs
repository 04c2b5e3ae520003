//! Comment threads: REST port and service

pub mod ports;
pub mod service;

pub use service::CommentService;
