//! Application state store
//!
//! One slice per feature area (issues, comments, summaries), each with an
//! explicit action enum and a reducer. Reducers never perform I/O: callers
//! run the request, then dispatch its outcome with the token they were
//! issued. Responses carrying a stale token are dropped, so a slow request
//! cannot overwrite fresher state in the same slot.

pub mod comments;
pub mod issues;
pub mod request;
pub mod summaries;

pub use comments::{CommentsAction, CommentsState};
pub use issues::{IssuesAction, IssuesState};
pub use request::{RequestToken, RequestTracker};
pub use summaries::{SummariesAction, SummariesState, SummarySlot};
