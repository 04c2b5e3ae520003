//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Display labels substituted during normalisation
pub const UNCATEGORIZED_LABEL: &str = "uncategorized";
pub const UNKNOWN_SOURCE_LABEL: &str = "unknown";
pub const MISSING_STATUS_LABEL: &str = "-";

// API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_BASE_BACKOFF_MS: u64 = 200;
pub const UPLOADS_PREFIX: &str = "/uploads/";

// Create-form defaults
pub const DEFAULT_NEW_ISSUE_SOURCE: &str = "Line chat";
pub const DEFAULT_NEW_ISSUE_TYPE: &str = "system";

// Board defaults
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_WINDOW_SIZE: usize = 5;
pub const RECENT_ISSUES_LIMIT: usize = 5;

// Chart labels, calendar order
pub const MONTH_LABELS: [&str; 12] =
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
pub const QUARTER_LABELS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];
