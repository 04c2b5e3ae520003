//! Issue fixtures

use ticketboard_core::normalize;
use ticketboard_domain::{Issue, IssueId, RawIssue};

/// Raw record as the backend would send it.
pub fn raw(id: u64, created_at: &str, status: &str) -> RawIssue {
    RawIssue {
        id: Some(IssueId::from(id)),
        title: Some(format!("Customer {id}")),
        source: Some("Email".into()),
        issue_type: Some("system".into()),
        status: Some(status.into()),
        created_at: Some(created_at.into()),
        ..RawIssue::default()
    }
}

/// Normalised issue created at `created_at` with `status`.
pub fn issue(id: u64, created_at: &str, status: &str) -> Issue {
    normalize(raw(id, created_at, status))
}

/// Builder-style tweaks on a normalised issue.
pub trait IssueExt {
    fn titled(self, title: &str) -> Self;
    fn from_source(self, source: &str) -> Self;
    fn of_type(self, issue_type: &str) -> Self;
    fn assigned(self, who: &str) -> Self;
    fn described(self, text: &str) -> Self;
}

impl IssueExt for Issue {
    fn titled(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    fn from_source(mut self, source: &str) -> Self {
        self.source = source.into();
        self
    }

    fn of_type(mut self, issue_type: &str) -> Self {
        self.issue_type = issue_type.into();
        self
    }

    fn assigned(mut self, who: &str) -> Self {
        self.assigned_to = Some(who.into());
        self
    }

    fn described(mut self, text: &str) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// The three-issue quarter used across the analytics tests:
/// January twice (one closed), March once, plus one undated record.
pub fn first_quarter() -> Vec<Issue> {
    vec![
        issue(1, "2025-01-05T09:00:00Z", "Closed"),
        issue(2, "2025-01-20T12:30:00Z", "Pending"),
        issue(3, "2025-03-02", "Closed"),
    ]
}

/// `count` issues spread one per day from 2025-01-01, alternating status.
pub fn daily(count: u64) -> Vec<Issue> {
    (0..count)
        .map(|n| {
            let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
                .and_then(|d| d.checked_add_days(chrono::Days::new(n)))
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let status = match n % 3 {
                0 => "Pending",
                1 => "In Progress",
                _ => "Closed",
            };
            issue(n + 1, &date, status)
        })
        .collect()
}
