//! Issue record normaliser
//!
//! Coerces a wire record into the canonical [`Issue`] shape:
//! `issue_type` defaults to `uncategorized`, `source` to `unknown`, the status
//! is left absent when missing, and `created_at` becomes the invalid-date
//! sentinel instead of failing. `normalize(RawIssue::from(normalize(x)))`
//! equals `normalize(x)`.

use ticketboard_domain::constants::{UNCATEGORIZED_LABEL, UNKNOWN_SOURCE_LABEL};
use ticketboard_domain::types::issue::parse_calendar_date;
use ticketboard_domain::{CreatedAt, Issue, IssueId, IssueStatus, Priority, RawIssue};
use tracing::{debug, warn};

/// Normalise one wire record.
pub fn normalize(raw: RawIssue) -> Issue {
    let id = match raw.id {
        Some(id) if !id.is_empty() => id,
        _ => {
            warn!(title = raw.title.as_deref().unwrap_or_default(), "Issue record without id");
            IssueId::default()
        }
    };

    let status = parse_status(&id, raw.status.as_deref());
    let created_at = CreatedAt::parse(raw.created_at.as_deref());
    if let CreatedAt::Invalid { raw: Some(text) } = &created_at {
        warn!(issue_id = %id, created_at = %text, "Unparsable created_at; issue is unbucketable");
    }

    let priority = non_blank(raw.priority).and_then(|text| match text.parse::<Priority>() {
        Ok(priority) => Some(priority),
        Err(err) => {
            debug!(issue_id = %id, error = %err, "Ignoring unknown priority");
            None
        }
    });

    Issue {
        title: raw.title.unwrap_or_default(),
        description: non_blank(raw.description),
        source: non_blank(raw.source).unwrap_or_else(|| UNKNOWN_SOURCE_LABEL.to_string()),
        issue_type: non_blank(raw.issue_type).unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string()),
        status,
        priority,
        assigned_to: non_blank(raw.assigned_to),
        created_at,
        warranty_end_date: raw.warranty_end_date.as_deref().and_then(parse_calendar_date),
        estimated_hours: raw.estimated_hours.filter(|h| h.is_finite()),
        id,
    }
}

/// Normalise a whole list, keeping input order.
pub fn normalize_all<I>(raws: I) -> Vec<Issue>
where
    I: IntoIterator<Item = RawIssue>,
{
    raws.into_iter().map(normalize).collect()
}

fn parse_status(id: &IssueId, raw: Option<&str>) -> Option<IssueStatus> {
    let text = raw.map(str::trim).filter(|t| !t.is_empty())?;
    match text.parse::<IssueStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            warn!(issue_id = %id, status = text, "Unrecognised issue status");
            None
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
