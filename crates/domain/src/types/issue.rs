//! Issue records
//!
//! `RawIssue` is the wire shape: every field may be missing, null, or of the
//! wrong JSON type. `Issue` is the canonical shape produced by the
//! normaliser in `ticketboard-core` and consumed by every view.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::lenient;
use crate::constants::{
    DEFAULT_NEW_ISSUE_SOURCE, DEFAULT_NEW_ISSUE_TYPE, MISSING_STATUS_LABEL,
};
use crate::errors::{Result, TicketboardError};
use crate::impl_domain_status_conversions;

/* -------------------------------------------------------------------------- */
/* Identifiers */
/* -------------------------------------------------------------------------- */

/// Opaque identifier assigned by the backend.
///
/// The backend emits numeric ids, but nothing on the client relies on that,
/// so both JSON numbers and strings are accepted and kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

/// Identifier of an [`Issue`]
pub type IssueId = RecordId;

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Self(s),
            Repr::Signed(n) => Self(n.to_string()),
            Repr::Unsigned(n) => Self(n.to_string()),
        })
    }
}

/* -------------------------------------------------------------------------- */
/* Status & Priority */
/* -------------------------------------------------------------------------- */

/// Closed three-state lifecycle. Any state may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueStatus {
    Pending,
    InProgress,
    Closed,
}

impl_domain_status_conversions!(IssueStatus {
    Pending => "Pending" | "待處理",
    InProgress => "In Progress" | "in_progress" | "inprogress" | "in-progress" | "處理中",
    Closed => "Closed" | "已關閉" | "已完成",
});

impl IssueStatus {
    /// All statuses in lifecycle order
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Closed];

    /// Pending and In Progress count as open work.
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Cosmetic priority, captured and displayed only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl_domain_status_conversions!(Priority {
    High => "High" | "高",
    Medium => "Medium" | "med" | "中",
    Low => "Low" | "低",
});

/* -------------------------------------------------------------------------- */
/* Creation timestamp */
/* -------------------------------------------------------------------------- */

/// Parsed `created_at`, or the "invalid date" sentinel.
///
/// The sentinel keeps the original text so an invalid record survives a
/// serialise/normalise round trip unchanged. Invalid dates are excluded from
/// calendar buckets but still counted in totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatedAt {
    Valid(DateTime<Utc>),
    Invalid { raw: Option<String> },
}

impl Default for CreatedAt {
    fn default() -> Self {
        Self::Invalid { raw: None }
    }
}

impl CreatedAt {
    /// Parse a backend timestamp. Never fails.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::Invalid { raw: None };
        };
        parse_timestamp(text)
            .map_or_else(|| Self::Invalid { raw: Some(text.to_string()) }, Self::Valid)
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(dt) => Some(*dt),
            Self::Invalid { .. } => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Text written back to the wire (RFC 3339 for valid timestamps).
    pub fn to_wire(&self) -> Option<String> {
        match self {
            Self::Valid(dt) => Some(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Invalid { raw } => raw.clone(),
        }
    }
}

impl Serialize for CreatedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.to_wire() {
            Some(text) => serializer.serialize_str(&text),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for CreatedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = lenient::string(deserializer)?;
        Ok(Self::parse(raw.as_deref()))
    }
}

/// Parse the timestamp shapes the backend and the create form produce.
///
/// Accepted: RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]`, `YYYY-MM-DDTHH:MM:SS[.f]`,
/// `YYYY-MM-DD`, and epoch seconds/milliseconds. Zone-less values are UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    if text.len() >= 10 && text.bytes().all(|b| b.is_ascii_digit()) {
        let value: i64 = text.parse().ok()?;
        return if text.len() >= 13 {
            Utc.timestamp_millis_opt(value).single()
        } else {
            Utc.timestamp_opt(value, 0).single()
        };
    }
    None
}

/// Parse a calendar date, accepting full timestamps as well.
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(text).map(|dt| dt.date_naive()))
}

/* -------------------------------------------------------------------------- */
/* Wire & canonical records */
/* -------------------------------------------------------------------------- */

/// Issue exactly as the list/detail endpoints return it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawIssue {
    pub id: Option<IssueId>,
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub source: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub issue_type: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub priority: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub assigned_to: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub warranty_end_date: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub estimated_hours: Option<f64>,
}

/// Canonical issue record
///
/// `title` doubles as the customer name on the create form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source: String,
    pub issue_type: String,
    /// `None` when the backend sent no (or an unrecognised) status
    #[serde(default)]
    pub status: Option<IssueStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub created_at: CreatedAt,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
}

impl Issue {
    /// Status as displayed; `-` when missing.
    pub fn status_label(&self) -> String {
        self.status.map_or_else(|| MISSING_STATUS_LABEL.to_string(), |s| s.to_string())
    }

    /// Pending or In Progress. Issues without a status are not counted.
    pub fn is_open(&self) -> bool {
        self.status.is_some_and(IssueStatus::is_open)
    }
}

impl From<&Issue> for RawIssue {
    fn from(issue: &Issue) -> Self {
        Self {
            id: Some(issue.id.clone()),
            title: Some(issue.title.clone()),
            description: issue.description.clone(),
            source: Some(issue.source.clone()),
            issue_type: Some(issue.issue_type.clone()),
            status: issue.status.map(|s| s.to_string()),
            priority: issue.priority.map(|p| p.to_string()),
            assigned_to: issue.assigned_to.clone(),
            created_at: issue.created_at.to_wire(),
            warranty_end_date: issue.warranty_end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            estimated_hours: issue.estimated_hours,
        }
    }
}

impl From<Issue> for RawIssue {
    fn from(issue: Issue) -> Self {
        Self::from(&issue)
    }
}

/* -------------------------------------------------------------------------- */
/* Mutations */
/* -------------------------------------------------------------------------- */

/// Body of `POST /issues`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source: String,
    pub issue_type: String,
    pub status: IssueStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// Left to the backend when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
}

impl NewIssue {
    /// A new issue with the create form's defaults.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            source: DEFAULT_NEW_ISSUE_SOURCE.to_string(),
            issue_type: DEFAULT_NEW_ISSUE_TYPE.to_string(),
            status: IssueStatus::Pending,
            priority: Some(Priority::Medium),
            assigned_to: None,
            created_at: None,
            warranty_end_date: None,
            estimated_hours: None,
        }
    }

    /// Client-side checks performed before any request is sent.
    ///
    /// # Errors
    /// `TicketboardError::InvalidInput` when the title (customer name) is
    /// blank or the estimate is negative.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(TicketboardError::InvalidInput("Customer name (title) is required".into()));
        }
        validate_hours(self.estimated_hours)
    }
}

/// Partial update body of `PUT /issues/:id`; only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
}

impl IssueUpdate {
    /// The five fields offered by the quick-edit form.
    pub fn quick_edit(
        title: impl Into<String>,
        description: Option<String>,
        source: impl Into<String>,
        issue_type: impl Into<String>,
        status: IssueStatus,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description,
            source: Some(source.into()),
            issue_type: Some(issue_type.into()),
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// # Errors
    /// `TicketboardError::InvalidInput` for an empty update, a blank title,
    /// or a negative estimate.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(TicketboardError::InvalidInput("Nothing to update".into()));
        }
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(TicketboardError::InvalidInput("Title must not be empty".into()));
        }
        validate_hours(self.estimated_hours)
    }

    /// Apply the present fields to a local copy of `issue`.
    pub fn apply_to(&self, issue: &Issue) -> Issue {
        let mut updated = issue.clone();
        if let Some(title) = &self.title {
            updated.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            updated.description = Some(description.clone());
        }
        if let Some(source) = &self.source {
            updated.source.clone_from(source);
        }
        if let Some(issue_type) = &self.issue_type {
            updated.issue_type.clone_from(issue_type);
        }
        if let Some(status) = self.status {
            updated.status = Some(status);
        }
        if let Some(priority) = self.priority {
            updated.priority = Some(priority);
        }
        if let Some(assigned_to) = &self.assigned_to {
            updated.assigned_to = Some(assigned_to.clone());
        }
        if let Some(date) = self.warranty_end_date {
            updated.warranty_end_date = Some(date);
        }
        if let Some(hours) = self.estimated_hours {
            updated.estimated_hours = Some(hours);
        }
        updated
    }
}

/// Body of `PUT /issues/:id/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: IssueStatus,
}

fn validate_hours(hours: Option<f64>) -> Result<()> {
    match hours {
        Some(h) if !h.is_finite() || h < 0.0 => Err(TicketboardError::InvalidInput(
            "Estimated hours must be a non-negative number".into(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn record_id_accepts_numbers_and_strings() {
        let numeric: RecordId = serde_json::from_str("42").unwrap();
        let text: RecordId = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(numeric.as_str(), "42");
        assert_eq!(text.as_str(), "abc-1");
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "\"42\"");
    }

    #[test]
    fn status_parses_display_and_aliases() {
        assert_eq!("In Progress".parse::<IssueStatus>(), Ok(IssueStatus::InProgress));
        assert_eq!("in_progress".parse::<IssueStatus>(), Ok(IssueStatus::InProgress));
        assert_eq!("closed".parse::<IssueStatus>(), Ok(IssueStatus::Closed));
        assert!("Archived".parse::<IssueStatus>().is_err());
        assert_eq!(serde_json::to_string(&IssueStatus::InProgress).unwrap(), "\"In Progress\"");
    }

    #[test]
    fn priority_accepts_form_values() {
        assert_eq!("中".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
    }

    #[test]
    fn created_at_parses_supported_shapes() {
        let rfc = CreatedAt::parse(Some("2025-01-15T08:30:00.000Z"));
        let spaced = CreatedAt::parse(Some("2025-01-15 08:30:00"));
        let date_only = CreatedAt::parse(Some("2025-01-15"));
        let millis = CreatedAt::parse(Some("1736929800000"));

        assert_eq!(rfc, spaced);
        assert_eq!(rfc, millis);
        let midnight = date_only.as_datetime().unwrap();
        assert_eq!((midnight.year(), midnight.month(), midnight.day()), (2025, 1, 15));
        assert_eq!(midnight.hour(), 0);
    }

    #[test]
    fn created_at_keeps_invalid_text() {
        let invalid = CreatedAt::parse(Some("not a date"));
        assert_eq!(invalid, CreatedAt::Invalid { raw: Some("not a date".into()) });
        assert_eq!(invalid.to_wire().as_deref(), Some("not a date"));
        assert_eq!(CreatedAt::parse(Some("   ")), CreatedAt::Invalid { raw: None });
        assert_eq!(CreatedAt::parse(None), CreatedAt::default());
    }

    #[test]
    fn created_at_wire_round_trip() {
        let parsed = CreatedAt::parse(Some("2025-03-01T12:00:00+08:00"));
        let again = CreatedAt::parse(parsed.to_wire().as_deref());
        assert_eq!(parsed, again);
    }

    #[test]
    fn raw_issue_tolerates_loose_payload() {
        let raw: RawIssue = serde_json::from_str(
            r#"{"id": 7, "title": "ACME", "status": null, "estimated_hours": "", "priority": "高"}"#,
        )
        .unwrap();
        assert_eq!(raw.id, Some(RecordId::from("7")));
        assert_eq!(raw.title.as_deref(), Some("ACME"));
        assert_eq!(raw.status, None);
        assert_eq!(raw.estimated_hours, None);
        assert_eq!(raw.source, None);
    }

    #[test]
    fn new_issue_requires_title() {
        assert!(NewIssue::new("  ").validate().is_err());
        assert!(NewIssue::new("ACME Corp").validate().is_ok());

        let mut negative = NewIssue::new("ACME Corp");
        negative.estimated_hours = Some(-1.0);
        assert!(negative.validate().is_err());
    }

    #[test]
    fn new_issue_omits_absent_fields() {
        let json = serde_json::to_value(NewIssue::new("ACME")).unwrap();
        assert_eq!(json["status"], "Pending");
        assert!(json.get("created_at").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn issue_update_validation_and_patch() {
        assert!(IssueUpdate::default().validate().is_err());

        let blank_title = IssueUpdate { title: Some(String::new()), ..IssueUpdate::default() };
        assert!(blank_title.validate().is_err());

        let issue = Issue {
            id: RecordId::from("1"),
            title: "Old".into(),
            description: None,
            source: "Email".into(),
            issue_type: "network".into(),
            status: Some(IssueStatus::Pending),
            priority: None,
            assigned_to: None,
            created_at: CreatedAt::default(),
            warranty_end_date: None,
            estimated_hours: None,
        };
        let update = IssueUpdate { status: Some(IssueStatus::Closed), ..IssueUpdate::default() };
        let patched = update.apply_to(&issue);
        assert_eq!(patched.status, Some(IssueStatus::Closed));
        assert_eq!(patched.title, "Old");

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"status": "Closed"}));
    }
}
