//! Filter, sort and slice the working issue list into board pages
//!
//! Filters are AND-combined and empty filters are no-ops. Date bounds are
//! inclusive calendar dates in the engine's timezone; while either bound is
//! set, issues with an invalid `created_at` are excluded. Sorting is stable
//! and always puts invalid dates last. Pages past the end come back empty
//! rather than being clamped.

use std::cmp::Ordering;

use chrono_tz::Tz;
use ticketboard_domain::{
    BoardPage, FilterSpec, Issue, PageSpec, SortDirection, SortField, SortSpec,
};

/// Board engine bound to a reporting timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardEngine {
    tz: Tz,
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self { tz: Tz::UTC }
    }
}

impl BoardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timezone(tz: Tz) -> Self {
        Self { tz }
    }

    /// Filter, sort, then cut out the requested page.
    pub fn apply(
        &self,
        issues: &[Issue],
        filters: &FilterSpec,
        sort: SortSpec,
        page: PageSpec,
    ) -> BoardPage {
        let mut matched = self.filter(issues, filters);
        sort_issues(&mut matched, sort);

        let total_matched = matched.len();
        let page_size = page.effective_size();
        let total_pages = total_matched.div_ceil(page_size);
        let issues = matched.into_iter().skip(page.offset()).take(page_size).collect();

        BoardPage { issues, total_matched, total_pages, page: page.effective_page(), page_size }
    }

    /// Issues matching every active filter, in input order.
    pub fn filter(&self, issues: &[Issue], filters: &FilterSpec) -> Vec<Issue> {
        let needle = filters.search.trim().to_lowercase();
        issues.iter().filter(|issue| self.matches(issue, filters, &needle)).cloned().collect()
    }

    fn matches(&self, issue: &Issue, filters: &FilterSpec, needle: &str) -> bool {
        if !filters.status.matches(issue.status) {
            return false;
        }
        if !equals_filter(filters.source.as_deref(), &issue.source) {
            return false;
        }
        if !equals_filter(filters.issue_type.as_deref(), &issue.issue_type) {
            return false;
        }
        if filters.has_date_range() {
            let Some(date) =
                issue.created_at.as_datetime().map(|dt| dt.with_timezone(&self.tz).date_naive())
            else {
                return false;
            };
            if filters.date_from.is_some_and(|from| date < from)
                || filters.date_to.is_some_and(|to| date > to)
            {
                return false;
            }
        }
        needle.is_empty() || search_matches(issue, needle)
    }
}

/// Board page in UTC. See [`BoardEngine::apply`].
pub fn apply(issues: &[Issue], filters: &FilterSpec, sort: SortSpec, page: PageSpec) -> BoardPage {
    BoardEngine::default().apply(issues, filters, sort, page)
}

/// Stable sort; invalid dates and missing statuses go last in either direction.
pub fn sort_issues(issues: &mut [Issue], sort: SortSpec) {
    issues.sort_by(|a, b| compare(a, b, sort));
}

fn compare(a: &Issue, b: &Issue, sort: SortSpec) -> Ordering {
    let directed = |ordering: Ordering| match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };
    match sort.field {
        SortField::CreatedAt => {
            missing_last(a.created_at.as_datetime(), b.created_at.as_datetime(), directed)
        }
        SortField::Status => missing_last(a.status, b.status, directed),
        SortField::Title => directed(fold(&a.title).cmp(&fold(&b.title))),
        SortField::Source => directed(fold(&a.source).cmp(&fold(&b.source))),
        SortField::IssueType => directed(fold(&a.issue_type).cmp(&fold(&b.issue_type))),
    }
}

fn missing_last<T: Ord>(a: Option<T>, b: Option<T>, directed: impl Fn(Ordering) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn fold(text: &str) -> String {
    text.to_lowercase()
}

fn equals_filter(wanted: Option<&str>, actual: &str) -> bool {
    match wanted.map(str::trim).filter(|w| !w.is_empty()) {
        Some(wanted) => wanted == actual,
        None => true,
    }
}

fn search_matches(issue: &Issue, needle: &str) -> bool {
    [Some(issue.title.as_str()), issue.description.as_deref(), issue.assigned_to.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}
