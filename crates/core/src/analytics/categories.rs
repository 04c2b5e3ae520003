//! Categorical aggregation
//!
//! One generic grouping function parameterised by a field accessor. Labels
//! keep first-seen order (chart colours are assigned by position) and rare
//! labels are never folded into an "other" bucket.

use std::collections::HashMap;

use ticketboard_domain::{CategoryEntry, CategoryField, CategoryStats, Issue};

use super::{percent, round1};

/// Group `issues` by the label `accessor` returns.
pub fn aggregate_by<F>(issues: &[Issue], accessor: F) -> CategoryStats
where
    F: Fn(&Issue) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<CategoryEntry> = Vec::new();

    for issue in issues {
        let label = accessor(issue);
        match index.get(&label) {
            Some(&position) => entries[position].count += 1,
            None => {
                index.insert(label.clone(), entries.len());
                entries.push(CategoryEntry { label, count: 1, share: 0.0 });
            }
        }
    }

    let total = issues.len() as u64;
    for entry in &mut entries {
        entry.share = round1(percent(entry.count, total));
    }

    CategoryStats { total, entries }
}

/// Group `issues` by source, issue type or status label.
pub fn aggregate_by_field(issues: &[Issue], field: CategoryField) -> CategoryStats {
    aggregate_by(issues, |issue| category_label(issue, field))
}

/// Label of `issue` under `field`; issues without a status group under `-`.
pub fn category_label(issue: &Issue, field: CategoryField) -> String {
    match field {
        CategoryField::Source => issue.source.clone(),
        CategoryField::IssueType => issue.issue_type.clone(),
        CategoryField::Status => issue.status_label(),
    }
}
