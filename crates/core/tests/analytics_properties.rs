//! Invariants of the analytics and board engines over whole issue lists

mod support;

use support::fixtures::{daily, first_quarter, issue, raw, IssueExt};
use ticketboard_core::analytics::trends::growth_narrative;
use ticketboard_core::{
    aggregate_by_field, aggregate_by_time, apply, compare_categories, compare_growth, normalize,
    normalize_all, page_window, BoardEngine,
};
use ticketboard_domain::{
    CategoryField, FilterSpec, Granularity, GrowthDirection, IssueStatus, Locale, PageLink,
    PageSpec, RawIssue, SortDirection, SortField, SortSpec,
};

fn mixed() -> Vec<ticketboard_domain::Issue> {
    let mut issues = first_quarter();
    issues.push(issue(4, "not a date", "Pending"));
    issues.push(issue(5, "2024-11-30", "Escalated"));
    issues.push(issue(6, "", "In Progress"));
    issues
}

#[test]
fn status_counts_cover_every_issue() {
    let issues = mixed();
    let by_status = aggregate_by_field(&issues, CategoryField::Status);
    let sum: u64 = by_status.entries.iter().map(|e| e.count).sum();
    assert_eq!(sum, issues.len() as u64);
    assert_eq!(by_status.count("-"), 1);
}

#[test]
fn month_buckets_never_exceed_input() {
    let issues = mixed();
    let months = aggregate_by_time(&issues, Granularity::Month, 2025);
    assert!(months.bucketed() <= issues.len() as u64);
    assert_eq!(months.unbucketable, 2);
    assert_eq!(months.total, issues.len() as u64);

    let clean = first_quarter();
    let months = aggregate_by_time(&clean, Granularity::Month, 2025);
    assert_eq!(months.bucketed(), clean.len() as u64);
    assert_eq!(months.unbucketable, 0);
}

#[test]
fn cumulative_series_is_non_decreasing() {
    for granularity in [Granularity::Month, Granularity::Quarter, Granularity::Year] {
        let stats = aggregate_by_time(&mixed(), granularity, 2025);
        let cumulative = stats.cumulative();
        assert!(cumulative.windows(2).all(|pair| pair[0] <= pair[1]), "{granularity}");
        assert_eq!(cumulative.last().copied().unwrap_or(0), stats.bucketed());
    }
}

#[test]
fn year_buckets_are_ascending() {
    let stats = aggregate_by_time(&mixed(), Granularity::Year, 2025);
    assert_eq!(stats.labels(), vec!["2024".to_string(), "2025".to_string()]);
    assert_eq!(stats.counts(), vec![1, 3]);
}

#[test]
fn growth_edge_cases() {
    let from_zero = compare_growth(42.0, 0.0);
    assert!(from_zero.rate_percent.abs() < f64::EPSILON);
    assert_eq!(from_zero.direction, GrowthDirection::Flat);

    let up = compare_growth(150.0, 100.0);
    assert!((up.rate_percent - 50.0).abs() < f64::EPSILON);
    assert_eq!(up.direction, GrowthDirection::Up);

    let down = compare_growth(1.0, 3.0);
    assert!((down.rate_percent + 66.7).abs() < 1e-9);
    assert_eq!(down.direction, GrowthDirection::Down);

    assert!(compare_growth(f64::NAN, 1.0).rate_percent.abs() < f64::EPSILON);
}

#[test]
fn first_quarter_end_to_end() {
    let issues = first_quarter();

    let months = aggregate_by_time(&issues, Granularity::Month, 2025);
    assert_eq!(&months.counts()[..3], &[2, 0, 1]);
    assert_eq!(&months.cumulative()[..3], &[2, 2, 3]);
    assert_eq!(months.cumulative()[11], 3);

    let quarters = aggregate_by_time(&issues, Granularity::Quarter, 2025);
    assert_eq!(quarters.counts(), vec![3, 0, 0, 0]);
    assert_eq!(quarters.buckets[0].by_status.get(IssueStatus::Closed), 2);

    let by_status = aggregate_by_field(&issues, CategoryField::Status);
    assert!((by_status.share("Closed") - 66.7).abs() < f64::EPSILON);
    assert!((by_status.share("Pending") - 33.3).abs() < f64::EPSILON);
    assert!(by_status.share("In Progress").abs() < f64::EPSILON);
}

#[test]
fn category_growth_names_the_top_mover() {
    let current = vec![
        issue(1, "2025-01-01", "Pending").from_source("Email"),
        issue(2, "2025-01-02", "Pending").from_source("Email"),
        issue(3, "2025-01-03", "Pending").from_source("Email"),
        issue(4, "2025-01-04", "Pending").from_source("Phone"),
    ];
    let previous = vec![
        issue(5, "2024-01-01", "Pending").from_source("Email"),
        issue(6, "2024-01-02", "Pending").from_source("Email"),
        issue(7, "2024-01-03", "Pending").from_source("Phone"),
    ];
    let comparison = compare_categories(
        &aggregate_by_field(&current, CategoryField::Source),
        &aggregate_by_field(&previous, CategoryField::Source),
    );
    assert_eq!(comparison.top_mover.as_deref(), Some("Email"));
    let narrative = growth_narrative(&comparison, Locale::En);
    assert!(narrative.starts_with("Email grew the most"), "{narrative}");
}

#[test]
fn page_length_is_bounded_by_page_size() {
    for n in [0, 3, 10, 11, 25] {
        let issues = daily(n);
        let page = apply(&issues, &FilterSpec::default(), SortSpec::default(), PageSpec::default());
        assert_eq!(page.issues.len(), (n as usize).min(10));
        assert_eq!(page.total_pages, (n as usize).div_ceil(10));
    }
}

#[test]
fn page_past_the_end_is_empty() {
    let issues = daily(12);
    let page = apply(&issues, &FilterSpec::default(), SortSpec::default(), PageSpec::new(5, 10));
    assert!(page.issues.is_empty());
    assert_eq!(page.total_pages, 2);
}

#[test]
fn page_window_regression() {
    use PageLink::{Ellipsis, Page};
    assert_eq!(
        page_window(10, 20),
        vec![Page(1), Ellipsis, Page(8), Page(9), Page(10), Page(11), Page(12), Ellipsis, Page(20)]
    );
}

#[test]
fn filtering_is_idempotent() {
    let issues: Vec<_> = daily(30)
        .into_iter()
        .enumerate()
        .map(|(n, i)| if n % 4 == 0 { i.assigned("Mei").from_source("Phone") } else { i })
        .collect();
    let engine = BoardEngine::new();
    let filters = FilterSpec::default()
        .search("mei")
        .source("Phone")
        .between(chrono::NaiveDate::from_ymd_opt(2025, 1, 5), chrono::NaiveDate::from_ymd_opt(2025, 1, 25));

    let once = engine.filter(&issues, &filters);
    let twice = engine.filter(&once, &filters);
    assert!(!once.is_empty());
    assert_eq!(once, twice);
}

#[test]
fn search_covers_title_description_and_assignee() {
    let issues = vec![
        issue(1, "2025-01-01", "Pending").titled("Printer jam"),
        issue(2, "2025-01-02", "Pending").described("PRINTER offline"),
        issue(3, "2025-01-03", "Pending").assigned("printer team"),
        issue(4, "2025-01-04", "Pending").titled("VPN"),
    ];
    let matched = BoardEngine::new().filter(&issues, &FilterSpec::default().search("  Printer "));
    assert_eq!(matched.len(), 3);
}

#[test]
fn undated_issues_sort_last_both_ways() {
    let issues = vec![
        issue(1, "garbage", "Pending"),
        issue(2, "2025-01-02", "Pending"),
        issue(3, "2025-01-01", "Pending"),
    ];
    for direction in [SortDirection::Asc, SortDirection::Desc] {
        let page = apply(
            &issues,
            &FilterSpec::default(),
            SortSpec::new(SortField::CreatedAt, direction),
            PageSpec::default(),
        );
        assert_eq!(page.issues[2].id.as_str(), "1", "{direction}");
    }
}

#[test]
fn normalising_twice_changes_nothing() {
    let raws = vec![
        raw(1, "2025-01-05 09:00:00", " Closed "),
        raw(2, "1735689600", "處理中"),
        raw(3, "nonsense", "Unknown"),
        RawIssue::default(),
    ];
    for raw in raws {
        let once = normalize(raw);
        let twice = normalize(RawIssue::from(&once));
        assert_eq!(once, twice);
    }
}

#[test]
fn normalised_list_keeps_order() {
    let issues = normalize_all(vec![raw(3, "2025-01-01", "Pending"), raw(1, "2025-01-02", "Closed")]);
    let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "1"]);
}
