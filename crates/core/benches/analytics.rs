use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ticketboard_core::{aggregate_by_field, aggregate_by_time, apply, normalize_all};
use ticketboard_domain::{
    CategoryField, FilterSpec, Granularity, Issue, IssueId, PageSpec, RawIssue, SortDirection,
    SortField, SortSpec,
};

const SOURCES: [&str; 4] = ["Email", "Phone", "Line chat", "Walk-in"];
const STATUSES: [&str; 3] = ["Pending", "In Progress", "Closed"];

fn sample_issues(count: u64) -> Vec<Issue> {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 8, 0, 0).single().unwrap();
    let raws = (0..count).map(|n| {
        let idx = usize::try_from(n).unwrap();
        RawIssue {
            id: Some(IssueId::from(n)),
            title: Some(format!("Customer {n}")),
            description: Some(format!("Ticket body {n}")),
            source: Some(SOURCES[idx % SOURCES.len()].to_string()),
            issue_type: Some(if n % 5 == 0 { "network" } else { "system" }.to_string()),
            status: Some(STATUSES[idx % STATUSES.len()].to_string()),
            created_at: Some((start + Duration::hours(i64::try_from(n).unwrap() * 7)).to_rfc3339()),
            ..RawIssue::default()
        }
    });
    normalize_all(raws)
}

fn bench_time_buckets(c: &mut Criterion) {
    let issues = sample_issues(5_000);
    c.bench_function("aggregate_by_time_month_5k", |b| {
        b.iter(|| aggregate_by_time(black_box(&issues), Granularity::Month, 2024));
    });
    c.bench_function("aggregate_by_time_year_5k", |b| {
        b.iter(|| aggregate_by_time(black_box(&issues), Granularity::Year, 2024));
    });
}

fn bench_categories(c: &mut Criterion) {
    let issues = sample_issues(5_000);
    c.bench_function("aggregate_by_source_5k", |b| {
        b.iter(|| aggregate_by_field(black_box(&issues), CategoryField::Source));
    });
}

fn bench_board(c: &mut Criterion) {
    let issues = sample_issues(5_000);
    let filters = FilterSpec::default().search("customer 4").source("Phone");
    let sort = SortSpec::new(SortField::Title, SortDirection::Asc);
    c.bench_function("board_search_sort_page_5k", |b| {
        b.iter(|| apply(black_box(&issues), &filters, sort, PageSpec::new(2, 10)));
    });
}

fn bench_normalize(c: &mut Criterion) {
    let raws: Vec<RawIssue> = sample_issues(5_000).iter().map(RawIssue::from).collect();
    c.bench_function("normalize_all_5k", |b| {
        b.iter(|| normalize_all(black_box(raws.clone())));
    });
}

criterion_group!(benches, bench_time_buckets, bench_categories, bench_board, bench_normalize);
criterion_main!(benches);
