//! Plain-text rendering of command results
//!
//! Tables are drawn with `tabled`, which pads by display width so CJK labels
//! stay aligned; charts become horizontal bars scaled to the largest value in
//! the series.

use chrono_tz::Tz;
use tabled::builder::Builder;
use tabled::settings::Style;
use ticketboard_core::issues::HomeSnapshot;
use ticketboard_core::reports::{AnalyticsReport, AnnualReport, MonthlyDashboard, TrendReport};
use ticketboard_core::analytics::trends::growth_narrative;
use ticketboard_domain::constants::MONTH_LABELS;
use ticketboard_domain::{
    CategoryStats, Comment, GrowthResult, Issue, LabeledCounts, Locale, MonthlySummary,
    TimeBucketStats,
};

use crate::commands::BoardView;

const BAR_WIDTH: usize = 30;

/// Horizontal bar of `value` relative to `max`; non-zero values get at least one cell.
pub fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    let scaled = u128::from(value) * width as u128 / u128::from(max);
    let cells = usize::try_from(scaled).unwrap_or(width).clamp(1, width);
    "█".repeat(cells)
}

/// Render rows as left-aligned columns under `headers`.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| (*h).to_string()));
    for row in rows {
        builder.push_record(row.iter().cloned());
    }
    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}

fn created(issue: &Issue, tz: Tz) -> String {
    issue
        .created_at
        .as_datetime()
        .map_or_else(|| "-".to_string(), |at| at.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string())
}

fn issue_rows(issues: &[Issue], tz: Tz) -> Vec<Vec<String>> {
    issues
        .iter()
        .map(|issue| {
            vec![
                issue.id.to_string(),
                issue.title.clone(),
                issue.source.clone(),
                issue.issue_type.clone(),
                issue.status_label(),
                issue.priority.map_or_else(|| "-".to_string(), |p| p.to_string()),
                issue.assigned_to.clone().unwrap_or_else(|| "-".to_string()),
                created(issue, tz),
            ]
        })
        .collect()
}

const ISSUE_HEADERS: [&str; 8] =
    ["ID", "Customer", "Source", "Type", "Status", "Priority", "Assignee", "Created"];

pub fn issues(issues: &[Issue], tz: Tz) -> String {
    table(&ISSUE_HEADERS, &issue_rows(issues, tz))
}

pub fn home(snapshot: &HomeSnapshot, tz: Tz) -> String {
    let stats = &snapshot.stats;
    let cards = table(
        &["Total", "Pending", "In Progress", "Closed"],
        &[vec![
            stats.total_issues.to_string(),
            stats.pending_issues.to_string(),
            stats.in_progress_issues.to_string(),
            stats.closed_issues.to_string(),
        ]],
    );
    format!("{cards}\n\nRecent issues\n{}", issues(&snapshot.recent, tz))
}

pub fn board(view: &BoardView, tz: Tz) -> String {
    let board = &view.board;
    let links = view.links.iter().map(|link| match link {
        ticketboard_domain::PageLink::Page(n) if *n == board.page => format!("[{n}]"),
        other => other.to_string(),
    });
    format!(
        "{}\n\n{} matching issue(s), page {} of {}\n{}",
        issues(&board.issues, tz),
        board.total_matched,
        board.page,
        board.total_pages.max(1),
        links.collect::<Vec<_>>().join(" ")
    )
}

pub fn issue(issue: &Issue, tz: Tz) -> String {
    let mut lines = vec![
        format!("#{} {}", issue.id, issue.title),
        format!("Status:   {}", issue.status_label()),
        format!("Source:   {}", issue.source),
        format!("Type:     {}", issue.issue_type),
        format!("Created:  {}", created(issue, tz)),
    ];
    if let Some(priority) = issue.priority {
        lines.push(format!("Priority: {priority}"));
    }
    if let Some(assignee) = &issue.assigned_to {
        lines.push(format!("Assignee: {assignee}"));
    }
    if let Some(description) = issue.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(String::new());
        lines.push(description.to_string());
    }
    lines.join("\n")
}

pub fn comments(comments: &[Comment], tz: Tz) -> String {
    if comments.is_empty() {
        return "No comments yet.".to_string();
    }
    comments
        .iter()
        .map(|comment| {
            let at = comment
                .created_at
                .as_datetime()
                .map_or_else(|| "-".to_string(), |at| at.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string());
            let edited = if comment.edited { " (edited)" } else { "" };
            let mut block = format!("#{} {} @ {at}{edited}\n  {}", comment.id, comment.author(), comment.content);
            for attachment in &comment.attachments {
                block.push_str(&format!("\n  📎 {} ({})", attachment.filename, attachment.download_path()));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn counts_chart(title: &str, counts: &LabeledCounts) -> String {
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|c| vec![c.label.clone(), c.count.to_string(), bar(c.count, max, BAR_WIDTH)])
        .collect();
    format!("{title}\n{}", table(&["Label", "Count", ""], &rows))
}

pub fn monthly_summary(summary: &MonthlySummary) -> String {
    format!(
        "Issues: {}  Completed: {}  Uncompleted: {}\n\n{}\n\n{}",
        summary.issue_count,
        summary.completed,
        summary.uncompleted,
        counts_chart("By type", &summary.issue_types),
        counts_chart("By source", &summary.source_stats),
    )
}

pub fn monthly(dashboard: &MonthlyDashboard) -> String {
    let insights = &dashboard.insights;
    let top = |entry: &Option<ticketboard_domain::LabeledCount>| {
        entry.as_ref().map_or_else(|| "-".to_string(), |e| format!("{} ({})", e.label, e.count))
    };
    format!(
        "{:04}-{:02}\nCompletion rate: {}%  Top source: {}  Top type: {}\n\n{}",
        dashboard.year,
        dashboard.month,
        insights.completion_rate,
        top(&insights.top_source),
        top(&insights.top_issue_type),
        monthly_summary(&dashboard.summary)
    )
}

fn growth(result: &GrowthResult) -> String {
    format!("{} {:+.1}%", result.direction.arrow(), result.rate_percent)
}

pub fn annual(report: &AnnualReport) -> String {
    let summary = &report.summary;
    let max = summary.monthly_stats.iter().copied().max().unwrap_or(0);
    let mut lines = vec![format!(
        "{}: {} issues, {} completed, {} uncompleted",
        report.year, summary.total_issues, summary.completed, summary.uncompleted
    )];
    if let Some(err) = &report.comparison_error {
        lines.push(format!("Comparison year unavailable: {err}"));
    }

    let rows: Vec<Vec<String>> = match &report.comparison {
        Some(comparison) => {
            lines.push(format!(
                "vs {}: {} issues ({})",
                comparison.year,
                comparison.summary.total_issues,
                growth(&comparison.total)
            ));
            MONTH_LABELS
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    vec![
                        (*label).to_string(),
                        comparison.monthly.current.get(i).copied().unwrap_or(0).to_string(),
                        comparison.monthly.previous.get(i).copied().unwrap_or(0).to_string(),
                        comparison.monthly.growth.get(i).map(growth).unwrap_or_default(),
                    ]
                })
                .collect()
        }
        None => MONTH_LABELS
            .iter()
            .zip(summary.monthly_stats)
            .map(|(label, count)| vec![(*label).to_string(), count.to_string(), bar(count, max, BAR_WIDTH)])
            .collect(),
    };

    let headers = if report.comparison.is_some() {
        vec!["Month", "This year", "Compared", "Growth"]
    } else {
        vec!["Month", "Issues", ""]
    };
    lines.push(String::new());
    lines.push(table(&headers, &rows));
    lines.push(String::new());
    lines.push(counts_chart("By source", &summary.source_stats));
    lines.push(String::new());
    lines.push(counts_chart("By type", &summary.type_stats));
    lines.join("\n")
}

pub fn trend(report: &TrendReport) -> String {
    let max = report.trend.months.iter().map(|m| m.issue_count).max().unwrap_or(0);
    let rows: Vec<Vec<String>> = report
        .trend
        .months
        .iter()
        .map(|m| {
            let label = usize::try_from(m.month)
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| MONTH_LABELS.get(i))
                .map_or_else(|| m.month.to_string(), |l| (*l).to_string());
            vec![label, m.issue_count.to_string(), m.resolved_count().to_string(), bar(m.issue_count, max, BAR_WIDTH)]
        })
        .collect();
    format!(
        "{} trend ({}): {} issues, {:.1}% resolved\n\n{}",
        report.year,
        report.kind,
        report.total,
        report.resolution_rate,
        table(&["Month", "Issues", "Resolved", ""], &rows)
    )
}

fn buckets_chart(title: &str, stats: &TimeBucketStats) -> String {
    let max = stats.buckets.iter().map(|b| b.count).max().unwrap_or(0);
    let rows: Vec<Vec<String>> = stats
        .buckets
        .iter()
        .map(|b| {
            vec![
                b.label.clone(),
                b.count.to_string(),
                b.cumulative.to_string(),
                b.by_status.closed.to_string(),
                bar(b.count, max, BAR_WIDTH),
            ]
        })
        .collect();
    let mut text = format!("{title}\n{}", table(&["Period", "Issues", "Cumulative", "Closed", ""], &rows));
    if stats.unbucketable > 0 {
        text.push_str(&format!("\n({} issue(s) without a usable date)", stats.unbucketable));
    }
    text
}

fn category_chart(title: &str, stats: &CategoryStats) -> String {
    let max = stats.entries.iter().map(|e| e.count).max().unwrap_or(0);
    let rows: Vec<Vec<String>> = stats
        .entries
        .iter()
        .map(|e| vec![e.label.clone(), e.count.to_string(), format!("{:.1}%", e.share), bar(e.count, max, BAR_WIDTH)])
        .collect();
    format!("{title}\n{}", table(&["Label", "Count", "Share", ""], &rows))
}

pub fn analytics(report: &AnalyticsReport, locale: Locale) -> String {
    let overview = &report.overview;
    let latest = overview
        .latest_month
        .and_then(|m| usize::try_from(m).ok())
        .and_then(|m| m.checked_sub(1))
        .and_then(|i| MONTH_LABELS.get(i))
        .copied()
        .unwrap_or("-");
    let years = overview.years.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");

    let yoy_rows: Vec<Vec<String>> = report
        .year_over_year
        .iter()
        .map(|g| vec![g.label.clone(), g.previous.to_string(), g.current.to_string(), growth(&g.growth)])
        .collect();

    [
        format!(
            "{}: {} issues  Latest month: {latest} ({})  Closed: {}  Open: {}",
            overview.year, overview.year_total, overview.latest_month_total, overview.closed, overview.open
        ),
        format!("Years with data: {}", if years.is_empty() { "-".to_string() } else { years }),
        buckets_chart("Monthly", &report.monthly),
        buckets_chart("Quarterly", &report.quarterly),
        buckets_chart("Yearly", &report.yearly),
        format!("Year over year\n{}", table(&["Year", "Previous", "Current", "Growth"], &yoy_rows)),
        category_chart("By type", &report.by_type),
        category_chart("By source", &report.by_source),
        category_chart("By status", &report.by_status),
        format!("Type growth: {}", growth_narrative(&report.type_growth, locale)),
        format!("Source growth: {}", growth_narrative(&report.source_growth, locale)),
    ]
    .join("\n\n")
}
