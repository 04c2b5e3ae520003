//! Growth and period comparison
//!
//! A previous value of zero yields a 0% rate rather than an infinite spike,
//! so categories appearing for the first time never dominate the narrative.

use std::cmp::Ordering;

use ticketboard_domain::constants::MONTH_LABELS;
use ticketboard_domain::{
    CategoryComparison, CategoryGrowth, CategoryStats, GrowthDirection, GrowthResult, Locale,
    SeriesComparison, TimeBucketStats,
};

use super::round1;

/// Percentage change from `previous` to `current`, rounded to one decimal.
pub fn compare_growth(current: f64, previous: f64) -> GrowthResult {
    let rate_percent = if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        0.0
    } else {
        round1((current - previous) / previous * 100.0)
    };
    let direction = if rate_percent > 0.0 {
        GrowthDirection::Up
    } else if rate_percent < 0.0 {
        GrowthDirection::Down
    } else {
        GrowthDirection::Flat
    };
    GrowthResult { rate_percent, direction }
}

/// [`compare_growth`] over counts
#[allow(clippy::cast_precision_loss)]
pub fn compare_counts(current: u64, previous: u64) -> GrowthResult {
    compare_growth(current as f64, previous as f64)
}

/// Growth of every category between two periods.
///
/// Labels keep the current period's order, followed by labels only seen in
/// the previous period. The top mover has the largest absolute rate; ties go
/// to the larger absolute count change, then to the earlier label. No top
/// mover is flagged when nothing changed.
pub fn compare_categories(current: &CategoryStats, previous: &CategoryStats) -> CategoryComparison {
    let mut labels: Vec<&str> = current.labels();
    for label in previous.labels() {
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    let entries: Vec<CategoryGrowth> = labels
        .into_iter()
        .map(|label| {
            let now = current.count(label);
            let before = previous.count(label);
            CategoryGrowth {
                label: label.to_string(),
                current: now,
                previous: before,
                growth: compare_counts(now, before),
            }
        })
        .collect();

    let top_mover = entries
        .iter()
        .filter(|e| e.growth.rate_percent != 0.0 || e.delta() != 0)
        .fold(None, |best: Option<&CategoryGrowth>, entry| match best {
            Some(current) if mover_rank(current, entry) != Ordering::Less => Some(current),
            _ => Some(entry),
        })
        .map(|e| e.label.clone());

    CategoryComparison { entries, top_mover }
}

fn mover_rank(a: &CategoryGrowth, b: &CategoryGrowth) -> Ordering {
    a.growth
        .rate_percent
        .abs()
        .total_cmp(&b.growth.rate_percent.abs())
        .then_with(|| a.delta().unsigned_abs().cmp(&b.delta().unsigned_abs()))
}

/// Growth of each year against the one before it, for a yearly series.
///
/// The first year compares against zero and therefore reports 0%.
pub fn year_over_year(stats: &TimeBucketStats) -> Vec<CategoryGrowth> {
    let mut previous = 0;
    stats
        .buckets
        .iter()
        .map(|bucket| {
            let growth = CategoryGrowth {
                label: bucket.label.clone(),
                current: bucket.count,
                previous,
                growth: compare_counts(bucket.count, previous),
            };
            previous = bucket.count;
            growth
        })
        .collect()
}

/// Compare two series bucket by bucket (e.g. this year vs. the comparison year).
///
/// Shorter series are zero-padded; labels come from `current` where present.
pub fn compare_series(current: &TimeBucketStats, previous: &TimeBucketStats) -> SeriesComparison {
    let len = current.buckets.len().max(previous.buckets.len());
    let labels = (0..len)
        .map(|i| {
            current
                .buckets
                .get(i)
                .or_else(|| previous.buckets.get(i))
                .map(|b| b.label.clone())
                .unwrap_or_default()
        })
        .collect();
    compare_labeled(labels, &current.counts(), &previous.counts())
}

/// Compare two Jan..Dec count arrays (annual summary comparison year).
pub fn compare_monthly(current: &[u64; 12], previous: &[u64; 12]) -> SeriesComparison {
    let labels = MONTH_LABELS.iter().map(|l| (*l).to_string()).collect();
    compare_labeled(labels, current, previous)
}

fn compare_labeled(labels: Vec<String>, current: &[u64], previous: &[u64]) -> SeriesComparison {
    let pad = |series: &[u64]| -> Vec<u64> {
        (0..labels.len()).map(|i| series.get(i).copied().unwrap_or(0)).collect()
    };
    let current = pad(current);
    let previous = pad(previous);
    let growth = current.iter().zip(&previous).map(|(c, p)| compare_counts(*c, *p)).collect();
    let total = compare_counts(current.iter().sum(), previous.iter().sum());
    SeriesComparison { labels, current, previous, growth, total }
}

/// One-sentence summary of a category comparison.
pub fn growth_narrative(comparison: &CategoryComparison, locale: Locale) -> String {
    let Some(top) = comparison.top_mover() else {
        return match locale {
            Locale::En => "No change between the two periods.".to_string(),
            Locale::ZhTw => "兩個期間之間沒有變化。".to_string(),
        };
    };
    let rate = format!("{:+.1}%", top.growth.rate_percent);
    match (locale, top.growth.direction) {
        (Locale::En, GrowthDirection::Down) => format!(
            "{} fell the most: {} → {} ({rate}).",
            top.label, top.previous, top.current
        ),
        (Locale::En, _) => format!(
            "{} grew the most: {} → {} ({rate}).",
            top.label, top.previous, top.current
        ),
        (Locale::ZhTw, GrowthDirection::Down) => {
            format!("減少最多的是 {}：{} → {}（{rate}）。", top.label, top.previous, top.current)
        }
        (Locale::ZhTw, _) => {
            format!("成長最多的是 {}：{} → {}（{rate}）。", top.label, top.previous, top.current)
        }
    }
}

#[cfg(test)]
mod tests {
    use ticketboard_domain::CategoryEntry;

    use super::*;

    fn stats(pairs: &[(&str, u64)]) -> CategoryStats {
        CategoryStats {
            total: pairs.iter().map(|(_, c)| c).sum(),
            entries: pairs
                .iter()
                .map(|(label, count)| CategoryEntry {
                    label: (*label).to_string(),
                    count: *count,
                    share: 0.0,
                })
                .collect(),
        }
    }

    #[test]
    fn growth_rates() {
        assert!((compare_growth(150.0, 100.0).rate_percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(compare_growth(150.0, 100.0).direction, GrowthDirection::Up);
        assert!((compare_growth(1.0, 3.0).rate_percent + 66.7).abs() < f64::EPSILON);
        assert_eq!(compare_growth(1.0, 3.0).direction, GrowthDirection::Down);
        assert_eq!(compare_growth(7.0, 7.0).direction, GrowthDirection::Flat);
    }

    #[test]
    fn zero_previous_is_flat() {
        let result = compare_growth(42.0, 0.0);
        assert!(result.rate_percent.abs() < f64::EPSILON);
        assert_eq!(result.direction, GrowthDirection::Flat);
    }

    #[test]
    fn top_mover_by_absolute_rate() {
        let current = stats(&[("Email", 2), ("電話", 12), ("現場", 4)]);
        let previous = stats(&[("Email", 8), ("電話", 10), ("Line", 3)]);
        let comparison = compare_categories(&current, &previous);

        let labels: Vec<&str> = comparison.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Email", "電話", "現場", "Line"]);
        // Line vanished (-100%), ahead of Email (-75%)
        assert_eq!(comparison.top_mover.as_deref(), Some("Line"));
        assert_eq!(comparison.get("現場").map(|e| e.growth.direction), Some(GrowthDirection::Flat));
    }

    #[test]
    fn top_mover_ties_break_on_delta() {
        let current = stats(&[("a", 2), ("b", 20)]);
        let previous = stats(&[("a", 1), ("b", 10)]);
        let comparison = compare_categories(&current, &previous);
        assert_eq!(comparison.top_mover.as_deref(), Some("b"));
    }

    #[test]
    fn no_top_mover_without_change() {
        let same = stats(&[("a", 1)]);
        assert!(compare_categories(&same, &same).top_mover.is_none());
        assert_eq!(
            growth_narrative(&compare_categories(&same, &same), Locale::En),
            "No change between the two periods."
        );
    }

    #[test]
    fn narrative_mentions_top_mover() {
        let comparison = compare_categories(&stats(&[("Email", 15)]), &stats(&[("Email", 10)]));
        assert_eq!(growth_narrative(&comparison, Locale::En), "Email grew the most: 10 → 15 (+50.0%).");
        assert!(growth_narrative(&comparison, Locale::ZhTw).contains("Email"));
    }

    #[test]
    fn monthly_comparison_totals() {
        let mut current = [0; 12];
        let mut previous = [0; 12];
        current[0] = 3;
        previous[0] = 2;
        previous[5] = 2;
        let comparison = compare_monthly(&current, &previous);
        assert_eq!(comparison.labels.len(), 12);
        assert!((comparison.growth[0].rate_percent - 50.0).abs() < f64::EPSILON);
        assert!((comparison.total.rate_percent + 25.0).abs() < f64::EPSILON);
    }
}
