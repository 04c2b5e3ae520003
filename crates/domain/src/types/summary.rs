//! Pre-aggregated payloads from the `/issues/stats`, `/summaries/*` and
//! `/report/export/*` endpoints
//!
//! Every field is defaulted: the reporting endpoints omit keys for empty
//! periods and occasionally send counts as strings.

use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::lenient;
use crate::impl_domain_status_conversions;

/* -------------------------------------------------------------------------- */
/* Labeled counts */
/* -------------------------------------------------------------------------- */

/// One entry of a label → count mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledCount {
    pub label: String,
    pub count: u64,
}

/// Label → count mapping that keeps the order the backend sent.
///
/// Chart colours are assigned by position, so a `HashMap` would reshuffle
/// them between fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledCounts(Vec<LabeledCount>);

impl LabeledCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` to `label`, appending it when first seen.
    pub fn add(&mut self, label: &str, count: u64) {
        match self.0.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => entry.count += count,
            None => self.0.push(LabeledCount { label: label.to_string(), count }),
        }
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.0.iter().find(|entry| entry.label == label).map(|entry| entry.count)
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|entry| entry.count).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabeledCount> {
        self.0.iter()
    }

    /// Entry with the largest count; the earliest entry wins ties.
    pub fn top(&self) -> Option<&LabeledCount> {
        self.0.iter().fold(None, |best: Option<&LabeledCount>, entry| match best {
            Some(current) if current.count >= entry.count => Some(current),
            _ => Some(entry),
        })
    }
}

impl<'a> IntoIterator for &'a LabeledCounts {
    type Item = &'a LabeledCount;
    type IntoIter = std::slice::Iter<'a, LabeledCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, u64)> for LabeledCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (label, count) in iter {
            counts.add(&label, count);
        }
        counts
    }
}

impl Serialize for LabeledCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.label, &entry.count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LabeledCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = LabeledCounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of label to count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut counts = LabeledCounts::new();
                while let Some((label, value)) = access.next_entry::<String, Value>()? {
                    counts.add(&label, value_to_count(&value));
                }
                Ok(counts)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(LabeledCounts::new())
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(LabeledCounts::new())
            }
        }

        deserializer.deserialize_any(CountsVisitor)
    }
}

fn value_to_count(value: &Value) -> u64 {
    lenient::count(value).unwrap_or(0)
}

/* -------------------------------------------------------------------------- */
/* Summaries */
/* -------------------------------------------------------------------------- */

/// `GET /issues/stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueStats {
    #[serde(deserialize_with = "lenient::count")]
    pub total_issues: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub pending_issues: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub in_progress_issues: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub closed_issues: u64,
}

/// `GET /summaries/monthly?month=YYYY-MM`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonthlySummary {
    #[serde(deserialize_with = "lenient::count")]
    pub issue_count: u64,
    pub issue_types: LabeledCounts,
    #[serde(deserialize_with = "lenient::count")]
    pub completed: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub uncompleted: u64,
    pub source_stats: LabeledCounts,
}

/// Envelope of `GET /summaries/stored?year=&month=`; `data` is absent when
/// the month has not been summarised yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredMonthlySummary {
    pub data: Option<MonthlySummary>,
}

/// `GET /summaries/annual?year=YYYY`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnualSummary {
    #[serde(deserialize_with = "lenient::count")]
    pub total_issues: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub completed: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub uncompleted: u64,
    pub source_stats: LabeledCounts,
    pub type_stats: LabeledCounts,
    /// Issue counts Jan..Dec; short arrays are zero-filled
    #[serde(deserialize_with = "month_counts")]
    pub monthly_stats: [u64; 12],
}

fn month_counts<'de, D>(deserializer: D) -> Result<[u64; 12], D::Error>
where
    D: Deserializer<'de>,
{
    struct MonthsVisitor;

    impl<'de> Visitor<'de> for MonthsVisitor {
        type Value = [u64; 12];

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an array of monthly counts")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut months = [0; 12];
            let mut index = 0;
            while let Some(value) = seq.next_element::<Value>()? {
                if let Some(slot) = months.get_mut(index) {
                    *slot = value_to_count(&value);
                }
                index += 1;
            }
            Ok(months)
        }

        /// `{"1": 4, "2": 0, ...}` keyed by month number
        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut months = [0; 12];
            while let Some((key, value)) = access.next_entry::<String, Value>()? {
                let slot = key
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|month| month.checked_sub(1))
                    .and_then(|index| months.get_mut(index));
                if let Some(slot) = slot {
                    *slot = value_to_count(&value);
                }
            }
            Ok(months)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok([0; 12])
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok([0; 12])
        }
    }

    deserializer.deserialize_any(MonthsVisitor)
}

/// One month of `GET /summaries/{annualTrend,immediateAnnualTrend}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonthTrendPoint {
    #[serde(deserialize_with = "lenient::count")]
    pub month: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub issue_count: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub resolved: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub closed_count: u64,
}

impl MonthTrendPoint {
    /// The two endpoints disagree on which field carries resolutions.
    pub fn resolved_count(&self) -> u64 {
        self.resolved.max(self.closed_count)
    }
}

/// Per-month issue counts for one year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnualTrend {
    pub months: Vec<MonthTrendPoint>,
    #[serde(deserialize_with = "lenient::count")]
    pub total_count: u64,
    #[serde(deserialize_with = "lenient::number")]
    pub resolution_rate: Option<f64>,
}

impl AnnualTrend {
    /// `total_count`, or the sum of the months when the backend omitted it.
    pub fn effective_total(&self) -> u64 {
        if self.total_count > 0 {
            self.total_count
        } else {
            self.months.iter().map(|m| m.issue_count).sum()
        }
    }

    /// Backend resolution rate, recomputed from the months when absent.
    /// Percentage rounded to one decimal; 0 for an empty year.
    pub fn effective_resolution_rate(&self) -> f64 {
        if let Some(rate) = self.resolution_rate {
            return rate;
        }
        let total = self.effective_total();
        if total == 0 {
            return 0.0;
        }
        let resolved: u64 = self.months.iter().map(MonthTrendPoint::resolved_count).sum();
        #[allow(clippy::cast_precision_loss)]
        let rate = resolved as f64 / total as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }
}

/// Which trend endpoint to read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrendKind {
    /// Stored (nightly) aggregation
    Stored,
    /// Computed on request
    #[default]
    Immediate,
}

impl_domain_status_conversions!(TrendKind {
    Stored => "stored",
    Immediate => "immediate" | "live",
});

impl TrendKind {
    pub fn path(self) -> &'static str {
        match self {
            Self::Stored => "/summaries/annualTrend",
            Self::Immediate => "/summaries/immediateAnnualTrend",
        }
    }
}

/// Monthly report export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl_domain_status_conversions!(ExportFormat {
    Excel => "excel" | "xlsx",
    Pdf => "pdf",
});

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            Self::Pdf => "pdf",
        }
    }
}
