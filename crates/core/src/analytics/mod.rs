//! Analytics engine
//!
//! Turns a flat issue list into the chart datasets of the reporting pages.
//! Every function here is synchronous and pure: bad dates and empty
//! denominators are neutralised (unbucketable, 0%) instead of failing.

pub mod categories;
pub mod insights;
pub mod normalizer;
pub mod time_buckets;
pub mod trends;

/// Round to one decimal place for display.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole * 100`, or 0 when `whole` is 0.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
