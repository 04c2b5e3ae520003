//! Report summaries slice
//!
//! Each summary kind lives in its own slot with its own loading flag and
//! error, so the annual report and its comparison year can load side by side.

use std::collections::HashMap;

use ticketboard_domain::{AnnualSummary, AnnualTrend, MonthlySummary};

use super::request::{RequestToken, RequestTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummarySlot {
    Monthly,
    Stored,
    Annual,
    CompareAnnual,
    Trend,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SummariesAction {
    MonthlyLoaded { token: RequestToken, summary: MonthlySummary },
    /// `None` when the month has no stored summary
    StoredLoaded { token: RequestToken, summary: Option<MonthlySummary> },
    AnnualLoaded { token: RequestToken, summary: AnnualSummary },
    CompareAnnualLoaded { token: RequestToken, summary: AnnualSummary },
    TrendLoaded { token: RequestToken, trend: AnnualTrend },
    Failed { slot: SummarySlot, token: RequestToken, message: String },
    Clear(SummarySlot),
}

#[derive(Debug, Clone, Default)]
pub struct SummariesState {
    pub monthly: Option<MonthlySummary>,
    pub stored: Option<MonthlySummary>,
    pub annual: Option<AnnualSummary>,
    pub compare_annual: Option<AnnualSummary>,
    pub trend: Option<AnnualTrend>,
    errors: HashMap<SummarySlot, String>,
    requests: RequestTracker<SummarySlot>,
}

impl SummariesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, slot: SummarySlot) -> RequestToken {
        self.requests.begin(slot)
    }

    pub fn is_loading(&self, slot: SummarySlot) -> bool {
        self.requests.is_pending(&slot)
    }

    pub fn error(&self, slot: SummarySlot) -> Option<&str> {
        self.errors.get(&slot).map(String::as_str)
    }

    pub fn dispatch(&mut self, action: SummariesAction) {
        match action {
            SummariesAction::MonthlyLoaded { token, summary } => {
                if self.accept(SummarySlot::Monthly, token) {
                    self.monthly = Some(summary);
                }
            }
            SummariesAction::StoredLoaded { token, summary } => {
                if self.accept(SummarySlot::Stored, token) {
                    self.stored = summary;
                }
            }
            SummariesAction::AnnualLoaded { token, summary } => {
                if self.accept(SummarySlot::Annual, token) {
                    self.annual = Some(summary);
                }
            }
            SummariesAction::CompareAnnualLoaded { token, summary } => {
                if self.accept(SummarySlot::CompareAnnual, token) {
                    self.compare_annual = Some(summary);
                }
            }
            SummariesAction::TrendLoaded { token, trend } => {
                if self.accept(SummarySlot::Trend, token) {
                    self.trend = Some(trend);
                }
            }
            SummariesAction::Failed { slot, token, message } => {
                if self.requests.finish(&slot, token) {
                    self.errors.insert(slot, message);
                }
            }
            SummariesAction::Clear(slot) => {
                self.errors.remove(&slot);
                match slot {
                    SummarySlot::Monthly => self.monthly = None,
                    SummarySlot::Stored => self.stored = None,
                    SummarySlot::Annual => self.annual = None,
                    SummarySlot::CompareAnnual => self.compare_annual = None,
                    SummarySlot::Trend => self.trend = None,
                }
            }
        }
    }

    fn accept(&mut self, slot: SummarySlot, token: RequestToken) -> bool {
        let current = self.requests.finish(&slot, token);
        if current {
            self.errors.remove(&slot);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annual(total: u64) -> AnnualSummary {
        AnnualSummary { total_issues: total, ..AnnualSummary::default() }
    }

    #[test]
    fn annual_and_comparison_load_independently() {
        let mut state = SummariesState::new();
        let annual_token = state.begin(SummarySlot::Annual);
        let compare_token = state.begin(SummarySlot::CompareAnnual);

        state.dispatch(SummariesAction::CompareAnnualLoaded { token: compare_token, summary: annual(40) });
        assert!(state.is_loading(SummarySlot::Annual));
        assert!(!state.is_loading(SummarySlot::CompareAnnual));

        state.dispatch(SummariesAction::AnnualLoaded { token: annual_token, summary: annual(50) });
        assert_eq!(state.annual.as_ref().map(|s| s.total_issues), Some(50));
        assert_eq!(state.compare_annual.as_ref().map(|s| s.total_issues), Some(40));
    }

    #[test]
    fn slow_month_does_not_overwrite_newer_one() {
        let mut state = SummariesState::new();
        let january = state.begin(SummarySlot::Monthly);
        let february = state.begin(SummarySlot::Monthly);

        let feb = MonthlySummary { issue_count: 2, ..MonthlySummary::default() };
        state.dispatch(SummariesAction::MonthlyLoaded { token: february, summary: feb });
        let jan = MonthlySummary { issue_count: 9, ..MonthlySummary::default() };
        state.dispatch(SummariesAction::MonthlyLoaded { token: january, summary: jan });

        assert_eq!(state.monthly.as_ref().map(|s| s.issue_count), Some(2));
    }

    #[test]
    fn failure_is_scoped_to_its_slot() {
        let mut state = SummariesState::new();
        let trend = state.begin(SummarySlot::Trend);
        let monthly = state.begin(SummarySlot::Monthly);

        state.dispatch(SummariesAction::Failed {
            slot: SummarySlot::Trend,
            token: trend,
            message: "HTTP 500".into(),
        });
        assert_eq!(state.error(SummarySlot::Trend), Some("HTTP 500"));
        assert!(state.error(SummarySlot::Monthly).is_none());
        assert!(state.is_loading(SummarySlot::Monthly));

        state.dispatch(SummariesAction::MonthlyLoaded { token: monthly, summary: MonthlySummary::default() });
        state.dispatch(SummariesAction::Clear(SummarySlot::Trend));
        assert!(state.error(SummarySlot::Trend).is_none());
    }

    #[test]
    fn missing_stored_summary_clears_slot() {
        let mut state = SummariesState::new();
        let first = state.begin(SummarySlot::Stored);
        state.dispatch(SummariesAction::StoredLoaded { token: first, summary: Some(MonthlySummary::default()) });
        let second = state.begin(SummarySlot::Stored);
        state.dispatch(SummariesAction::StoredLoaded { token: second, summary: None });
        assert!(state.stored.is_none());
    }
}
