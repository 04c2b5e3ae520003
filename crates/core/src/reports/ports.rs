//! Port interfaces for the pre-aggregated summary endpoints

use async_trait::async_trait;
use ticketboard_domain::{AnnualSummary, AnnualTrend, MonthlySummary, Result, TrendKind};

/// Trait for the `/summaries/*` endpoints of the REST backend
#[async_trait]
pub trait SummaryApi: Send + Sync {
    /// Live summary of one month
    async fn monthly(&self, year: i32, month: u32) -> Result<MonthlySummary>;

    /// Stored summary of one month; `None` when not summarised yet
    async fn stored_monthly(&self, year: i32, month: u32) -> Result<Option<MonthlySummary>>;

    async fn annual(&self, year: i32) -> Result<AnnualSummary>;

    async fn annual_trend(&self, year: i32, kind: TrendKind) -> Result<AnnualTrend>;
}
