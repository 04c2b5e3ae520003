//! `/summaries` adapter

use async_trait::async_trait;
use ticketboard_core::SummaryApi;
use ticketboard_domain::{
    AnnualSummary, AnnualTrend, MonthlySummary, Result, StoredMonthlySummary, TrendKind,
};
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::errors::ApiError;

/// [`SummaryApi`] over HTTP
#[derive(Clone)]
pub struct HttpSummaryApi {
    client: ApiClient,
}

impl HttpSummaryApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

/// `YYYY-MM` as the monthly endpoint expects it
pub(crate) fn month_key(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

#[async_trait]
impl SummaryApi for HttpSummaryApi {
    #[instrument(skip(self))]
    async fn monthly(&self, year: i32, month: u32) -> Result<MonthlySummary> {
        let month = month_key(year, month);
        let summary: Option<MonthlySummary> =
            self.client.get_query("/summaries/monthly", &[("month", month.as_str())]).await?;
        Ok(summary.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn stored_monthly(&self, year: i32, month: u32) -> Result<Option<MonthlySummary>> {
        let query = [("year", year.to_string()), ("month", month.to_string())];
        match self.client.get_query::<Option<StoredMonthlySummary>, _>("/summaries/stored", &query).await {
            Ok(stored) => Ok(stored.and_then(|s| s.data)),
            Err(ApiError::NotFound(message)) => {
                debug!(%message, "Stored summary not found");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self))]
    async fn annual(&self, year: i32) -> Result<AnnualSummary> {
        let summary: Option<AnnualSummary> =
            self.client.get_query("/summaries/annual", &[("year", year)]).await?;
        Ok(summary.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn annual_trend(&self, year: i32, kind: TrendKind) -> Result<AnnualTrend> {
        let trend: Option<AnnualTrend> = self.client.get_query(kind.path(), &[("year", year)]).await?;
        Ok(trend.unwrap_or_default())
    }
}
