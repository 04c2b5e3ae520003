//! Monthly, annual, trend and analytics report commands

use ticketboard_core::reports::{AnalyticsReport, AnnualReport, MonthlyDashboard, TrendReport};
use ticketboard_core::store::{SummariesAction, SummarySlot};
use ticketboard_domain::{MonthlySummary, Result, TrendKind};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

pub async fn get_monthly_dashboard(
    ctx: &AppContext,
    year: i32,
    month: u32,
) -> std::result::Result<MonthlyDashboard, String> {
    execute_command(ctx, "reports::get_monthly_dashboard", || async {
        let token = ctx.summaries.lock().await.begin(SummarySlot::Monthly);
        let result = ctx.reports.monthly_dashboard(year, month).await;
        let action = |dashboard: &MonthlyDashboard| SummariesAction::MonthlyLoaded {
            token,
            summary: dashboard.summary.clone(),
        };
        settle(ctx, SummarySlot::Monthly, token, result, action).await
    })
    .await
}

/// Stored monthly summary; `None` when the month was never summarised
pub async fn get_stored_summary(
    ctx: &AppContext,
    year: i32,
    month: u32,
) -> std::result::Result<Option<MonthlySummary>, String> {
    execute_command(ctx, "reports::get_stored_summary", || async {
        let token = ctx.summaries.lock().await.begin(SummarySlot::Stored);
        let result = ctx.reports.stored_monthly(year, month).await;
        let action = |summary: &Option<MonthlySummary>| SummariesAction::StoredLoaded {
            token,
            summary: summary.clone(),
        };
        settle(ctx, SummarySlot::Stored, token, result, action).await
    })
    .await
}

/// Annual report, optionally compared against another year
pub async fn get_annual_report(
    ctx: &AppContext,
    year: i32,
    compare_year: Option<i32>,
) -> std::result::Result<AnnualReport, String> {
    execute_command(ctx, "reports::get_annual_report", || async {
        let (token, compare_token) = {
            let mut state = ctx.summaries.lock().await;
            let compare_token = compare_year.map(|_| state.begin(SummarySlot::CompareAnnual));
            (state.begin(SummarySlot::Annual), compare_token)
        };
        let result = ctx.reports.annual_report(year, compare_year).await;

        let mut state = ctx.summaries.lock().await;
        match &result {
            Ok(report) => {
                state.dispatch(SummariesAction::AnnualLoaded { token, summary: report.summary.clone() });
                if let Some(token) = compare_token {
                    match (&report.comparison, &report.comparison_error) {
                        (Some(comparison), _) => state.dispatch(SummariesAction::CompareAnnualLoaded {
                            token,
                            summary: comparison.summary.clone(),
                        }),
                        (None, Some(err)) => state.dispatch(SummariesAction::Failed {
                            slot: SummarySlot::CompareAnnual,
                            token,
                            message: err.user_message(ctx.locale),
                        }),
                        (None, None) => {}
                    }
                }
            }
            Err(err) => {
                let message = err.user_message(ctx.locale);
                if let Some(token) = compare_token {
                    state.dispatch(SummariesAction::Failed {
                        slot: SummarySlot::CompareAnnual,
                        token,
                        message: message.clone(),
                    });
                }
                state.dispatch(SummariesAction::Failed { slot: SummarySlot::Annual, token, message });
            }
        }
        result
    })
    .await
}

pub async fn get_annual_trend(
    ctx: &AppContext,
    year: i32,
    kind: TrendKind,
) -> std::result::Result<TrendReport, String> {
    execute_command(ctx, "reports::get_annual_trend", || async {
        let token = ctx.summaries.lock().await.begin(SummarySlot::Trend);
        let result = ctx.reports.annual_trend(year, kind).await;
        let action =
            |report: &TrendReport| SummariesAction::TrendLoaded { token, trend: report.trend.clone() };
        settle(ctx, SummarySlot::Trend, token, result, action).await
    })
    .await
}

/// Analytics page recomputed from the full issue list
pub async fn get_analytics(ctx: &AppContext, year: Option<i32>) -> std::result::Result<AnalyticsReport, String> {
    execute_command(ctx, "reports::get_analytics", || ctx.reports.analytics(year)).await
}

async fn settle<T>(
    ctx: &AppContext,
    slot: SummarySlot,
    token: ticketboard_core::store::RequestToken,
    result: Result<T>,
    loaded: impl FnOnce(&T) -> SummariesAction,
) -> Result<T> {
    let mut state = ctx.summaries.lock().await;
    match &result {
        Ok(value) => state.dispatch(loaded(value)),
        Err(err) => state.dispatch(SummariesAction::Failed {
            slot,
            token,
            message: err.user_message(ctx.locale),
        }),
    }
    result
}
