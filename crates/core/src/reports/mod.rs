//! Reporting pages: summary port, service and page models

pub mod ports;
pub mod service;

pub use service::{
    AnalyticsReport, AnnualComparison, AnnualReport, MonthlyDashboard, ReportService, TrendReport,
};
