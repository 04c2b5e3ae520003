//! Application context - dependency injection container

use std::sync::Arc;

use chrono_tz::Tz;
use ticketboard_core::store::{CommentsState, IssuesState, SummariesState};
use ticketboard_core::{CommentService, IssueService, ReportService};
use ticketboard_domain::{Config, Locale, Result};
use ticketboard_infra::{ApiClient, HttpCommentApi, HttpIssueApi, HttpSummaryApi, ReportExporter};
use tokio::sync::Mutex;
use tracing::info;

/// Application context - holds all services and state slices
pub struct AppContext {
    pub config: Config,
    pub locale: Locale,
    pub timezone: Tz,

    // Core services
    pub issues: Arc<IssueService>,
    pub comments: Arc<CommentService>,
    pub reports: Arc<ReportService>,
    pub exporter: Arc<ReportExporter>,

    // State slices, one lock each so slices never block one another
    pub issue_board: Mutex<IssuesState>,
    pub comment_thread: Mutex<CommentsState>,
    pub summaries: Mutex<SummariesState>,
}

impl AppContext {
    /// Build the context from the environment, a config file, or defaults
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be built
    pub fn new() -> Result<Self> {
        let config = ticketboard_infra::config::load()?;
        Self::new_with_config(config)
    }

    /// Build the context for an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be built
    pub fn new_with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let timezone = config.reports.tz()?;
        let client = ApiClient::from_config(&config.api)?;

        let issue_api = Arc::new(HttpIssueApi::new(client.clone()));
        let issues = Arc::new(IssueService::new(issue_api.clone()));
        let comments = Arc::new(CommentService::new(Arc::new(HttpCommentApi::new(client.clone()))));
        let reports = Arc::new(
            ReportService::new(Arc::new(HttpSummaryApi::new(client.clone())), issue_api)
                .with_timezone(timezone),
        );
        let exporter = Arc::new(ReportExporter::new(client));

        info!(
            base_url = %config.api.base_url,
            timezone = %timezone,
            locale = %config.reports.locale,
            "Application context initialised"
        );

        Ok(Self {
            locale: config.reports.locale,
            issue_board: Mutex::new(IssuesState::new(timezone, config.reports.page_size)),
            comment_thread: Mutex::new(CommentsState::new()),
            summaries: Mutex::new(SummariesState::new()),
            timezone,
            issues,
            comments,
            reports,
            exporter,
            config,
        })
    }
}
