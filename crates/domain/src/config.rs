//! Configuration structures
//!
//! Every section is defaulted so partial JSON/TOML files and partial
//! environments still produce a usable configuration. Loading lives in
//! `ticketboard-infra::config`.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_BASE_BACKOFF_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_PAGE_SIZE,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::errors::{Result, TicketboardError};

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub reports: ReportConfig,
}

impl Config {
    /// Reject values that would make every request or report fail.
    ///
    /// # Errors
    /// Returns `TicketboardError::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(TicketboardError::Config("api.base_url must not be empty".into()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TicketboardError::Config(format!(
                "api.base_url must start with http:// or https:// (got {base_url})"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(TicketboardError::Config("api.timeout_secs must be positive".into()));
        }
        if self.api.max_attempts == 0 {
            return Err(TicketboardError::Config("api.max_attempts must be at least 1".into()));
        }
        if self.reports.page_size == 0 {
            return Err(TicketboardError::Config("reports.page_size must be at least 1".into()));
        }
        self.reports.tz()?;
        Ok(())
    }
}

/// REST backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Total attempts per request (initial try + retries)
    pub max_attempts: usize,
    /// First retry delay; doubles on each further retry
    pub base_backoff_ms: u64,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff_ms: DEFAULT_BASE_BACKOFF_MS,
            user_agent: None,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

/// Reporting and board presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// IANA timezone used to place issues into calendar buckets
    pub timezone: String,
    pub page_size: usize,
    pub locale: Locale,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { timezone: "UTC".to_string(), page_size: DEFAULT_PAGE_SIZE, locale: Locale::En }
    }
}

impl ReportConfig {
    /// Parse the configured timezone.
    ///
    /// # Errors
    /// Returns `TicketboardError::Config` for names `chrono-tz` does not know.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| TicketboardError::Config(format!("unknown timezone: {}", self.timezone)))
    }
}

/// Language of user-visible messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    ZhTw,
}

crate::impl_domain_status_conversions!(Locale {
    En => "en" | "en-US" | "english",
    ZhTw => "zh-TW" | "zh_tw" | "zh",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.reports.page_size, 10);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = Config::default();
        config.api.base_url = "localhost:5000".into();
        assert!(matches!(config.validate(), Err(TicketboardError::Config(_))));
    }

    #[test]
    fn rejects_unknown_timezone() {
        let mut config = Config::default();
        config.reports.timezone = "Mars/Olympus".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_page_size() {
        let mut config = Config::default();
        config.reports.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"reports": {"timezone": "Asia/Taipei", "locale": "zh-TW"}}"#)
                .unwrap();
        assert_eq!(config.reports.timezone, "Asia/Taipei");
        assert_eq!(config.reports.locale, Locale::ZhTw);
        assert_eq!(config.reports.page_size, 10);
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.reports.tz().unwrap(), chrono_tz::Asia::Taipei);
    }
}
