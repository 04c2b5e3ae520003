//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `TICKETBOARD_API_BASE_URL` is not set, falls back to a config file
//! 3. Probes multiple paths for config files (JSON or TOML)
//! 4. Without any file, uses the built-in defaults
//!
//! ## Environment Variables
//! - `TICKETBOARD_API_BASE_URL`: REST backend base URL (required)
//! - `TICKETBOARD_API_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `TICKETBOARD_API_MAX_ATTEMPTS`: Attempts per request, including the first
//! - `TICKETBOARD_LOG_LEVEL`: Default log filter directive
//! - `TICKETBOARD_LOG_JSON`: Emit JSON log lines (true/false)
//! - `TICKETBOARD_TIMEZONE`: IANA timezone for report bucketing
//! - `TICKETBOARD_PAGE_SIZE`: Board page size
//! - `TICKETBOARD_LOCALE`: `en` or `zh-TW`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./ticketboard.{json,toml}` or `./config.{json,toml}`
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ticketboard_domain::{Config, Result, TicketboardError};

const FILE_STEMS: [&str; 2] = ["ticketboard", "config"];
const EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Load and validate configuration with automatic fallback strategy
///
/// # Errors
/// Returns `TicketboardError::Config` if a source exists but is invalid, or
/// the resulting configuration fails validation.
pub fn load() -> Result<Config> {
    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path))?,
                None => {
                    tracing::info!("No configuration file found, using defaults");
                    Config::default()
                }
            }
        }
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// `TICKETBOARD_API_BASE_URL` must be present; every other variable
/// overrides the corresponding default when set.
///
/// # Errors
/// Returns `TicketboardError::Config` if the base URL is missing or a value
/// does not parse.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    config.api.base_url = env_var("TICKETBOARD_API_BASE_URL")?;

    if let Some(timeout) = env_parse("TICKETBOARD_API_TIMEOUT_SECS")? {
        config.api.timeout_secs = timeout;
    }
    if let Some(attempts) = env_parse("TICKETBOARD_API_MAX_ATTEMPTS")? {
        config.api.max_attempts = attempts;
    }
    if let Ok(level) = std::env::var("TICKETBOARD_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("TICKETBOARD_LOG_JSON", config.logging.json);
    if let Ok(timezone) = std::env::var("TICKETBOARD_TIMEZONE") {
        config.reports.timezone = timezone;
    }
    if let Some(page_size) = env_parse("TICKETBOARD_PAGE_SIZE")? {
        config.reports.page_size = page_size;
    }
    if let Some(locale) = env_parse("TICKETBOARD_LOCALE")? {
        config.reports.locale = locale;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `TicketboardError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TicketboardError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TicketboardError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TicketboardError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, format chosen by extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TicketboardError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TicketboardError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(TicketboardError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
        roots.push(cwd.join("../.."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots.iter().flat_map(|root| candidates_in(root)).find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    FILE_STEMS
        .iter()
        .flat_map(|stem| EXTENSIONS.iter().map(move |ext| dir.join(format!("{stem}.{ext}"))))
        .collect()
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| TicketboardError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional environment variable
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| TicketboardError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
