//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Locale;

/// Main error type for Ticketboard
///
/// Variants follow the failure taxonomy of the dashboard: transport failures,
/// HTTP error statuses, client-side validation, and undecodable payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum TicketboardError {
    /// No response was received (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// A required field was missing or malformed before any request was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A payload could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TicketboardError {
    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Http { .. } => "http",
            Self::InvalidInput(_) => "invalid_input",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the failure happened before a response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Inline message shown to the user in place of the failed view.
    pub fn user_message(&self, locale: Locale) -> String {
        match (locale, self) {
            (Locale::En, Self::Network(_)) => {
                "Unable to reach the server. Check that the API is running and try again."
                    .to_string()
            }
            (Locale::ZhTw, Self::Network(_)) => "伺服器無回應，請確認後端服務是否正常運行".to_string(),
            (Locale::En, Self::Http { status, message }) => {
                format!("The server rejected the request ({status}): {message}")
            }
            (Locale::ZhTw, Self::Http { status, message }) => {
                format!("伺服器錯誤 ({status}): {message}")
            }
            (Locale::En, Self::InvalidInput(message)) => message.clone(),
            (Locale::ZhTw, Self::InvalidInput(message)) => format!("輸入資料有誤：{message}"),
            (Locale::En, Self::Parse(_)) => {
                "The server returned data that could not be read.".to_string()
            }
            (Locale::ZhTw, Self::Parse(_)) => "無法解析伺服器回應的資料".to_string(),
            (Locale::En, Self::Config(message)) => format!("Configuration error: {message}"),
            (Locale::ZhTw, Self::Config(message)) => format!("設定錯誤：{message}"),
            (Locale::En, Self::NotFound(_)) => "The requested record no longer exists.".to_string(),
            (Locale::ZhTw, Self::NotFound(_)) => "找不到指定的資料".to_string(),
            (Locale::En, Self::Internal(_)) => {
                "Something went wrong. Please try again later.".to_string()
            }
            (Locale::ZhTw, Self::Internal(_)) => "發生錯誤，請稍後再試".to_string(),
        }
    }
}

/// Result type alias for Ticketboard operations
pub type Result<T> = std::result::Result<T, TicketboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(TicketboardError::Network("x".into()).label(), "network");
        assert_eq!(TicketboardError::Http { status: 500, message: "x".into() }.label(), "http");
        assert_eq!(TicketboardError::InvalidInput("x".into()).label(), "invalid_input");
        assert_eq!(TicketboardError::NotFound("x".into()).label(), "not_found");
    }

    #[test]
    fn validation_message_is_shown_verbatim_in_english() {
        let err = TicketboardError::InvalidInput("Title is required".into());
        assert_eq!(err.user_message(Locale::En), "Title is required");
        assert!(err.user_message(Locale::ZhTw).ends_with("Title is required"));
    }

    #[test]
    fn http_message_carries_status() {
        let err = TicketboardError::Http { status: 422, message: "bad status".into() };
        assert!(err.user_message(Locale::En).contains("422"));
        assert!(err.user_message(Locale::ZhTw).contains("422"));
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = TicketboardError::Network("refused".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Network");
        assert_eq!(json["details"], "refused");
    }
}
