//! API-specific error types
//!
//! Provides error classification for REST operations with retry metadata.

use std::time::Duration;

use thiserror::Error;
use ticketboard_domain::TicketboardError;

/// Categories of API errors for retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Server errors (5xx) - retryable for idempotent requests
    Server,
    /// Client errors (4xx) - non-retryable
    Client,
    /// Network/connection errors - retryable
    Network,
    /// Undecodable response bodies - non-retryable
    Decode,
    /// Configuration errors - non-retryable
    Config,
}

/// REST operation errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Client error {status}: {message}")]
    Client { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Server { .. } => ApiErrorCategory::Server,
            Self::Client { .. } | Self::NotFound(_) => ApiErrorCategory::Client,
            Self::Decode(_) => ApiErrorCategory::Decode,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Check if this error could succeed on a later attempt
    pub fn should_retry(&self) -> bool {
        matches!(self.category(), ApiErrorCategory::Server | ApiErrorCategory::Network)
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } | Self::Client { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

impl From<ApiError> for TicketboardError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(message) => Self::Network(message),
            ApiError::Timeout(after) => Self::Network(format!("request timed out after {after:?}")),
            ApiError::Server { status, message } | ApiError::Client { status, message } => {
                Self::Http { status, message }
            }
            ApiError::NotFound(message) => Self::NotFound(message),
            ApiError::Decode(message) => Self::Parse(message),
            ApiError::Config(message) => Self::Config(message),
        }
    }
}

impl From<TicketboardError> for ApiError {
    fn from(err: TicketboardError) -> Self {
        match err {
            TicketboardError::Network(message) => Self::Network(message),
            TicketboardError::Http { status, message } if status >= 500 => {
                Self::Server { status, message }
            }
            TicketboardError::Http { status, message } => Self::Client { status, message },
            TicketboardError::NotFound(message) => Self::NotFound(message),
            TicketboardError::Parse(message) => Self::Decode(message),
            TicketboardError::Config(message) => Self::Config(message),
            TicketboardError::InvalidInput(message) => Self::Client { status: 400, message },
            TicketboardError::Internal(message) => Self::Server { status: 500, message },
        }
    }
}
