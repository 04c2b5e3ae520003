//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use ticketboard_domain::TicketboardError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TicketboardError);

impl From<InfraError> for TicketboardError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TicketboardError> for InfraError {
    fn from(value: TicketboardError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTicketboardError {
    fn into_ticketboard(self) -> TicketboardError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TicketboardError */
/* -------------------------------------------------------------------------- */

impl IntoTicketboardError for HttpError {
    fn into_ticketboard(self) -> TicketboardError {
        let target = self.url().map(|url| format!(" ({url})")).unwrap_or_default();

        if self.is_timeout() {
            return TicketboardError::Network(format!("http request timed out{target}"));
        }
        if self.is_connect() {
            return TicketboardError::Network(format!("http connection failed{target}: {self}"));
        }
        if self.is_decode() {
            return TicketboardError::Parse(format!("failed to decode http response{target}: {self}"));
        }
        if self.is_builder() {
            return TicketboardError::Config(format!("invalid http request{target}: {self}"));
        }
        if let Some(status) = self.status() {
            return TicketboardError::Http { status: status.as_u16(), message: self.to_string() };
        }
        TicketboardError::Network(format!("http error{target}: {self}"))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_ticketboard())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → TicketboardError */
/* -------------------------------------------------------------------------- */

impl IntoTicketboardError for serde_json::Error {
    fn into_ticketboard(self) -> TicketboardError {
        TicketboardError::Parse(format!("invalid JSON payload: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_ticketboard())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → TicketboardError */
/* -------------------------------------------------------------------------- */

impl IntoTicketboardError for std::io::Error {
    fn into_ticketboard(self) -> TicketboardError {
        match self.kind() {
            std::io::ErrorKind::NotFound => TicketboardError::NotFound(self.to_string()),
            _ => TicketboardError::Internal(format!("i/o error: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_ticketboard())
    }
}
