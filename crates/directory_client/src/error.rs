//! Error normalization at the API boundary.

use reqwest::StatusCode;
use shared::error::ErrorBody;
use thiserror::Error;

pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

pub type ClientResult<T> = Result<T, ClientError>;

/// Every failure the API client can surface, each carrying one
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No HTTP response was received.
    #[error("{message}")]
    Network { message: String },
    /// The server rejected the payload (400 or 422).
    #[error("{message}")]
    Validation { status: u16, message: String },
    #[error("{message}")]
    Server { status: u16, message: String },
    /// A 2xx response whose body could not be decoded.
    #[error("{message}")]
    Decode { message: String },
}

impl ClientError {
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let message = normalize_message(None, Some(err.to_string()));
        if err.is_decode() {
            return Self::Decode { message };
        }
        match err.status() {
            Some(status) => Self::from_status(status, message),
            None => Self::Network { message },
        }
    }

    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let detail = ErrorBody::parse(body).and_then(|body| body.message());
        let transport = format!("Request failed with status code {}", status.as_u16());
        Self::from_status(status, normalize_message(detail, Some(transport)))
    }

    fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation {
                status: status.as_u16(),
                message,
            },
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Network { message }
            | Self::Validation { message, .. }
            | Self::Server { message, .. }
            | Self::Decode { message } => message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Network { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Picks the server detail, then the transport message, then the generic
/// fallback, skipping blank candidates.
pub fn normalize_message(detail: Option<String>, transport: Option<String>) -> String {
    [detail, transport]
        .into_iter()
        .flatten()
        .map(|candidate| candidate.trim().to_string())
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}
