//! Error types for the CoinGecko market data client

use thiserror::Error;

/// Errors that can occur when fetching market data
///
/// `Clone` so that mock transports can replay the same failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// Request could not complete (connection, TLS, body read)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Timeout waiting for response
    #[error("Request timeout")]
    Timeout,

    /// Upstream answered with a non-success status
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Body is not the JSON document the endpoint should return
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Expected nested field absent from an otherwise valid response
    #[error("Incomplete data for {coin_id}: missing {field}")]
    MissingField { coin_id: String, field: String },

    /// Caller input rejected before any request was made
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,
}

/// Coarse classification of [`ApiError`]
///
/// Lets callers tell "network unreachable" apart from "coin data incomplete".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, timeout or non-2xx status
    Network,
    /// Response arrived but doesn't have the expected shape
    Shape,
    /// Rejected locally
    Request,
    /// Aborted by the caller
    Cancelled,
}

impl ApiError {
    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::NetworkError(_) | ApiError::Timeout | ApiError::HttpStatus { .. } => {
                ErrorKind::Network
            }
            ApiError::InvalidResponse(_) | ApiError::MissingField { .. } => ErrorKind::Shape,
            ApiError::InvalidRequest(_) => ErrorKind::Request,
            ApiError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Creates a MissingField error
    pub fn missing_field(coin_id: &str, field: impl Into<String>) -> Self {
        Self::MissingField {
            coin_id: coin_id.to_string(),
            field: field.into(),
        }
    }

    /// Creates an InvalidRequest error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ApiError::Timeout.kind(), ErrorKind::Network);
        assert_eq!(
            ApiError::HttpStatus {
                status: 429,
                body: String::new()
            }
            .kind(),
            ErrorKind::Network
        );
        assert_eq!(
            ApiError::missing_field("bitcoin", "market_data").kind(),
            ErrorKind::Shape
        );
        assert_eq!(ApiError::invalid_request("x").kind(), ErrorKind::Request);
        assert_eq!(ApiError::Cancelled.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_missing_field_message() {
        let err = ApiError::missing_field("bitcoin", "market_data.current_price.usd");
        assert_eq!(
            err.to_string(),
            "Incomplete data for bitcoin: missing market_data.current_price.usd"
        );
    }
}
