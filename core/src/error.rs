//! Error types for the Dienas API client.
//!
//! # Design
//! Each failure path gets its own variant so callers can branch on the kind
//! of failure instead of matching message text. `Network` keeps the URL that
//! was attempted; `Parse` is separate so "could not reach the server" and
//! "the server sent something that is not JSON" never look alike.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by `Api` constructors, resource builders and `Request`
/// format methods.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No usable API key, or an `ApiConfig` that fails validation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A caller-supplied argument was rejected before any network I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The transport failed to fetch `url`.
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    /// The JSON body could not be decoded.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_mentions_url() {
        let err = ApiError::Network {
            url: "http://localhost/banks.json?key=k".to_string(),
            reason: "connection refused".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("http://localhost/banks.json?key=k"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn serde_errors_convert_to_parse() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ApiError = source.into();
        assert!(matches!(err, ApiError::Parse(_)));
    }
}
