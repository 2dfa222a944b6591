//! Typed errors for LLM operations
//!
//! Failures are surfaced once, as their display strings, in the page's error
//! box; nothing here is retried.

use thiserror::Error;

/// LLM operation errors with typed variants
///
/// - `Unauthorized` (401) - bad or missing API key
/// - `RateLimited` (429) - quota exceeded
/// - `BadRequest` (400) - malformed request; caller error
/// - `ServiceError` (5xx) - server-side issue
/// - `Network` - connection/timeout
/// - `Other` - catch-all
#[derive(Debug, Error)]
pub enum LlmError {
    /// API key is invalid or missing (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Malformed request (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Server-side error (HTTP 5xx)
    #[error("Service error: {0}")]
    ServiceError(String),

    /// Network connectivity issue (connection refused, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// Other errors not fitting the above categories
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl LlmError {
    /// Convert HTTP status code and error text into typed LlmError
    pub fn from_http_status(status: reqwest::StatusCode, error_text: String) -> Self {
        match status.as_u16() {
            401 => LlmError::Unauthorized(error_text),
            429 => LlmError::RateLimited(error_text),
            400 => LlmError::BadRequest(error_text),
            500..=599 => LlmError::ServiceError(error_text),
            _ => LlmError::Other(anyhow::anyhow!("HTTP {}: {}", status, error_text)),
        }
    }

    /// Convert network/connection errors into typed LlmError
    pub fn from_network_error(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Network(format!("Request timeout: {}", e))
        } else if e.is_connect() {
            LlmError::Network(format!("Connection failed: {}", e))
        } else if let Some(status) = e.status() {
            Self::from_http_status(status, e.to_string())
        } else {
            LlmError::Other(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        let err = LlmError::from_http_status(
            reqwest::StatusCode::UNAUTHORIZED,
            "Invalid API key".to_string(),
        );
        assert!(matches!(err, LlmError::Unauthorized(_)));

        let err = LlmError::from_http_status(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded".to_string(),
        );
        assert!(matches!(err, LlmError::RateLimited(_)));

        let err =
            LlmError::from_http_status(reqwest::StatusCode::BAD_REQUEST, "Bad request".to_string());
        assert!(matches!(err, LlmError::BadRequest(_)));

        let err = LlmError::from_http_status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "Server error".to_string(),
        );
        assert!(matches!(err, LlmError::ServiceError(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LlmError::Unauthorized("invalid api key".to_string());
        assert_eq!(err.to_string(), "Unauthorized: invalid api key");

        let err = LlmError::ServiceError("upstream overloaded".to_string());
        assert_eq!(err.to_string(), "Service error: upstream overloaded");
    }

    #[test]
    fn test_convert_to_anyhow() {
        let llm_err = LlmError::RateLimited("quota exceeded".to_string());
        let anyhow_err: anyhow::Error = llm_err.into();
        assert!(anyhow_err.to_string().contains("Rate limited"));
    }
}
