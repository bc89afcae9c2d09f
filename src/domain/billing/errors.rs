//! Webhook error types for billing event ingestion.
//!
//! Defines the error conditions of the webhook path, with HTTP status
//! mapping and retryability semantics. Authentication failures are
//! permanent; ledger failures are transient and surface as a non-2xx so
//! the provider's redelivery retries them.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature header absent, or no webhook secret configured.
    #[error("Missing signature")]
    MissingSignature,

    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Webhook timestamp is outside the acceptable window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse the signature header or JSON payload.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Ledger write failed; the provider must redeliver.
    #[error("Ledger error: {0}")]
    Ledger(String),
}

impl WebhookError {
    /// Returns true if the provider should retry delivering this webhook.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Ledger(_))
    }

    /// Maps the error to an HTTP status code.
    ///
    /// Status codes determine the provider's retry behavior:
    /// - 2xx: acknowledged, no retry
    /// - 4xx: permanent failure, no retry
    /// - 5xx: transient failure, will retry
    pub fn status_code(&self) -> StatusCode {
        match self {
            // No usable signature to verify against
            WebhookError::MissingSignature => StatusCode::BAD_REQUEST,

            // Authentication failures - never retried
            WebhookError::InvalidSignature | WebhookError::TimestampOutOfRange => {
                StatusCode::UNAUTHORIZED
            }

            // Malformed input - never retried
            WebhookError::InvalidTimestamp | WebhookError::ParseError(_) => {
                StatusCode::BAD_REQUEST
            }

            // Transient - provider redelivers
            WebhookError::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ledger_errors_are_retryable() {
        assert!(WebhookError::Ledger("connection lost".to_string()).is_retryable());

        assert!(!WebhookError::MissingSignature.is_retryable());
        assert!(!WebhookError::InvalidSignature.is_retryable());
        assert!(!WebhookError::TimestampOutOfRange.is_retryable());
        assert!(!WebhookError::InvalidTimestamp.is_retryable());
        assert!(!WebhookError::ParseError("bad json".to_string()).is_retryable());
    }

    #[test]
    fn missing_signature_returns_bad_request() {
        assert_eq!(
            WebhookError::MissingSignature.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn signature_failures_return_unauthorized() {
        assert_eq!(
            WebhookError::InvalidSignature.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookError::TimestampOutOfRange.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn parse_failures_return_bad_request() {
        assert_eq!(
            WebhookError::ParseError("oops".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebhookError::InvalidTimestamp.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn ledger_failures_return_internal_error() {
        assert_eq!(
            WebhookError::Ledger("down".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
