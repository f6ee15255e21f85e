// ── Core error types ──
//
// User-facing errors from agency-core. Consumers never see reqwest or
// serde errors directly; `From<agency_api::Error>` folds them into the
// variants below and `user_message()` renders the text shown in error
// panels and toasts.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::ItemId;

const UNREACHABLE: &str = "Could not reach the server. Check your connection and try again.";
const UNEXPECTED: &str = "The server sent an unexpected response.";

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Server responses ─────────────────────────────────────────────
    #[error("Not authorized: {message}")]
    Unauthorized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Rejected by server (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response: {message}")]
    InvalidResponse { message: String },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("{id} already has an operation in progress")]
    Busy { id: ItemId },

    #[error("Cannot use file {}: {reason}", path.display())]
    File { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Text for error panels and toasts.
    ///
    /// Transport failures get a generic message, server rejections carry
    /// the server's own message (or `HTTP status N`).
    pub fn user_message(&self) -> String {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => UNREACHABLE.to_owned(),
            Self::InvalidResponse { .. } => UNEXPECTED.to_owned(),
            Self::Unauthorized { message }
            | Self::NotFound { message }
            | Self::Rejected { message, .. }
            | Self::ValidationFailed { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` when retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => true,
            Self::Rejected { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<agency_api::Error> for CoreError {
    fn from(err: agency_api::Error) -> Self {
        match err {
            agency_api::Error::InvalidToken { message } => CoreError::Config { message },
            agency_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if let Some(status) = e.status() {
                    CoreError::Rejected {
                        status: status.as_u16(),
                        message: format!("HTTP status {}", status.as_u16()),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            agency_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            agency_api::Error::CannotBeABase(url) => CoreError::Config {
                message: format!("Backend URL cannot be used as a base: {url}"),
            },
            agency_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            agency_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            agency_api::Error::Http { status, message } => match status {
                401 | 403 => CoreError::Unauthorized { message },
                404 => CoreError::NotFound { message },
                _ => CoreError::Rejected { status, message },
            },
            agency_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidResponse { message }
            }
            agency_api::Error::Attachment { path, source } => CoreError::File {
                path,
                reason: source.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_shown_verbatim() {
        let err = CoreError::from(agency_api::Error::Http {
            status: 422,
            message: "Title is required".into(),
        });
        assert_eq!(err.user_message(), "Title is required");
        assert!(!err.is_retryable());
    }

    #[test]
    fn auth_and_missing_statuses_are_classified() {
        let unauthorized = CoreError::from(agency_api::Error::Http {
            status: 401,
            message: "HTTP status 401".into(),
        });
        assert!(matches!(unauthorized, CoreError::Unauthorized { .. }));

        let missing = CoreError::from(agency_api::Error::Http {
            status: 404,
            message: "Post not found".into(),
        });
        assert!(matches!(missing, CoreError::NotFound { .. }));
        assert_eq!(missing.user_message(), "Post not found");
    }

    #[test]
    fn transport_failures_get_a_generic_message() {
        let err = CoreError::Timeout { timeout_secs: 30 };
        assert_eq!(err.user_message(), UNREACHABLE);
        assert!(err.is_retryable());
    }

    #[test]
    fn malformed_payload_is_not_echoed() {
        let err = CoreError::from(agency_api::Error::Deserialization {
            message: "expected value at line 1".into(),
            body: "<html>".into(),
        });
        assert_eq!(err.user_message(), UNEXPECTED);
    }
}
